//! `redesc backfill-tags`: give untagged videos their tags from a mapping file

use super::{connect, ensure_authorized, resolve_playlist};
use crate::cli::BackfillArgs;
use anyhow::Result;
use redesc_config::AppConfig;
use redesc_review::{load_mapping, plan_backfill, run_backfill};
use yt_client::{NotFoundPolicy, YouTubeClient, UNBOUNDED_LISTING};

pub async fn run(config: &AppConfig, args: BackfillArgs) -> Result<()> {
    let mapping = load_mapping(&args.mapping)?;
    let playlist = resolve_playlist(args.playlist, config)?;

    let client = connect(config)?;
    ensure_authorized(&client).await?;

    let items = client
        .list_playlist_items(&playlist, UNBOUNDED_LISTING, NotFoundPolicy::Error)
        .await?;
    let plan = plan_backfill(&items, &mapping);
    if plan.is_empty() {
        println!("No untagged video of {} is listed in the mapping.", playlist);
        return Ok(());
    }

    println!("Adding tags to {} videos ...", plan.len());
    let outcome = run_backfill(&client, &plan, |applied, total, update| {
        println!("[{}/{}] {} ({})", applied, total, update.title, update.video_id);
    })
    .await;

    if let Some(err) = outcome.failure {
        return Err(err.context(format!(
            "Stopped after {} of {} videos",
            outcome.applied, outcome.total
        )));
    }

    println!("Done, {} videos tagged.", outcome.applied);
    Ok(())
}
