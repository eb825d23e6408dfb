//! `redesc substitute`: the interactive bulk edit

use super::{connect, ensure_authorized, resolve_playlist};
use crate::app::ReviewApp;
use crate::cli::{SubstituteArgs, MIN_LIMIT};
use crate::tui;
use anyhow::Result;
use chrono::Utc;
use log::info;
use redesc_config::AppConfig;
use redesc_review::{
    ChunkLimits, ReportWriter, ReviewSession, SessionSummary, Substitution, SubstitutionRequest,
};
use yt_client::{NotFoundPolicy, YouTubeClient, UNBOUNDED_LISTING};

pub async fn run(config: &AppConfig, args: SubstituteArgs) -> Result<()> {
    let started_at = Utc::now();

    // Validate everything before the first remote call
    let mut request = SubstitutionRequest::new(&args.expression, &args.replacement);
    request.include_titles = !args.no_titles;
    request.include_descriptions = !args.no_descriptions;
    let substitution = Substitution::compile(&request)?;

    let playlist = resolve_playlist(args.playlist, config)?;
    let limit = args.limit.unwrap_or(config.default_limit).max(MIN_LIMIT);

    let client = connect(config)?;
    ensure_authorized(&client).await?;

    println!("Listing playlist {} ...", playlist);
    let items = client
        .list_playlist_items(&playlist, UNBOUNDED_LISTING, NotFoundPolicy::Error)
        .await?;
    let diffs = substitution.build_diffs(&items);
    info!(
        "{} of {} videos in {} would change",
        diffs.len(),
        items.len(),
        playlist
    );

    if diffs.is_empty() {
        println!("No video matches `{}`.", request.expression);
        return Ok(());
    }

    let limits = ChunkLimits {
        chunk: config.chunk_limit,
        page: config.page_limit,
    };
    let mut app = ReviewApp::new(ReviewSession::new(diffs, limit), request, limits);

    let mut terminal = tui::enter()?;
    let result = app.run(&mut terminal, &client).await;
    tui::leave(&mut terminal)?;
    result?;

    for note in app.notes() {
        println!("{}", note);
    }

    let session = app.into_session();
    println!("{}", summary_message(&session.summary()));

    let writer = ReportWriter::new(&config.report_dir, started_at);
    if let Some(path) = writer.write(session.done())? {
        println!("Report written to {}", path.display());
    }

    Ok(())
}

fn summary_message(summary: &SessionSummary) -> String {
    if summary.applied == 0 {
        return "No changes were applied.".to_string();
    }

    let mut message = format!("Applied {} changes.", summary.applied);
    if summary.left_over > 0 {
        message.push_str(&format!(" {} were left unchanged.", summary.left_over));
    }
    if summary.deferred > 0 {
        message.push_str(&format!(
            " {} more remain for a later run.",
            summary.deferred
        ));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_message() {
        assert_eq!(
            summary_message(&SessionSummary::default()),
            "No changes were applied."
        );
        assert_eq!(
            summary_message(&SessionSummary {
                applied: 2,
                left_over: 0,
                deferred: 1,
            }),
            "Applied 2 changes. 1 more remain for a later run."
        );
        assert_eq!(
            summary_message(&SessionSummary {
                applied: 1,
                left_over: 3,
                deferred: 0,
            }),
            "Applied 1 changes. 3 were left unchanged."
        );
    }
}
