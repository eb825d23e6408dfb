//! Tag backfill: give untagged videos the tags listed for them in a mapping
//! file. Non-interactive, applied one video at a time, stops at the first
//! failure.

use crate::traits::VideoUpdater;
use anyhow::{Context, Result};
use log::{info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use yt_client::{PlaylistItem, VideoUpdate};

/// Video ID to the tags it should get
pub type TagMapping = HashMap<String, Vec<String>>;

/// Result of a backfill run
#[derive(Debug)]
pub struct BackfillOutcome {
    pub applied: usize,
    pub total: usize,
    /// Error of the update that stopped the run
    pub failure: Option<anyhow::Error>,
}

/// Read a JSON object of `{"<video id>": ["tag", ...]}`
pub fn load_mapping(path: &Path) -> Result<TagMapping> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tag mapping {}", path.display()))?;
    let mapping: TagMapping = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse tag mapping {}", path.display()))?;
    info!("Loaded tags for {} videos from {}", mapping.len(), path.display());
    Ok(mapping)
}

/// Updates for listed videos without tags that the mapping knows, in
/// playlist order. Title, description and category stay as they are.
pub fn plan_backfill(items: &[PlaylistItem], mapping: &TagMapping) -> Vec<VideoUpdate> {
    items
        .iter()
        .filter(|item| item.tags.is_empty())
        .filter_map(|item| {
            let tags = mapping.get(&item.video_id)?;
            Some(VideoUpdate {
                video_id: item.video_id.clone(),
                title: item.title.clone(),
                description: item.description.clone(),
                tags: tags.clone(),
                category_id: item.category_id.clone(),
            })
        })
        .collect()
}

/// Apply `plan` in order. `on_progress(applied, total, update)` runs after
/// every successful update.
pub async fn run_backfill<U, F>(
    updater: &U,
    plan: &[VideoUpdate],
    mut on_progress: F,
) -> BackfillOutcome
where
    U: VideoUpdater + ?Sized,
    F: FnMut(usize, usize, &VideoUpdate),
{
    let total = plan.len();
    let mut applied = 0;

    for update in plan {
        if let Err(err) = updater.apply_update(update).await {
            warn!("Backfill stopped at video {}: {:#}", update.video_id, err);
            return BackfillOutcome {
                applied,
                total,
                failure: Some(err),
            };
        }
        applied += 1;
        on_progress(applied, total, update);
    }

    info!("Backfilled tags of {} videos", applied);
    BackfillOutcome {
        applied,
        total,
        failure: None,
    }
}
