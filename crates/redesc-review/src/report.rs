//! Plain-text change log of an ended session.

use crate::model::VideoDiff;
use crate::render::diff_text::{render_line_diff, REPORT_SEPARATOR};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes the report of applied diffs into `dir`, named after the start of
/// the invocation
#[derive(Debug, Clone)]
pub struct ReportWriter {
    dir: PathBuf,
    started_at: DateTime<Utc>,
}

impl ReportWriter {
    pub fn new(dir: impl Into<PathBuf>, started_at: DateTime<Utc>) -> Self {
        Self {
            dir: dir.into(),
            started_at,
        }
    }

    /// `log-<unix seconds>.<microseconds>.txt`
    pub fn file_name(&self) -> String {
        format!(
            "log-{}.{:06}.txt",
            self.started_at.timestamp(),
            self.started_at.timestamp_subsec_micros()
        )
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(self.file_name())
    }

    /// Report text, or `None` when nothing was applied
    pub fn render(diffs: &[VideoDiff]) -> Option<String> {
        if diffs.is_empty() {
            return None;
        }

        let blocks: Vec<String> = diffs.iter().map(render_block).collect();
        Some(blocks.join("\n\n"))
    }

    /// Write the report of `diffs`; returns the file written, if any
    pub fn write(&self, diffs: &[VideoDiff]) -> Result<Option<PathBuf>> {
        let Some(text) = Self::render(diffs) else {
            return Ok(None);
        };

        ensure_dir(&self.dir)?;
        let path = self.path();
        fs::write(&path, text)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;

        info!("Wrote report of {} changes to {}", diffs.len(), path.display());
        Ok(Some(path))
    }
}

fn render_block(diff: &VideoDiff) -> String {
    let title = if diff.title_changed() {
        format!("{} → {}", diff.old_title, diff.new_title)
    } else {
        diff.old_title.clone()
    };
    let underline = "-".repeat(title.chars().count());
    let description = render_line_diff(
        &diff.old_description,
        &diff.new_description,
        REPORT_SEPARATOR,
    );

    format!(
        "{}\n{}\n{}\n{}",
        title,
        underline,
        diff.watch_url(),
        description
    )
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create report directory {}", dir.display()))?;
    }
    Ok(())
}
