//! YouTube API data transfer objects
//!
//! These types carry only what the bulk editor reads and writes. They are
//! intentionally separate from the raw API payloads in `rest_client`.

use serde::{Deserialize, Serialize};

/// A video listed from a playlist, with its current snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistItem {
    /// Video ID (e.g., "dQw4w9WgXcQ")
    pub video_id: String,

    /// Current title
    pub title: String,

    /// Current description
    pub description: String,

    /// Current tags (empty when the video has none)
    pub tags: Vec<String>,

    /// Category ID, when the video lookup returned one
    pub category_id: Option<String>,
}

/// New snippet values for a single video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoUpdate {
    pub video_id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Fetched from the API before updating when unknown
    pub category_id: Option<String>,
}

/// What listing does when the playlist does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotFoundPolicy {
    /// Behave like an empty playlist
    #[default]
    Empty,
    /// Fail with [`crate::ApiError::PlaylistNotFound`]
    Error,
}

impl PlaylistItem {
    /// Canonical watch URL of the video
    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }
}

/// Canonical watch URL for a video ID
pub fn watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
