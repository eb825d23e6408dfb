//! YouTube client trait
//!
//! Defines the interface all client implementations satisfy. The review
//! engine only ever sees this trait, so tests can swap in an in-memory fake.

use crate::types::{NotFoundPolicy, PlaylistItem, VideoUpdate};
use async_trait::async_trait;

/// YouTube Data API client trait
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow sharing across
/// async tasks and threads.
#[async_trait]
pub trait YouTubeClient: Send + Sync {
    /// List the videos of a playlist
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Playlist to list
    /// * `limit` - Maximum number of items returned; paging is handled internally
    /// * `not_found` - How a missing playlist is reported
    ///
    /// # Returns
    ///
    /// Items in playlist order, each with tags and category attached.
    async fn list_playlist_items(
        &self,
        playlist_id: &str,
        limit: usize,
        not_found: NotFoundPolicy,
    ) -> anyhow::Result<Vec<PlaylistItem>>;

    /// Fetch the current snippet of a single video
    async fn fetch_video(&self, video_id: &str) -> anyhow::Result<PlaylistItem>;

    /// Replace a video's title, description, tags and category
    ///
    /// Tags are fitted to the platform limit before sending. When the
    /// category is unknown the current one is fetched first.
    async fn update_video(&self, update: &VideoUpdate) -> anyhow::Result<()>;
}
