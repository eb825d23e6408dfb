//! Trait for applying a single video update.

use async_trait::async_trait;
use yt_client::{VideoUpdate, YouTubeClient};

/// Applies one snippet update remotely.
///
/// Every [`YouTubeClient`] is an updater; tests plug in an in-memory fake.
#[async_trait]
pub trait VideoUpdater: Send + Sync {
    /// Apply the update; an error means the remote side rejected it.
    async fn apply_update(&self, update: &VideoUpdate) -> anyhow::Result<()>;
}

#[async_trait]
impl<C> VideoUpdater for C
where
    C: YouTubeClient + ?Sized,
{
    async fn apply_update(&self, update: &VideoUpdate) -> anyhow::Result<()> {
        self.update_video(update).await
    }
}
