//! Errors reported by the YouTube client

use thiserror::Error;

/// Failures with a meaning the caller may want to act on.
///
/// Transport errors are passed through as plain `anyhow` errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Playlist {0} not found")]
    PlaylistNotFound(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Not authorized: {0}. Run `redesc authorize` and try again")]
    NotAuthorized(String),

    #[error("Another authorization is already in progress")]
    AuthorizationInProgress,

    #[error("Video {0} not found")]
    VideoNotFound(String),
}
