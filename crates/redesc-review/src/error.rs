//! Errors surfaced to the operator

use thiserror::Error;

/// Input validation failures, raised before any remote call
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("Invalid regular expression: {0}")]
    InvalidExpression(#[from] regex::Error),

    #[error("Invalid replacement: {0}")]
    InvalidReplacement(String),

    #[error("Neither titles nor descriptions were selected for replacement")]
    NothingSelected,
}

/// A single submission that did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No change left to submit")]
    NoActiveDiff,

    #[error("Failed to update video {video_id}: {message}")]
    Rejected { video_id: String, message: String },
}
