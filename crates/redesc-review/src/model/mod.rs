//! Data model for pending changes.

mod video_diff;

pub use video_diff::{SubmitScope, VideoDiff};
