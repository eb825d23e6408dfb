//! Turning pending changes into something an operator can read.

pub mod chunks;
pub mod diff_text;
pub mod page;

pub use chunks::{paginate, ChunkLimits, TRUNCATION_NOTICE};
pub use diff_text::render_line_diff;
pub use page::{PageAction, PageButton, ReviewPage};
