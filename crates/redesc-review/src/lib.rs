//! # redesc-review
//!
//! The review-and-apply engine behind the bulk title/description editor.
//!
//! ## Design Principles
//!
//! This crate is **instrumented**: it never talks to YouTube itself. It takes
//! listed videos, computes the pending changes, and pushes accepted ones
//! through the [`VideoUpdater`] trait. Every interaction of the operator maps
//! to one named transition on [`ReviewSession`], so the whole state machine is
//! testable without a UI.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use redesc_review::{ReviewPage, ReviewSession, Substitution, SubstitutionRequest};
//!
//! let substitution = Substitution::compile(&request)?;
//! let diffs = substitution.build_diffs(&items);
//! let mut session = ReviewSession::new(diffs, limit);
//!
//! while let Some(page) = ReviewPage::build(&session, &request, &limits) {
//!     // show the page, wait for the operator, then e.g.
//!     session.submit(&client, SubmitScope::Both).await?;
//! }
//! ```

pub mod backfill;
pub mod diff_set;
pub mod error;
pub mod model;
pub mod render;
pub mod report;
pub mod state;
pub mod traits;

pub use backfill::{load_mapping, plan_backfill, run_backfill, BackfillOutcome, TagMapping};
pub use diff_set::{argument_unescape, Substitution, SubstitutionRequest};
pub use error::{ReviewError, SubmitError};
pub use model::{SubmitScope, VideoDiff};
pub use render::{
    paginate, render_line_diff, ChunkLimits, PageAction, PageButton, ReviewPage,
    TRUNCATION_NOTICE,
};
pub use report::ReportWriter;
pub use state::{FinalizeOutcome, ReviewSession, SessionSummary};
pub use traits::VideoUpdater;
