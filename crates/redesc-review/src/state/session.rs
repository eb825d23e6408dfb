//! The review state machine.
//!
//! One [`ReviewSession`] lives for one invocation. It owns the pending diffs
//! and every operator interaction maps to one method here: navigation,
//! submission of a single diff, the apply-all loop and cancellation.
//!
//! Invariant: while `active` is non-empty, `current_page <= max_page()`.

use crate::error::SubmitError;
use crate::model::{SubmitScope, VideoDiff};
use crate::traits::VideoUpdater;
use log::{debug, info, warn};

/// How a session ended, for the closing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionSummary {
    /// Diffs applied remotely
    pub applied: usize,
    /// Diffs dropped by cancellation or a failed apply-all
    pub left_over: usize,
    /// Diffs not applied because the quota ran out
    pub deferred: usize,
}

/// Result of one apply-all run
#[derive(Debug)]
pub struct FinalizeOutcome {
    /// Diffs applied by this run
    pub applied: usize,
    pub left_over: usize,
    pub deferred: usize,
    /// The submission that stopped the loop early
    pub failure: Option<SubmitError>,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    active: Vec<VideoDiff>,
    done: Vec<VideoDiff>,
    current_page: usize,
    remaining_quota: usize,
    left_over: usize,
    deferred: usize,
}

impl ReviewSession {
    /// Start reviewing `diffs`; at most `limit` of them may be applied
    pub fn new(diffs: Vec<VideoDiff>, limit: usize) -> Self {
        let remaining_quota = limit.min(diffs.len());
        debug!(
            "Review session over {} diffs, quota {}",
            diffs.len(),
            remaining_quota
        );
        Self {
            active: diffs,
            remaining_quota,
            ..Self::default()
        }
    }

    pub fn active(&self) -> &[VideoDiff] {
        &self.active
    }

    pub fn done(&self) -> &[VideoDiff] {
        &self.done
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Index of the last active diff, 0 when none are left
    pub fn max_page(&self) -> usize {
        self.active.len().saturating_sub(1)
    }

    pub fn remaining_quota(&self) -> usize {
        self.remaining_quota
    }

    pub fn left_over(&self) -> usize {
        self.left_over
    }

    pub fn deferred(&self) -> usize {
        self.deferred
    }

    /// The diff under the cursor
    pub fn current(&self) -> Option<&VideoDiff> {
        self.active.get(self.current_page)
    }

    /// No more interactive pages once nothing is active
    pub fn is_finished(&self) -> bool {
        self.active.is_empty()
    }

    /// Move one page forward; no-op on the last page
    pub fn next_page(&mut self) {
        if self.current_page < self.max_page() {
            self.current_page += 1;
        }
    }

    /// Move one page back; no-op on the first page
    pub fn previous_page(&mut self) {
        self.current_page = self.current_page.saturating_sub(1);
    }

    /// Apply `scope` of the current diff remotely.
    ///
    /// On success the diff moves to `done` and the cursor stays on an existing
    /// item. On failure nothing changes.
    pub async fn submit<U>(&mut self, updater: &U, scope: SubmitScope) -> Result<(), SubmitError>
    where
        U: VideoUpdater + ?Sized,
    {
        let diff = self.current().ok_or(SubmitError::NoActiveDiff)?;
        let update = diff.to_update(scope);

        if let Err(err) = updater.apply_update(&update).await {
            warn!("Update of video {} rejected: {:#}", update.video_id, err);
            return Err(SubmitError::Rejected {
                video_id: update.video_id,
                message: format!("{:#}", err),
            });
        }

        let applied = self.active.remove(self.current_page);
        info!("Applied {:?} to video {}", scope, applied.video_id);
        self.done.push(applied);
        self.remaining_quota = self.remaining_quota.saturating_sub(1);

        let max_page = self.max_page();
        if self.current_page == max_page && max_page != 0 {
            self.current_page -= 1;
        }
        self.current_page = self.current_page.min(max_page);

        Ok(())
    }

    /// Apply whole diffs from the cursor on until the quota is used up,
    /// nothing is left or a submission fails. Then the session ends.
    ///
    /// `on_progress` receives the remaining quota before every submission.
    pub async fn finalize<U, F>(&mut self, updater: &U, mut on_progress: F) -> FinalizeOutcome
    where
        U: VideoUpdater + ?Sized,
        F: FnMut(usize),
    {
        let done_before = self.done.len();
        let left_over_before = self.left_over;
        let deferred_before = self.deferred;
        let mut failure = None;

        while self.remaining_quota > 0 && !self.active.is_empty() {
            on_progress(self.remaining_quota);
            if let Err(err) = self.submit(updater, SubmitScope::Both).await {
                failure = Some(err);
                break;
            }
        }

        let remaining = self.active.len();
        if failure.is_some() {
            self.left_over += remaining;
        } else {
            self.deferred += remaining;
        }
        self.active.clear();
        self.current_page = 0;

        let outcome = FinalizeOutcome {
            applied: self.done.len() - done_before,
            left_over: self.left_over - left_over_before,
            deferred: self.deferred - deferred_before,
            failure,
        };
        info!(
            "Apply-all finished: {} applied, {} left over, {} deferred",
            outcome.applied, outcome.left_over, outcome.deferred
        );
        outcome
    }

    /// End the session; what was applied stays applied
    pub fn cancel(&mut self) {
        info!("Review cancelled with {} diffs pending", self.active.len());
        self.left_over += self.active.len();
        self.active.clear();
        self.current_page = 0;
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            applied: self.done.len(),
            left_over: self.left_over,
            deferred: self.deferred,
        }
    }
}
