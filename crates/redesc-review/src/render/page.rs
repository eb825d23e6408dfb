//! Review page view model
//!
//! Pre-computes everything a surface needs to show the current diff: header
//! lines, the title block, the description chunks and the offered actions.
//! Derived purely from session state, so it is rebuilt after every transition.

use crate::diff_set::SubstitutionRequest;
use crate::model::SubmitScope;
use crate::render::chunks::{paginate, ChunkLimits};
use crate::render::diff_text::{render_line_diff, DISPLAY_SEPARATOR, NEW_MARKER, OLD_MARKER};
use crate::state::ReviewSession;

/// What pressing a page button asks the session to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Previous,
    Next,
    Submit(SubmitScope),
    Finalize,
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageButton {
    pub action: PageAction,
    pub label: String,
    pub enabled: bool,
}

/// One rendered review page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPage {
    /// Context lines shown above the diff
    pub header: Vec<String>,
    /// Current (old) title of the video
    pub title: String,
    pub url: String,
    /// `- old\n+ new` when the title changes
    pub title_change: Option<String>,
    /// Description diff, split to fit the page
    pub chunks: Vec<String>,
    pub buttons: Vec<PageButton>,
}

impl ReviewPage {
    /// Page for the session's current diff, `None` once nothing is active
    pub fn build(
        session: &ReviewSession,
        request: &SubstitutionRequest,
        limits: &ChunkLimits,
    ) -> Option<Self> {
        let diff = session.current()?;
        let url = diff.watch_url();

        let rendered = render_line_diff(
            &diff.old_description,
            &diff.new_description,
            DISPLAY_SEPARATOR,
        );
        let prefix_len = url.chars().count() + diff.new_title.chars().count();
        let chunks = paginate(&rendered, prefix_len, limits);

        let title_change = diff.title_changed().then(|| {
            format!(
                "{} {}\n{} {}",
                OLD_MARKER, diff.old_title, NEW_MARKER, diff.new_title
            )
        });

        Some(Self {
            header: header_lines(session, request),
            title: diff.old_title.clone(),
            url,
            title_change,
            chunks,
            buttons: buttons(session),
        })
    }

    /// Whether `action` is offered and enabled on this page
    pub fn allows(&self, action: PageAction) -> bool {
        self.buttons
            .iter()
            .any(|button| button.action == action && button.enabled)
    }
}

fn header_lines(session: &ReviewSession, request: &SubstitutionRequest) -> Vec<String> {
    let page = session.current_page();
    let max_page = session.max_page();
    let quota = session.remaining_quota();
    let mut lines = Vec::new();

    if page >= quota {
        let following = if page < max_page {
            " and the following ones"
        } else {
            ""
        };
        lines.push(format!(
            "⚠️ This video{} will not be changed automatically. You can do it in the next run.",
            following
        ));
    }

    lines.push(format!(
        "Replacing matches of `{}` with `{}`.",
        escape_backticks(&request.expression),
        escape_backticks(&request.replacement)
    ));
    lines.push(format!("Page {} of {}.", page + 1, max_page + 1));
    lines.push(format!(
        "Changes will be applied to at most {} of the listed videos.",
        quota
    ));

    let left_after = session.active().len().saturating_sub(quota);
    if left_after > 0 {
        lines.push(format!(
            "Afterwards {} videos will remain for a later run.",
            left_after
        ));
    }

    lines
}

fn buttons(session: &ReviewSession) -> Vec<PageButton> {
    let page = session.current_page();
    let mut buttons = vec![
        PageButton {
            action: PageAction::Previous,
            label: "Previous".to_string(),
            enabled: page > 0,
        },
        PageButton {
            action: PageAction::Next,
            label: "Next".to_string(),
            enabled: page < session.max_page(),
        },
    ];

    if let Some(diff) = session.current() {
        buttons.extend(diff.offered_scopes().into_iter().map(|scope| PageButton {
            action: PageAction::Submit(scope),
            label: scope.label().to_string(),
            enabled: true,
        }));
    }

    let quota = session.remaining_quota();
    if quota > 1 {
        buttons.push(PageButton {
            action: PageAction::Finalize,
            label: format!("Apply all ({})", quota),
            enabled: true,
        });
    }

    buttons.push(PageButton {
        action: PageAction::Cancel,
        label: "End".to_string(),
        enabled: true,
    });

    buttons
}

fn escape_backticks(text: &str) -> String {
    text.replace('`', "\\`")
}
