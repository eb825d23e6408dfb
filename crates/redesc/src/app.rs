//! The interactive review loop
//!
//! Reads one key at a time, translates it into a page action and runs the
//! matching session transition to completion before the next key is read.

use crate::keymap::Keymap;
use crate::views;
use anyhow::Result;
use log::{debug, info};
use ratatui::{
    backend::Backend,
    crossterm::event::{self, Event, KeyEvent, KeyEventKind},
    Terminal,
};
use redesc_review::{
    ChunkLimits, PageAction, ReviewPage, ReviewSession, SubstitutionRequest, VideoUpdater,
};
use std::io;
use std::time::Duration;

pub struct ReviewApp {
    session: ReviewSession,
    request: SubstitutionRequest,
    limits: ChunkLimits,
    keymap: Keymap,
    /// Outcome of the last action, shown under the page
    status: Option<String>,
    /// Messages for the operator once the terminal is restored
    notes: Vec<String>,
}

impl ReviewApp {
    pub fn new(session: ReviewSession, request: SubstitutionRequest, limits: ChunkLimits) -> Self {
        Self {
            session,
            request,
            limits,
            keymap: Keymap::default(),
            status: None,
            notes: Vec::new(),
        }
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn into_session(self) -> ReviewSession {
        self.session
    }

    fn page(&self) -> Option<ReviewPage> {
        ReviewPage::build(&self.session, &self.request, &self.limits)
    }

    /// Run until the session has no active diffs left
    pub async fn run<B, U>(&mut self, terminal: &mut Terminal<B>, updater: &U) -> Result<()>
    where
        B: Backend,
        U: VideoUpdater + ?Sized,
    {
        while let Some(page) = self.page() {
            terminal.draw(|f| {
                views::render_review(f, &page, self.status.as_deref(), &self.keymap)
            })?;

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(action) = self.action_for_key(&page, &key) {
                    self.perform(action, terminal, updater).await?;
                }
            }
        }

        Ok(())
    }

    /// The action `key` asks for, if the page offers it
    fn action_for_key(&mut self, page: &ReviewPage, key: &KeyEvent) -> Option<PageAction> {
        let action = self.keymap.match_key(key)?;
        if page.allows(action) {
            Some(action)
        } else {
            self.status = Some("That action is not available on this page".to_string());
            None
        }
    }

    /// Run one transition of the session
    pub async fn perform<B, U>(
        &mut self,
        action: PageAction,
        terminal: &mut Terminal<B>,
        updater: &U,
    ) -> Result<()>
    where
        B: Backend,
        U: VideoUpdater + ?Sized,
    {
        debug!("Performing {:?} on page {}", action, self.session.current_page());
        self.status = None;

        match action {
            PageAction::Previous => self.session.previous_page(),
            PageAction::Next => self.session.next_page(),
            PageAction::Submit(scope) => {
                let video_id = self.session.current().map(|d| d.video_id.clone());
                match self.session.submit(updater, scope).await {
                    Ok(()) => {
                        self.status = video_id.map(|id| format!("Updated video {}", id));
                    }
                    Err(err) => self.status = Some(format!("⚠️ {}", err)),
                }
            }
            PageAction::Finalize => {
                let mut draw_error: Option<io::Error> = None;
                let outcome = self
                    .session
                    .finalize(updater, |remaining| {
                        if draw_error.is_some() {
                            return;
                        }
                        if let Err(err) = terminal.draw(|f| views::render_progress(f, remaining)) {
                            draw_error = Some(err);
                        }
                    })
                    .await;

                if let Some(err) = outcome.failure {
                    self.notes.push(format!("⚠️ {}", err));
                    self.notes.push(format!(
                        "Stopped applying automatically, {} changes left over",
                        outcome.left_over
                    ));
                }
                if let Some(err) = draw_error {
                    return Err(err.into());
                }
            }
            PageAction::Cancel => {
                info!("Review ended by the operator");
                self.session.cancel();
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use redesc_review::{SubmitScope, VideoDiff};
    use std::sync::Mutex;
    use yt_client::VideoUpdate;

    struct RecordingUpdater {
        reject: Option<&'static str>,
        applied: Mutex<Vec<String>>,
    }

    impl RecordingUpdater {
        fn new(reject: Option<&'static str>) -> Self {
            Self {
                reject,
                applied: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VideoUpdater for RecordingUpdater {
        async fn apply_update(&self, update: &VideoUpdate) -> anyhow::Result<()> {
            if self.reject == Some(update.video_id.as_str()) {
                anyhow::bail!("video is private");
            }
            self.applied.lock().unwrap().push(update.video_id.clone());
            Ok(())
        }
    }

    fn app(ids: &[&str], limit: usize) -> ReviewApp {
        let diffs = ids
            .iter()
            .map(|id| VideoDiff {
                video_id: id.to_string(),
                old_title: "cat".to_string(),
                new_title: "dog".to_string(),
                old_description: "cat".to_string(),
                new_description: "dog".to_string(),
                tags: Vec::new(),
                category_id: None,
            })
            .collect();
        ReviewApp::new(
            ReviewSession::new(diffs, limit),
            SubstitutionRequest::new("cat", "dog"),
            ChunkLimits::default(),
        )
    }

    fn terminal() -> Terminal<TestBackend> {
        Terminal::new(TestBackend::new(80, 30)).unwrap()
    }

    #[tokio::test]
    async fn test_submit_reports_status() {
        let updater = RecordingUpdater::new(None);
        let mut app = app(&["a", "b"], 10);
        let mut terminal = terminal();

        app.perform(PageAction::Submit(SubmitScope::Both), &mut terminal, &updater)
            .await
            .unwrap();

        assert_eq!(app.status.as_deref(), Some("Updated video a"));
        assert_eq!(app.session.active().len(), 1);
    }

    #[tokio::test]
    async fn test_rejected_submit_keeps_diff() {
        let updater = RecordingUpdater::new(Some("a"));
        let mut app = app(&["a", "b"], 10);
        let mut terminal = terminal();

        app.perform(PageAction::Submit(SubmitScope::TitleOnly), &mut terminal, &updater)
            .await
            .unwrap();

        assert!(app.status.as_deref().unwrap().contains("video is private"));
        assert_eq!(app.session.active().len(), 2);
    }

    #[tokio::test]
    async fn test_finalize_failure_leaves_note() {
        let updater = RecordingUpdater::new(Some("b"));
        let mut app = app(&["a", "b", "c"], 10);
        let mut terminal = terminal();

        app.perform(PageAction::Finalize, &mut terminal, &updater)
            .await
            .unwrap();

        assert!(app.session.is_finished());
        assert_eq!(app.session.done().len(), 1);
        assert_eq!(
            app.notes().last().map(String::as_str),
            Some("Stopped applying automatically, 2 changes left over")
        );
    }

    #[tokio::test]
    async fn test_cancel_finishes_session() {
        let updater = RecordingUpdater::new(None);
        let mut app = app(&["a"], 10);
        let mut terminal = terminal();

        app.perform(PageAction::Cancel, &mut terminal, &updater)
            .await
            .unwrap();

        assert!(app.session.is_finished());
        assert!(updater.applied.lock().unwrap().is_empty());
    }

    #[test]
    fn test_unavailable_key_sets_status() {
        let mut app = app(&["a"], 1);
        let page = app.page().unwrap();

        let finalize = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert_eq!(app.action_for_key(&page, &finalize), None);
        assert!(app.status.is_some());

        let both = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE);
        assert_eq!(
            app.action_for_key(&page, &both),
            Some(PageAction::Submit(SubmitScope::Both))
        );
    }
}
