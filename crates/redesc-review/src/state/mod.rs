//! Review session state machine

mod session;

pub use session::{FinalizeOutcome, ReviewSession, SessionSummary};

#[cfg(test)]
mod tests {
    use crate::{ReviewSession, SessionSummary, VideoDiff};

    fn diff(id: &str) -> VideoDiff {
        VideoDiff {
            video_id: id.to_string(),
            old_title: "cat".to_string(),
            new_title: "dog".to_string(),
            old_description: String::new(),
            new_description: String::new(),
            tags: Vec::new(),
            category_id: None,
        }
    }

    #[test]
    fn test_session_is_reachable_from_crate_root() {
        let mut session = ReviewSession::new(vec![diff("a"), diff("b")], 10);
        session.next_page();
        assert_eq!(session.current_page(), 1);

        session.cancel();
        assert_eq!(
            session.summary(),
            SessionSummary {
                applied: 0,
                left_over: 2,
                deferred: 0,
            }
        );
    }
}
