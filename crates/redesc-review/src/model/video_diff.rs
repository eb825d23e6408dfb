//! A pending change to one video.

use yt_client::types::watch_url;
use yt_client::VideoUpdate;

/// Old and new title/description of one video, plus what is carried unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoDiff {
    pub video_id: String,
    pub old_title: String,
    pub new_title: String,
    pub old_description: String,
    pub new_description: String,
    /// Sent back unchanged with every update
    pub tags: Vec<String>,
    pub category_id: Option<String>,
}

/// Which parts of a diff a submission applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmitScope {
    Both,
    TitleOnly,
    DescriptionOnly,
}

impl SubmitScope {
    pub fn with_title(self) -> bool {
        matches!(self, SubmitScope::Both | SubmitScope::TitleOnly)
    }

    pub fn with_description(self) -> bool {
        matches!(self, SubmitScope::Both | SubmitScope::DescriptionOnly)
    }

    /// Button label
    pub fn label(self) -> &'static str {
        match self {
            SubmitScope::Both => "Replace title and description",
            SubmitScope::TitleOnly => "Replace title",
            SubmitScope::DescriptionOnly => "Replace description",
        }
    }
}

impl VideoDiff {
    pub fn title_changed(&self) -> bool {
        self.old_title != self.new_title
    }

    pub fn description_changed(&self) -> bool {
        self.old_description != self.new_description
    }

    pub fn has_changes(&self) -> bool {
        self.title_changed() || self.description_changed()
    }

    /// Scopes worth offering, in display order. A scope that would change
    /// nothing, or the same as a narrower one, is left out.
    pub fn offered_scopes(&self) -> Vec<SubmitScope> {
        let title = self.title_changed();
        let description = self.description_changed();

        let mut scopes = Vec::with_capacity(3);
        if title && description {
            scopes.push(SubmitScope::Both);
        }
        if title {
            scopes.push(SubmitScope::TitleOnly);
        }
        if description {
            scopes.push(SubmitScope::DescriptionOnly);
        }
        scopes
    }

    /// The update that applies `scope` of this diff
    pub fn to_update(&self, scope: SubmitScope) -> VideoUpdate {
        VideoUpdate {
            video_id: self.video_id.clone(),
            title: if scope.with_title() {
                self.new_title.clone()
            } else {
                self.old_title.clone()
            },
            description: if scope.with_description() {
                self.new_description.clone()
            } else {
                self.old_description.clone()
            },
            tags: self.tags.clone(),
            category_id: self.category_id.clone(),
        }
    }

    pub fn watch_url(&self) -> String {
        watch_url(&self.video_id)
    }
}
