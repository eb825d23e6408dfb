//! Building the set of pending changes from a regex substitution.
//!
//! The pattern and the replacement are validated once, up front. After that
//! the substitution is applied uniformly to every listed video and cannot fail.

use crate::error::ReviewError;
use crate::model::VideoDiff;
use log::debug;
use regex::Regex;
use yt_client::PlaylistItem;

/// What the operator asked to replace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubstitutionRequest {
    pub expression: String,
    pub replacement: String,
    pub include_titles: bool,
    pub include_descriptions: bool,
}

impl SubstitutionRequest {
    /// Request with both fields included; arguments are unescaped first
    pub fn new(expression: &str, replacement: &str) -> Self {
        Self {
            expression: argument_unescape(expression),
            replacement: argument_unescape(replacement),
            include_titles: true,
            include_descriptions: true,
        }
    }
}

/// A validated, ready to apply substitution
#[derive(Debug, Clone)]
pub struct Substitution {
    regex: Regex,
    replacement: String,
    include_titles: bool,
    include_descriptions: bool,
}

impl Substitution {
    pub fn compile(request: &SubstitutionRequest) -> Result<Self, ReviewError> {
        if !(request.include_titles || request.include_descriptions) {
            return Err(ReviewError::NothingSelected);
        }

        let regex = Regex::new(&request.expression)?;
        validate_replacement(&regex, &request.replacement)?;

        Ok(Self {
            regex,
            replacement: request.replacement.clone(),
            include_titles: request.include_titles,
            include_descriptions: request.include_descriptions,
        })
    }

    /// Replace every match in `text`
    pub fn apply(&self, text: &str) -> String {
        self.regex
            .replace_all(text, self.replacement.as_str())
            .into_owned()
    }

    /// The diff for one listed video, or `None` when nothing would change
    pub fn diff_for(&self, item: &PlaylistItem) -> Option<VideoDiff> {
        let new_title = if self.include_titles {
            self.apply(&item.title)
        } else {
            item.title.clone()
        };
        let new_description = if self.include_descriptions {
            self.apply(&item.description)
        } else {
            item.description.clone()
        };

        let diff = VideoDiff {
            video_id: item.video_id.clone(),
            old_title: item.title.clone(),
            new_title,
            old_description: item.description.clone(),
            new_description,
            tags: item.tags.clone(),
            category_id: item.category_id.clone(),
        };

        diff.has_changes().then_some(diff)
    }

    /// Diffs for all listed videos that change, in listing order
    pub fn build_diffs(&self, items: &[PlaylistItem]) -> Vec<VideoDiff> {
        let diffs: Vec<VideoDiff> = items.iter().filter_map(|item| self.diff_for(item)).collect();
        debug!(
            "Substitution changes {} of {} listed videos",
            diffs.len(),
            items.len()
        );
        diffs
    }
}

/// Strip the quoting an operator uses to pass empty or padded arguments.
///
/// `"text"` becomes `text`, `\"text\"` becomes `"text"`, anything else is kept.
pub fn argument_unescape(argument: &str) -> String {
    if argument.len() >= 2 && argument.starts_with('"') && argument.ends_with('"') {
        return argument[1..argument.len() - 1].to_string();
    }
    if argument.len() >= 4 && argument.starts_with("\\\"") && argument.ends_with("\\\"") {
        return format!("\"{}\"", &argument[2..argument.len() - 2]);
    }
    argument.to_string()
}

/// Reject group references (`$1`, `$name`, `${name}`) the pattern cannot satisfy.
///
/// Follows the expansion rules of `regex`: `$$` is a literal dollar, a `$`
/// not followed by a name is literal, and an unbraced name is the longest run
/// of `[_0-9A-Za-z]`.
fn validate_replacement(regex: &Regex, replacement: &str) -> Result<(), ReviewError> {
    let mut rest = replacement;

    while let Some(pos) = rest.find('$') {
        rest = &rest[pos + 1..];

        if let Some(after) = rest.strip_prefix('$') {
            rest = after;
            continue;
        }

        let (name, after) = match rest.strip_prefix('{') {
            Some(braced) => match braced.find('}') {
                Some(end) => (&braced[..end], &braced[end + 1..]),
                None => continue,
            },
            None => {
                let end = rest
                    .find(|c: char| !(c == '_' || c.is_ascii_alphanumeric()))
                    .unwrap_or(rest.len());
                (&rest[..end], &rest[end..])
            }
        };

        if name.is_empty() {
            continue;
        }
        rest = after;
        check_group(regex, name)?;
    }

    Ok(())
}

fn check_group(regex: &Regex, name: &str) -> Result<(), ReviewError> {
    let exists = match name.parse::<usize>() {
        Ok(index) => index < regex.captures_len(),
        Err(_) => regex.capture_names().flatten().any(|n| n == name),
    };

    if exists {
        Ok(())
    } else {
        Err(ReviewError::InvalidReplacement(format!(
            "unknown group reference `${}`",
            name
        )))
    }
}
