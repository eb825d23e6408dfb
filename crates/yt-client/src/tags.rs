//! Tag list fitting
//!
//! YouTube caps the combined length of a video's tags. Tags containing a space
//! are sent quoted and cost two extra characters, and every accepted tag costs
//! one separator.

/// Combined tag length the API accepts
pub const MAX_TAGS_LENGTH: usize = 350;

/// Keep the leading tags that fit within [`MAX_TAGS_LENGTH`]
pub fn fit_tags(tags: &[String]) -> Vec<String> {
    let mut total = 0;
    let mut fitted = Vec::new();

    for tag in tags {
        total += tag.chars().count();
        if tag.contains(' ') {
            total += 2;
        }
        if total >= MAX_TAGS_LENGTH {
            break;
        }
        total += 1;
        fitted.push(tag.clone());
    }

    fitted
}
