//! Splitting a rendered diff into size-bounded display chunks.
//!
//! Sizes are counted in characters. Chunks are cut only at paragraph
//! boundaries (`\n\n`) so no diff block is torn apart; a chunk without such a
//! boundary stays oversized. If the page as a whole is still too large, the
//! tail is replaced by [`TRUNCATION_NOTICE`].

use log::warn;

/// Boundary chunks are split at
pub const CHUNK_SEPARATOR: &str = "\n\n";

/// Shown in place of the content that did not fit on the page
pub const TRUNCATION_NOTICE: &str =
    "⚠️ **Nie udało się wyświetlić całego opisu, ponieważ przekroczył on limit długości.**";

/// Size limits of the display surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLimits {
    /// Largest single chunk
    pub chunk: usize,
    /// Largest page: prefix plus all chunks
    pub page: usize,
}

impl Default for ChunkLimits {
    fn default() -> Self {
        Self {
            chunk: 2000,
            page: 4500,
        }
    }
}

/// Split `rendered` into chunks, then fit them onto one page next to a
/// prefix of `prefix_len` characters
pub fn paginate(rendered: &str, prefix_len: usize, limits: &ChunkLimits) -> Vec<String> {
    fit_page(split_chunks(rendered, limits.chunk), prefix_len, limits.page)
}

/// Cut the last chunk at its last boundary within `chunk_limit` until it fits
/// or has no usable boundary. The boundary itself is dropped.
pub fn split_chunks(rendered: &str, chunk_limit: usize) -> Vec<String> {
    let mut chunks = vec![rendered.to_string()];

    while let Some(last) = chunks.last_mut() {
        if char_len(last) <= chunk_limit {
            break;
        }

        let window = byte_offset(last, chunk_limit);
        let Some(split_at) = last[..window].rfind(CHUNK_SEPARATOR) else {
            break;
        };

        let remainder = last[split_at + CHUNK_SEPARATOR.len()..].to_string();
        last.truncate(split_at);
        chunks.push(remainder);
    }

    chunks
}

/// Drop trailing chunks and put the notice last until the page fits.
///
/// Gives up once only the notice is left, so an oversized prefix cannot loop.
pub fn fit_page(mut chunks: Vec<String>, prefix_len: usize, page_limit: usize) -> Vec<String> {
    let mut truncated = false;

    while prefix_len + chunks.iter().map(|c| char_len(c)).sum::<usize>() > page_limit {
        warn!("Page too long, truncating");
        if truncated {
            if chunks.len() <= 1 {
                break;
            }
            chunks.pop();
        }
        match chunks.last_mut() {
            Some(last) => *last = TRUNCATION_NOTICE.to_string(),
            None => break,
        }
        truncated = true;
    }

    chunks
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the `chars`-th character, or the end of `text`
fn byte_offset(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `blocks` paragraphs of `size` characters each, boundary included
    fn paragraphs(blocks: usize, size: usize) -> String {
        let body = "x".repeat(size - CHUNK_SEPARATOR.len());
        vec![body; blocks].join(CHUNK_SEPARATOR)
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_chunks("short", 2000), vec!["short".to_string()]);
    }

    #[test]
    fn test_chunks_respect_limit_and_reconstruct() {
        let text = paragraphs(60, 100);
        let chunks = split_chunks(&text, 2000);

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| char_len(c) <= 2000));
        assert_eq!(chunks.join(CHUNK_SEPARATOR), text);
    }

    #[test]
    fn test_chunk_without_boundary_stays_oversized() {
        let text = "y".repeat(2500);
        assert_eq!(split_chunks(&text, 2000), vec![text]);
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        let text = format!("{}{}{}", "ż".repeat(10), CHUNK_SEPARATOR, "ź".repeat(10));
        let chunks = split_chunks(&text, 15);
        assert_eq!(chunks, vec!["ż".repeat(10), "ź".repeat(10)]);
    }

    #[test]
    fn test_page_within_limit_is_untouched() {
        let text = paragraphs(30, 100);
        let chunks = paginate(&text, 100, &ChunkLimits::default());
        assert_eq!(chunks.join(CHUNK_SEPARATOR), text);
        assert!(!chunks.iter().any(|c| c == TRUNCATION_NOTICE));
    }

    #[test]
    fn test_oversized_page_ends_with_notice() {
        let text = paragraphs(60, 100);
        let limits = ChunkLimits::default();
        let chunks = paginate(&text, 60, &limits);

        assert_eq!(chunks.last().map(String::as_str), Some(TRUNCATION_NOTICE));
        let total: usize = 60 + chunks.iter().map(|c| char_len(c)).sum::<usize>();
        assert!(total <= limits.page);
        assert!(chunks.iter().all(|c| char_len(c) <= limits.chunk));
    }

    #[test]
    fn test_huge_prefix_terminates() {
        let chunks = fit_page(vec!["a".to_string(), "b".to_string()], 10_000, 4500);
        assert_eq!(chunks, vec![TRUNCATION_NOTICE.to_string()]);
    }
}
