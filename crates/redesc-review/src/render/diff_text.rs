//! Line-aligned text diff with collapsed runs of unchanged lines.
//!
//! Both texts are walked line by line in lock-step, only as far as the
//! shorter one reaches. A differing pair becomes a removed/added block; equal
//! lines are folded into a single "(N linii bez zmian)" placeholder.

/// Marker of a line from the old text
pub const OLD_MARKER: &str = "-";
/// Marker of a line from the new text
pub const NEW_MARKER: &str = "+";

/// Separator used for display: every block is its own paragraph
pub const DISPLAY_SEPARATOR: &str = "\n\n";
/// Separator used for the persisted report
pub const REPORT_SEPARATOR: &str = "\n";

#[derive(Debug, PartialEq, Eq)]
enum Block<'a> {
    Changed { old: &'a str, new: &'a str },
    Unchanged(usize),
}

/// Render the diff of `old_text` and `new_text` with the default markers
pub fn render_line_diff(old_text: &str, new_text: &str, separator: &str) -> String {
    render_line_diff_with(old_text, new_text, separator, OLD_MARKER, NEW_MARKER)
}

/// Render the diff of `old_text` and `new_text` with custom markers
pub fn render_line_diff_with(
    old_text: &str,
    new_text: &str,
    separator: &str,
    old_marker: &str,
    new_marker: &str,
) -> String {
    let mut blocks: Vec<Block<'_>> = Vec::new();

    // Trailing lines of the longer text are not shown
    for (old, new) in split_lines(old_text).zip(split_lines(new_text)) {
        if old != new {
            blocks.push(Block::Changed { old, new });
            continue;
        }
        match blocks.last_mut() {
            Some(Block::Unchanged(count)) => *count += 1,
            _ => blocks.push(Block::Unchanged(1)),
        }
    }

    blocks
        .iter()
        .map(|block| match block {
            Block::Changed { old, new } => {
                format!("{} {}\n{} {}", old_marker, old, new_marker, new)
            }
            Block::Unchanged(count) => unchanged_placeholder(*count),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

/// "(N linia/linie/linii bez zmian)"
pub fn unchanged_placeholder(count: usize) -> String {
    format!("({} {} bez zmian)", count, pronounce_lines(count))
}

/// Polish plural of "line" for `count`
pub fn pronounce_lines(count: usize) -> &'static str {
    if count == 1 {
        return "linia";
    }
    let mod_100 = count % 100;
    if !(10..=20).contains(&mod_100) && matches!(count % 10, 2..=4) {
        return "linie";
    }
    "linii"
}

/// Split on `\n`, `\r\n` and `\r`; a trailing line break adds no empty line
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(pos) => {
                let line = &rest[..pos];
                let break_len = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + break_len..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}
