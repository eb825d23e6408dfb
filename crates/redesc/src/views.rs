//! Review screen rendering
//!
//! Layout, top to bottom: header, title block, one bordered block per
//! description chunk, key hints of the offered actions, status line.

use crate::keymap::Keymap;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use redesc_review::{ReviewPage, TRUNCATION_NOTICE};

/// Render the page of the current diff
pub fn render_review(f: &mut Frame, page: &ReviewPage, status: Option<&str>, keymap: &Keymap) {
    let area = f.area();
    let title_height = if page.title_change.is_some() { 6 } else { 4 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(page.header.len() as u16 + 2),
            Constraint::Length(title_height),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_header(f, page, chunks[0]);
    render_title(f, page, chunks[1]);
    render_body(f, page, chunks[2]);
    render_key_hints(f, page, keymap, chunks[3]);
    render_status(f, status, chunks[4]);
}

/// Shown while the apply-all loop works through the remaining diffs
pub fn render_progress(f: &mut Frame, remaining: usize) {
    let area = f.area();
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let text = format!("Applying automatically, remaining: {}", remaining);
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" Apply all "));
    f.render_widget(paragraph, vertical[1]);
}

fn render_header(f: &mut Frame, page: &ReviewPage, area: Rect) {
    let lines: Vec<Line> = page
        .header
        .iter()
        .map(|line| {
            if line.starts_with("⚠️") {
                Line::styled(line.as_str(), Style::default().fg(Color::Yellow))
            } else {
                Line::raw(line.as_str())
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" redesc "))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_title(f: &mut Frame, page: &ReviewPage, area: Rect) {
    let mut lines = vec![
        Line::styled(
            page.title.as_str(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(page.url.as_str(), Style::default().fg(Color::Cyan)),
    ];

    if let Some(change) = &page.title_change {
        lines.extend(change.lines().map(diff_line));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Title "));
    f.render_widget(paragraph, area);
}

fn render_body(f: &mut Frame, page: &ReviewPage, area: Rect) {
    let heights: Vec<Constraint> = page
        .chunks
        .iter()
        .map(|chunk| Constraint::Length(chunk.lines().count().max(1) as u16 + 2))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();

    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(heights)
        .split(area);

    let total = page.chunks.len();
    for (index, (chunk, chunk_area)) in page.chunks.iter().zip(areas.iter()).enumerate() {
        let lines: Vec<Line> = if chunk == TRUNCATION_NOTICE {
            vec![Line::styled(
                chunk.as_str(),
                Style::default().fg(Color::Yellow),
            )]
        } else {
            chunk.lines().map(diff_line).collect()
        };

        let title = format!(" Description {}/{} ", index + 1, total);
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, *chunk_area);
    }
}

fn render_key_hints(f: &mut Frame, page: &ReviewPage, keymap: &Keymap, area: Rect) {
    let mut spans = Vec::new();

    for button in &page.buttons {
        let hint = keymap.hint_for(button.action).unwrap_or("?");
        let style = if button.enabled {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(format!("[{}] ", hint), style.add_modifier(Modifier::BOLD)));
        spans.push(Span::styled(format!("{}  ", button.label), style));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(f: &mut Frame, status: Option<&str>, area: Rect) {
    if let Some(message) = status {
        let paragraph = Paragraph::new(message).style(Style::default().fg(Color::Magenta));
        f.render_widget(paragraph, area);
    }
}

/// Color a rendered diff line by its marker
fn diff_line(line: &str) -> Line<'_> {
    let style = if line.starts_with("- ") {
        Style::default().fg(Color::Red)
    } else if line.starts_with("+ ") {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::styled(line, style)
}
