//! Utility functions for UI rendering
//!
//! Pure functions for layout calculations and text formatting.

use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::Span;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Calculate a centered rectangular area within a parent area.
///
/// # Arguments
/// * `area` - The parent area to center within
/// * `percent_x` - Width as a percentage of parent (0-100)
/// * `percent_y` - Height as a percentage of parent (0-100)
pub fn centered_area(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let [area] = vertical.areas(area);
    let [area] = horizontal.areas(area);
    area
}

/// Centered popup sized as a percentage of `area`, but never smaller than
/// `min_width` x `min_height` unless `area` itself is.
pub fn popup_area(
    area: Rect,
    percent_x: u16,
    percent_y: u16,
    min_width: u16,
    min_height: u16,
) -> Rect {
    let sized = centered_area(area, percent_x, percent_y);
    let width = sized.width.max(min_width).min(area.width);
    let height = sized.height.max(min_height).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cut `text` to at most `width` display columns, ending in `…` if cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let cw = c.width().unwrap_or(0);
        if used + cw > width - 1 {
            break;
        }
        out.push(c);
        used += cw;
    }
    out.push('…');
    out
}

/// Highlight search matches within text, returning styled spans.
///
/// Matching is case-insensitive and done character by character, so
/// case-folding that changes byte lengths cannot split a character.
pub fn highlight_search_matches(
    text: &str,
    query: &str,
    base_style: Style,
    highlight_style: Style,
) -> Vec<Span<'static>> {
    let needle: Vec<char> = query.trim().to_lowercase().chars().collect();
    if needle.is_empty() {
        return vec![Span::styled(text.to_string(), base_style)];
    }

    // Byte offset of each char, with lower-cased chars for comparison.
    let chars: Vec<(usize, String)> = text
        .char_indices()
        .map(|(idx, c)| (idx, c.to_lowercase().collect()))
        .collect();

    let matches_at = |start: usize| -> bool {
        let mut folded = String::new();
        for (_, lower) in chars.iter().skip(start).take(needle.len()) {
            folded.push_str(lower);
        }
        folded.chars().eq(needle.iter().copied())
    };

    let mut spans = Vec::new();
    let mut last_end = 0;
    let mut i = 0;
    while i + needle.len() <= chars.len() {
        if !matches_at(i) {
            i += 1;
            continue;
        }
        let start = chars[i].0;
        let end = chars.get(i + needle.len()).map_or(text.len(), |(idx, _)| *idx);
        if start > last_end {
            spans.push(Span::styled(text[last_end..start].to_string(), base_style));
        }
        spans.push(Span::styled(text[start..end].to_string(), highlight_style));
        last_end = end;
        i += needle.len();
    }

    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base_style));
    }
    if spans.is_empty() {
        spans.push(Span::styled(text.to_string(), base_style));
    }
    spans
}
