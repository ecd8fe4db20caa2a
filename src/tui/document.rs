//! Lays out document blocks as terminal lines.
//!
//! Wrapping is done here rather than by ratatui so the row of every entry
//! heading is known exactly; those rows become the jump anchors.

use crate::glossary::entry_id;
use crate::parser::{Block, InlineSegment, render_inline};
use crate::scroll::AnchorMap;
use crate::tui::theme::Theme;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

const BULLET: &str = "• ";

/// The laid-out document for one terminal width.
#[derive(Debug, Clone, Default)]
pub struct DocumentView {
    pub lines: Vec<Line<'static>>,
    pub anchors: AnchorMap,
    pub width: u16,
}

impl DocumentView {
    pub fn height(&self) -> u32 {
        u32::try_from(self.lines.len()).unwrap_or(u32::MAX)
    }
}

/// Lay out `blocks` at `width` columns, starting after `lead` blank rows.
///
/// The N-th level-3 heading is anchored as entry `term-N`.
pub fn layout_document(blocks: &[Block], width: u16, lead: u16, theme: &Theme) -> DocumentView {
    let width_cols = usize::from(width.max(1));
    let mut lines: Vec<Line<'static>> = vec![Line::default(); usize::from(lead)];
    let mut anchors = AnchorMap::new();
    let mut term_count = 0;

    for block in blocks {
        match block {
            Block::Heading1 { text } | Block::Heading2 { text } | Block::Heading3 { text } => {
                let level = block.heading_level().unwrap_or(3);
                if level == 3 {
                    term_count += 1;
                    anchors.insert(entry_id(term_count), row(&lines));
                }
                let style = theme.heading_style(level);
                let segments = styled_segments(text, style, style);
                lines.extend(wrap_segments(&segments, width_cols, None, 0));
            }
            Block::Paragraph { text } => {
                let segments = styled_segments(text, theme.text_style(), theme.bold_style());
                lines.extend(wrap_segments(&segments, width_cols, None, 0));
            }
            Block::List { items } => {
                let bullet = Span::styled(BULLET, Style::default().fg(theme.list_bullet));
                for item in items {
                    let segments = styled_segments(item, theme.text_style(), theme.bold_style());
                    lines.extend(wrap_segments(
                        &segments,
                        width_cols,
                        Some(bullet.clone()),
                        BULLET.width(),
                    ));
                }
            }
            Block::Rule => {
                lines.push(Line::from(Span::styled(
                    "─".repeat(width_cols),
                    Style::default().fg(theme.rule),
                )));
            }
        }
        lines.push(Line::default());
    }

    DocumentView {
        lines,
        anchors,
        width,
    }
}

fn row(lines: &[Line<'_>]) -> u32 {
    u32::try_from(lines.len()).unwrap_or(u32::MAX)
}

fn styled_segments(text: &str, plain: Style, bold: Style) -> Vec<(String, Style)> {
    render_inline(text)
        .into_iter()
        .map(|segment| match segment {
            InlineSegment::Plain(text) => (text, plain),
            InlineSegment::Bold(text) => (text, bold),
        })
        .collect()
}

/// Split text into alternating runs of whitespace and non-whitespace.
fn runs(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;

    for (idx, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|s| s != space) {
            out.push(&text[start..idx]);
            start = idx;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

struct LineBuilder {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    pending_space: Option<(String, Style)>,
    used: usize,
    start: usize,
    width: usize,
    indent: usize,
}

impl LineBuilder {
    fn new(width: usize, prefix: Option<Span<'static>>, indent: usize) -> Self {
        let (spans, used) = match prefix {
            Some(span) => {
                let w = span.content.width();
                (vec![span], w)
            }
            None => (Vec::new(), 0),
        };
        Self {
            lines: Vec::new(),
            spans,
            pending_space: None,
            used,
            start: used,
            width,
            indent,
        }
    }

    fn at_line_start(&self) -> bool {
        self.used == self.start
    }

    fn break_line(&mut self) {
        self.pending_space = None;
        let spans = std::mem::take(&mut self.spans);
        self.lines.push(Line::from(spans));
        if self.indent > 0 {
            self.spans.push(Span::raw(" ".repeat(self.indent)));
        }
        self.used = self.indent;
        self.start = self.indent;
    }

    fn push(&mut self, text: &str, style: Style) {
        self.used += text.width();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    /// Whitespace is held back until the next word, so lines never end in it.
    fn push_space(&mut self, space: &str, style: Style) {
        if !self.at_line_start() {
            self.pending_space = Some((space.to_string(), style));
        }
    }

    fn push_word(&mut self, word: &str, style: Style) {
        let w = word.width();
        let space_w = self.pending_space.as_ref().map_or(0, |(s, _)| s.width());

        if self.used + space_w + w > self.width && !self.at_line_start() {
            self.break_line();
        } else if let Some((space, space_style)) = self.pending_space.take() {
            self.push(&space, space_style);
        }

        if self.used + w <= self.width {
            self.push(word, style);
            return;
        }

        // Longer than a whole line: hard split by character.
        let mut chunk = String::new();
        for c in word.chars() {
            let cw = c.to_string().width();
            if self.used + chunk.width() + cw > self.width
                && !(chunk.is_empty() && self.at_line_start())
            {
                if !chunk.is_empty() {
                    self.push(&chunk, style);
                    chunk.clear();
                }
                self.break_line();
            }
            chunk.push(c);
        }
        if !chunk.is_empty() {
            self.push(&chunk, style);
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.lines.push(Line::from(self.spans));
        self.lines
    }
}

/// Greedy word wrap of styled segments.
///
/// `prefix` is drawn on the first line only; continuation lines are indented
/// by `indent` columns. Always yields at least one line.
fn wrap_segments(
    segments: &[(String, Style)],
    width: usize,
    prefix: Option<Span<'static>>,
    indent: usize,
) -> Vec<Line<'static>> {
    let width = width.max(indent + 1);
    let mut builder = LineBuilder::new(width, prefix, indent);

    for (text, style) in segments {
        for run in runs(text) {
            if run.starts_with(char::is_whitespace) {
                builder.push_space(run, *style);
            } else {
                builder.push_word(run, *style);
            }
        }
    }

    builder.finish()
}
