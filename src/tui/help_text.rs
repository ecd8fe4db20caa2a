use crate::tui::theme::Theme;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

/// Key column width for keybindings
const KEY_COLUMN_WIDTH: usize = 11;

#[derive(Debug, Clone, Copy)]
pub enum HelpLine {
    Title(&'static str),
    Description(&'static str),
    SectionHeader(&'static str),
    KeyBinding { key: &'static str, desc: &'static str },
    Note(&'static str),
    Blank,
}

impl HelpLine {
    /// Convert this help line to a styled ratatui Line
    pub fn to_line(&self, theme: &Theme) -> Line<'static> {
        match self {
            HelpLine::Title(text) => Line::from(Span::styled(
                *text,
                Style::default()
                    .fg(theme.title_bar_fg)
                    .add_modifier(Modifier::BOLD),
            )),
            HelpLine::Description(text) => Line::from(Span::styled(
                *text,
                Style::default()
                    .fg(theme.muted)
                    .add_modifier(Modifier::ITALIC),
            )),
            HelpLine::SectionHeader(text) => Line::from(Span::styled(
                *text,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            HelpLine::KeyBinding { key, desc } => Line::from(vec![
                Span::styled(
                    format!("  {:<width$}", key, width = KEY_COLUMN_WIDTH),
                    Style::default().fg(theme.search_border),
                ),
                Span::raw(*desc),
            ]),
            HelpLine::Note(text) => Line::from(vec![
                Span::styled(
                    "Note: ",
                    Style::default()
                        .fg(theme.bold_fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*text, Style::default().fg(theme.muted)),
            ]),
            HelpLine::Blank => Line::default(),
        }
    }
}

const fn title(text: &'static str) -> HelpLine {
    HelpLine::Title(text)
}

const fn description(text: &'static str) -> HelpLine {
    HelpLine::Description(text)
}

const fn section(text: &'static str) -> HelpLine {
    HelpLine::SectionHeader(text)
}

const fn keybinding(key: &'static str, desc: &'static str) -> HelpLine {
    HelpLine::KeyBinding { key, desc }
}

const fn note(text: &'static str) -> HelpLine {
    HelpLine::Note(text)
}

const fn blank() -> HelpLine {
    HelpLine::Blank
}

pub const HELP_LINES: &[HelpLine] = &[
    title("glossview - Keyboard Shortcuts"),
    description("Use j/k or ↓/↑ to scroll | Press Esc or ? to close"),
    blank(),

    section("Reading"),
    keybinding("j/↓", "Scroll down"),
    keybinding("k/↑", "Scroll up"),
    keybinding("d/PgDn", "Page down"),
    keybinding("u/PgUp", "Page up"),
    keybinding("g/Home", "Jump to top"),
    keybinding("G/End", "Jump to bottom"),
    keybinding("Wheel", "Scroll"),
    blank(),

    section("Search"),
    keybinding("/ or i", "Focus the search box"),
    keybinding("Type", "Filter terms by title"),
    keybinding("↓/↑ Tab", "Move through results"),
    keybinding("Enter", "Jump to the selected term"),
    keybinding("Click", "Jump to a result"),
    keybinding("Esc", "Clear the query, then leave search"),
    blank(),

    section("General"),
    keybinding("?", "Toggle this help"),
    keybinding("q", "Quit"),
    keybinding("Ctrl+C", "Quit from anywhere"),
    blank(),

    note("Matching is case-insensitive and looks at term titles only"),
    blank(),

    description("Use j/k or ↓/↑ to scroll | Press Esc or ? to close"),
];

/// Build the help text with theme colors applied
pub fn build_help_text(theme: &Theme) -> Vec<Line<'static>> {
    HELP_LINES.iter().map(|line| line.to_line(theme)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_lines_render() {
        let lines = build_help_text(&Theme::default());
        assert_eq!(lines.len(), HELP_LINES.len());

        let first: String = lines[0].spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(first.starts_with("glossview"));
    }

    #[test]
    fn test_keybinding_column_alignment() {
        let line = keybinding("q", "Quit").to_line(&Theme::default());
        assert_eq!(line.spans[0].content.len(), 2 + KEY_COLUMN_WIDTH);
    }
}
