mod layout;
mod popups;
mod util;

use layout::PageAreas;

use crate::parser::plain_text;
use crate::tui::app::{App, Focus, LOADING_MESSAGE, LoadState, NO_RESULTS_MESSAGE};
use popups::render_help_popup;
use ratatui::Frame;
use ratatui::layout::{Margin, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState, Wrap,
};
use util::{highlight_search_matches, truncate_to_width};

pub fn render(frame: &mut Frame, app: &mut App) {
    // Clear expired status messages (auto-dismiss after timeout)
    app.clear_expired_status_message();

    let area = frame.area();
    let areas = PageAreas::new(area, app.header_rows(), app.search_box_height());

    // The document fills the whole body; the header is drawn over it.
    app.ensure_layout(areas.body.width.saturating_sub(1), areas.body.height);
    render_document(frame, app, areas.body);

    render_title_bar(frame, app, areas.title);

    app.search_area = areas.search.unwrap_or_default();
    if let Some(search_area) = areas.search {
        render_search_input(frame, app, search_area);
    }

    app.results_area = areas.results.unwrap_or_default();
    if let Some(results_area) = areas.results {
        render_results(frame, app, results_area);
    }

    match &app.load_state {
        LoadState::Loading => render_message(frame, app, areas.rest, LOADING_MESSAGE, false),
        LoadState::Failed(message) => render_message(frame, app, areas.rest, message, true),
        LoadState::Ready(_) => {}
    }

    render_status_bar(frame, app, areas.status);

    if app.show_help {
        render_help_popup(frame, app, area);
    }
}

fn render_document(frame: &mut Frame, app: &App, area: Rect) {
    let Some(document) = app.document.as_ref() else {
        return;
    };

    let start = usize::try_from(app.viewport.position()).unwrap_or(usize::MAX);
    let visible: Vec<Line<'static>> = document
        .lines
        .iter()
        .skip(start)
        .take(usize::from(area.height))
        .cloned()
        .collect();

    let text_area = Rect {
        width: area.width.saturating_sub(1),
        ..area
    };
    frame.render_widget(
        Paragraph::new(visible).style(app.theme.text_style()),
        text_area,
    );

    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .style(Style::default().fg(app.theme.muted));
    let max = usize::try_from(app.viewport.max_position()).unwrap_or(0);
    let mut scrollbar_state = ScrollbarState::new(max).position(start.min(max));

    // Keep the scrollbar out from under the sticky header.
    let top = app.scroll.offset().min(u32::from(area.height));
    let top = u16::try_from(top).unwrap_or(area.height);
    frame.render_stateful_widget(
        scrollbar,
        Rect {
            y: area.y + top,
            height: area.height - top,
            ..area
        },
        &mut scrollbar_state,
    );
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title_text = match app.glossary() {
        Some(glossary) => format!(
            "glossview - {} - {} terms",
            app.source_name,
            glossary.entries.len()
        ),
        None => format!("glossview - {}", app.source_name),
    };
    let borders = if area.height > 1 {
        Borders::BOTTOM
    } else {
        Borders::NONE
    };

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title_bar_fg)
                .bg(app.theme.header_bg)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(borders));
    frame.render_widget(Clear, area);
    frame.render_widget(title, area);
}

fn render_search_input(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let focused = app.focus == Focus::Search;

    let line = if app.query.is_empty() && !focused {
        Line::from(Span::styled(
            "Press / to search terms",
            Style::default().fg(theme.muted),
        ))
    } else {
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::raw("Search: "),
            Span::styled(
                format!("{}{cursor}", app.query.as_str()),
                Style::default()
                    .fg(theme.search_border)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                "  (Esc: clear, Enter: jump)",
                Style::default().fg(theme.muted),
            ),
        ])
    };

    let border_style = if focused {
        Style::default().fg(theme.search_border)
    } else {
        Style::default().fg(theme.muted)
    };

    let paragraph = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(" Search Terms ")
                .style(Style::default().bg(theme.header_bg)),
        )
        .style(Style::default().fg(theme.foreground));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn render_results(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    frame.render_widget(Clear, area);

    if app.results.is_empty() {
        let empty = Paragraph::new(format!(" {NO_RESULTS_MESSAGE}"))
            .style(Style::default().fg(theme.muted).bg(theme.header_bg));
        frame.render_widget(empty, area);
        return;
    }

    let rows = app.visible_dropdown_rows();
    let label_width = usize::from(area.width.saturating_sub(4));
    let highlight = Style::default()
        .fg(theme.bold_fg)
        .add_modifier(Modifier::BOLD);

    let items: Vec<ListItem> = app
        .result_entries()
        .into_iter()
        .enumerate()
        .skip(app.dropdown_scroll)
        .take(rows)
        .map(|(idx, entry)| {
            let title = truncate_to_width(&plain_text(&entry.title), label_width);
            let selected = idx == app.selected_result;
            let base = if selected {
                Style::default()
                    .fg(theme.selection_fg)
                    .bg(theme.selection_bg)
            } else {
                theme.text_style()
            };
            let marker = if selected { "▶ " } else { "  " };
            let mut spans = vec![Span::styled(marker, base)];
            spans.extend(highlight_search_matches(
                &title,
                app.query.as_str(),
                base,
                base.patch(highlight),
            ));
            ListItem::new(Line::from(spans)).style(base)
        })
        .collect();

    let title = format!(" {} of {} ", app.selected_result + 1, app.results.len());
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.search_border))
            .title(title)
            .style(Style::default().bg(theme.header_bg)),
    );
    frame.render_widget(list, area);
}

fn render_message(frame: &mut Frame, app: &App, area: Rect, message: &str, is_error: bool) {
    let style = if is_error {
        Style::default()
            .fg(app.theme.error_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted)
    };
    let inner = area.inner(Margin {
        vertical: 1,
        horizontal: 2,
    });
    frame.render_widget(
        Paragraph::new(message.to_string())
            .style(style)
            .wrap(Wrap { trim: true }),
        inner,
    );
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let style = Style::default()
        .bg(app.theme.status_bar_bg)
        .fg(app.theme.status_bar_fg);

    if let Some(ref msg) = app.status_message {
        let status = Paragraph::new(format!(" {msg}")).style(style.add_modifier(Modifier::BOLD));
        frame.render_widget(status, area);
        return;
    }

    let focus_indicator = match app.focus {
        Focus::Document => "Document",
        Focus::Search => "Search",
    };
    let max = app.viewport.max_position();
    let percentage = if max > 0 {
        app.viewport.position() * 100 / max
    } else {
        100
    };
    let hints = match app.focus {
        Focus::Document => "/:Search • j/k:Scroll • g/G:Top/Bottom • ?:Help • q:Quit",
        Focus::Search => "↑/↓:Select • Enter:Jump • Esc:Clear/Back",
    };

    let status_text = format!(" [{focus_indicator}] {percentage}% • {hints} ");
    let width = usize::from(area.width);
    frame.render_widget(
        Paragraph::new(truncate_to_width(&status_text, width)).style(style),
        area,
    );
}
