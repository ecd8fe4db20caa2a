use crate::config::Config;
use crate::error::LoadError;
use crate::glossary::{Entry, Glossary, SearchQuery, filter_indices};
use crate::scroll::{ScrollController, Viewport};
use crate::tui::document::{DocumentView, layout_document};
use crate::tui::help_text;
use crate::tui::theme::Theme;
use ratatui::layout::{Margin, Position, Rect};
use std::time::{Duration, Instant};

/// Rows of the search input box (text line plus borders).
pub const SEARCH_INPUT_HEIGHT: u16 = 3;

/// Shown in place of the result list when nothing matches.
pub const NO_RESULTS_MESSAGE: &str = "No matching terms.";

/// Shown while the document is being fetched.
pub const LOADING_MESSAGE: &str = "Loading terminology…";

const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// What the page is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready(Glossary),
    Failed(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Document,
    Search,
}

/// All state of the terminology page.
///
/// Every input event maps to one method here. Methods that touch one of the
/// offset triggers (query, result count, load state, terminal size) end by
/// calling [`App::recompute_scroll_offset`].
pub struct App {
    pub source_name: String,
    pub load_state: LoadState,
    pub query: SearchQuery,
    pub focus: Focus,
    /// Indices into the glossary's entries matching the current query
    pub results: Vec<usize>,
    pub selected_result: usize,
    pub dropdown_scroll: usize,
    pub scroll: ScrollController,
    pub viewport: Viewport,
    pub document: Option<DocumentView>,
    pub terminal_size: (u16, u16),
    pub show_help: bool,
    pub help_scroll: u16,
    pub status_message: Option<String>,
    status_message_time: Option<Instant>,
    pub theme: Theme,
    /// Screen areas from the last render, for mouse hit-testing
    pub search_area: Rect,
    pub results_area: Rect,
    header_rows: u16,
    dropdown_rows: u16,
}

impl App {
    pub fn new(source_name: String, config: &Config) -> Self {
        let mut app = Self {
            source_name,
            load_state: LoadState::Loading,
            query: SearchQuery::new(config.search.max_query_len),
            focus: Focus::Document,
            results: Vec::new(),
            selected_result: 0,
            dropdown_scroll: 0,
            scroll: ScrollController::new(config.scroll_offsets(), config.scroll.smooth),
            viewport: Viewport::new(),
            document: None,
            terminal_size: (0, 0),
            show_help: false,
            help_scroll: 0,
            status_message: None,
            status_message_time: None,
            theme: Theme::default().with_custom_colors(&config.theme),
            search_area: Rect::default(),
            results_area: Rect::default(),
            header_rows: u16::try_from(config.scroll.header_offset).unwrap_or(u16::MAX),
            dropdown_rows: config.search.dropdown_rows.max(1),
        };
        app.recompute_scroll_offset();
        app
    }

    // ---- load lifecycle -------------------------------------------------

    pub fn glossary(&self) -> Option<&Glossary> {
        match &self.load_state {
            LoadState::Ready(glossary) => Some(glossary),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.load_state == LoadState::Loading
    }

    /// Settle the single document load.
    pub fn finish_load(&mut self, result: Result<Glossary, LoadError>) {
        self.load_state = match result {
            Ok(glossary) => {
                tracing::info!(entries = glossary.entries.len(), "terminology ready");
                LoadState::Ready(glossary)
            }
            Err(e) => {
                tracing::error!(error = %e, "terminology unavailable");
                LoadState::Failed(e.user_message())
            }
        };
        self.document = None;
        self.refresh_results();
        self.recompute_scroll_offset();
    }

    // ---- search ---------------------------------------------------------

    pub fn focus_search(&mut self) {
        if self.glossary().is_some() {
            self.focus = Focus::Search;
        }
    }

    pub fn focus_document(&mut self) {
        self.focus = Focus::Document;
    }

    pub fn search_input(&mut self, c: char) {
        if self.query.push(c) {
            self.on_query_changed();
        }
    }

    pub fn search_backspace(&mut self) {
        if self.query.pop() {
            self.on_query_changed();
        }
    }

    pub fn clear_search(&mut self) {
        if self.query.clear() {
            self.on_query_changed();
        }
    }

    pub fn set_query(&mut self, text: &str) {
        self.query.set(text);
        self.on_query_changed();
    }

    /// Esc in the search box: clear first, leave on the second press.
    pub fn search_escape(&mut self) {
        if self.query.is_empty() {
            self.focus_document();
        } else {
            self.clear_search();
        }
    }

    fn on_query_changed(&mut self) {
        self.selected_result = 0;
        self.dropdown_scroll = 0;
        self.refresh_results();
        self.recompute_scroll_offset();
    }

    fn refresh_results(&mut self) {
        let Some(glossary) = self.glossary() else {
            self.results.clear();
            return;
        };

        let results = filter_indices(&glossary.entries, self.query.as_str());

        let count_changed = results.len() != self.results.len();
        self.results = results;
        self.selected_result = self.selected_result.min(self.results.len().saturating_sub(1));
        if count_changed {
            tracing::debug!(count = self.results.len(), "search results changed");
        }
    }

    /// Whether the dropdown (or its "no results" line) is displayed.
    pub fn results_visible(&self) -> bool {
        self.glossary().is_some() && self.query.is_active()
    }

    /// Entries currently listed in the dropdown.
    pub fn result_entries(&self) -> Vec<&Entry> {
        match self.glossary() {
            Some(glossary) => self
                .results
                .iter()
                .filter_map(|idx| glossary.entries.get(*idx))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn select_next_result(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_result = (self.selected_result + 1) % self.results.len();
        self.keep_selection_visible();
    }

    pub fn select_previous_result(&mut self) {
        if self.results.is_empty() {
            return;
        }
        self.selected_result = self
            .selected_result
            .checked_sub(1)
            .unwrap_or(self.results.len() - 1);
        self.keep_selection_visible();
    }

    fn keep_selection_visible(&mut self) {
        let rows = self.visible_dropdown_rows();
        if rows == 0 {
            return;
        }
        if self.selected_result < self.dropdown_scroll {
            self.dropdown_scroll = self.selected_result;
        } else if self.selected_result >= self.dropdown_scroll + rows {
            self.dropdown_scroll = self.selected_result + 1 - rows;
        }
    }

    /// Dropdown rows actually drawn, after fitting into the terminal.
    pub fn visible_dropdown_rows(&self) -> usize {
        if !self.results_visible() || self.results.is_empty() {
            return 0;
        }
        let wanted = self.results.len().min(usize::from(self.dropdown_rows));
        let room = usize::from(
            self.body_height()
                .saturating_sub(self.header_rows)
                .saturating_sub(SEARCH_INPUT_HEIGHT)
                .saturating_sub(2),
        );
        wanted.min(room)
    }

    /// Jump to the result at `index` within the dropdown.
    pub fn activate_result(&mut self, index: usize) -> bool {
        let Some(id) = self
            .result_entries()
            .get(index)
            .map(|entry| entry.id.clone())
        else {
            return false;
        };
        self.selected_result = index;
        self.keep_selection_visible();
        self.jump_to_entry(&id)
    }

    pub fn activate_selected_result(&mut self) -> bool {
        self.activate_result(self.selected_result)
    }

    /// Dropdown index under a screen cell, if any.
    pub fn result_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.results.is_empty() {
            return None;
        }
        let inner = self.results_area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        });
        if !inner.contains(Position::new(column, row)) {
            return None;
        }
        let index = self.dropdown_scroll + usize::from(row - inner.y);
        (index < self.results.len()).then_some(index)
    }

    /// Mouse click: pick a result, focus the search box, or leave it.
    pub fn click(&mut self, column: u16, row: u16) {
        if let Some(index) = self.result_at(column, row) {
            self.activate_result(index);
        } else if self.search_area.contains(Position::new(column, row)) {
            self.focus_search();
        } else if !self.results_area.contains(Position::new(column, row)) {
            self.focus_document();
        }
    }

    // ---- scrolling ------------------------------------------------------

    /// Rows below the title bar and above the status bar.
    fn body_height(&self) -> u16 {
        self.terminal_size.1.saturating_sub(1)
    }

    /// Measured height of the search container (input plus result list).
    ///
    /// `None` while the search box is not drawn, i.e. before the document
    /// is ready.
    pub fn search_box_height(&self) -> Option<u16> {
        self.glossary()?;
        let mut height = SEARCH_INPUT_HEIGHT;
        if self.results_visible() {
            let rows = if self.results.is_empty() {
                1
            } else {
                u16::try_from(self.visible_dropdown_rows())
                    .unwrap_or(u16::MAX)
                    .saturating_add(2)
            };
            height = height.saturating_add(rows);
        }
        let room = self.body_height().saturating_sub(self.header_rows);
        Some(height.min(room))
    }

    pub fn header_rows(&self) -> u16 {
        self.header_rows
    }

    /// Recompute the sticky-header offset from current measurements.
    pub fn recompute_scroll_offset(&mut self) {
        let measured = self.search_box_height().map(u32::from);
        let offset = self.scroll.recompute(measured);
        tracing::trace!(offset, "scroll offset recomputed");
    }

    /// Terminal resized.
    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
        self.keep_selection_visible();
        self.recompute_scroll_offset();
    }

    /// Make sure the document is laid out for `width` columns and `height`
    /// visible rows. Called from the render pass.
    pub fn ensure_layout(&mut self, width: u16, height: u16) {
        let stale = self.document.as_ref().is_none_or(|doc| doc.width != width);
        if stale {
            let lead = self.header_rows.saturating_add(SEARCH_INPUT_HEIGHT);
            self.document = self
                .glossary()
                .map(|glossary| layout_document(&glossary.blocks, width, lead, &self.theme));
        }
        let content_height = self.document.as_ref().map_or(0, DocumentView::height);
        self.viewport.set_bounds(content_height, u32::from(height));
    }

    /// Scroll so entry `id`'s heading sits just below the sticky header.
    ///
    /// Does nothing (and returns false) if the heading is not laid out.
    pub fn jump_to_entry(&mut self, id: &str) -> bool {
        let Some(document) = self.document.as_ref() else {
            return false;
        };
        let Some(request) = self.scroll.jump_target(&document.anchors, id) else {
            return false;
        };
        self.viewport.apply(request);

        let title = self
            .glossary()
            .and_then(|g| g.entry(id))
            .map(|e| crate::parser::plain_text(&e.title));
        if let Some(title) = title {
            self.set_status_message(format!("→ {title}"));
        }
        true
    }

    pub fn scroll_down(&mut self) {
        self.viewport.scroll_by(1);
    }

    pub fn scroll_up(&mut self) {
        self.viewport.scroll_by(-1);
    }

    fn page_rows(&self) -> i32 {
        let covered = self.scroll.offset();
        let rows = self.viewport.height().saturating_sub(covered).max(1);
        i32::try_from(rows).unwrap_or(i32::MAX)
    }

    pub fn scroll_page_down(&mut self) {
        self.viewport.scroll_by(self.page_rows());
    }

    pub fn scroll_page_up(&mut self) {
        self.viewport.scroll_by(-self.page_rows());
    }

    pub fn scroll_to_top(&mut self) {
        self.viewport.scroll_to_top();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.viewport.scroll_to_bottom();
    }

    /// Advance animations. Returns true if a redraw is needed.
    pub fn tick(&mut self) -> bool {
        let moved = self.viewport.tick();
        let expired = self.clear_expired_status_message();
        moved || expired
    }

    // ---- help / status --------------------------------------------------

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
        if self.show_help {
            self.help_scroll = 0; // Reset scroll when opening help
        }
    }

    pub fn scroll_help_down(&mut self) {
        let new_scroll = self.help_scroll.saturating_add(1);
        let max_scroll = u16::try_from(help_text::HELP_LINES.len()).unwrap_or(u16::MAX);
        if new_scroll < max_scroll {
            self.help_scroll = new_scroll;
        }
    }

    pub fn scroll_help_up(&mut self) {
        self.help_scroll = self.help_scroll.saturating_sub(1);
    }

    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some(message);
        self.status_message_time = Some(Instant::now());
    }

    /// Drop the status message once it has been shown long enough.
    pub fn clear_expired_status_message(&mut self) -> bool {
        match self.status_message_time {
            Some(shown) if shown.elapsed() >= STATUS_TIMEOUT => {
                self.status_message = None;
                self.status_message_time = None;
                true
            }
            _ => false,
        }
    }
}
