//! Screen areas of the page: the scrolled body, the status bar, and the
//! sticky header stacked over the top of the body.

use crate::tui::app::SEARCH_INPUT_HEIGHT;
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageAreas {
    /// Everything above the status bar; the document scrolls here
    pub body: Rect,
    pub status: Rect,
    /// Title bar at the top of the body
    pub title: Rect,
    /// Search input, when the search box is drawn
    pub search: Option<Rect>,
    /// Result list (or "no results" line) under the search input
    pub results: Option<Rect>,
    /// Whatever is left of the body under the sticky header
    pub rest: Rect,
}

impl PageAreas {
    /// Split `area` for a title bar of `header_rows` and a search box of the
    /// measured height (`None` when it is not drawn).
    pub fn new(area: Rect, header_rows: u16, search_box_height: Option<u16>) -> Self {
        let mut body = area;
        let status = take_bottom(&mut body, 1);

        let mut rest = body;
        let title = take_top(&mut rest, header_rows);
        let (search, results) = match search_box_height {
            Some(height) => {
                let input_rows = height.min(SEARCH_INPUT_HEIGHT);
                let search = take_top(&mut rest, input_rows);
                let results = take_top(&mut rest, height - input_rows);
                (Some(search), (!results.is_empty()).then_some(results))
            }
            None => (None, None),
        };

        Self {
            body,
            status,
            title,
            search,
            results,
            rest,
        }
    }
}

/// Cut up to `rows` off the top of `area`.
fn take_top(area: &mut Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    let top = Rect { height: rows, ..*area };
    area.y += rows;
    area.height -= rows;
    top
}

/// Cut up to `rows` off the bottom of `area`.
fn take_bottom(area: &mut Rect, rows: u16) -> Rect {
    let rows = rows.min(area.height);
    area.height -= rows;
    Rect {
        y: area.y + area.height,
        height: rows,
        ..*area
    }
}
