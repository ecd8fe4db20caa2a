mod app;
mod document;
mod help_text;
pub mod theme;
mod ui;

pub use app::{App, Focus, LoadState};
pub use document::{DocumentView, layout_document};

use crate::loader::PendingLoad;
use color_eyre::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::DefaultTerminal;
use std::time::Duration;

/// Poll interval while a smooth scroll is running (about 60 fps).
const ANIMATION_POLL: Duration = Duration::from_millis(16);
/// Poll interval otherwise; short enough to expire status messages.
const IDLE_POLL: Duration = Duration::from_millis(100);
/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: i32 = 3;

/// Run the TUI application.
///
/// Draws the page, settles the background load when it finishes, and
/// dispatches keyboard, mouse and resize events until the user quits.
///
/// # Arguments
///
/// * `terminal` - A mutable reference to a ratatui terminal
/// * `app` - The App instance to run
/// * `pending` - The document load started before the terminal was set up
pub fn run(terminal: &mut DefaultTerminal, app: App, pending: PendingLoad) -> Result<()> {
    let mut app = app;
    let mut pending = Some(pending);

    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    loop {
        terminal.draw(|frame| ui::render(frame, &mut app))?;

        if let Some(result) = pending.as_ref().and_then(PendingLoad::try_finish) {
            app.finish_load(result);
            pending = None;
            continue;
        }

        let timeout = if app.viewport.is_animating() || pending.is_some() {
            ANIMATION_POLL
        } else {
            IDLE_POLL
        };

        if !event::poll(timeout)? {
            app.tick();
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if handle_key(&mut app, key) {
                    return Ok(());
                }
            }
            Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
            Event::Resize(width, height) => app.on_resize(width, height),
            _ => {}
        }
    }
}

/// Apply one key press. Returns true when the app should quit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    // Handle help mode scrolling
    if app.show_help {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => app.toggle_help(),
            KeyCode::Char('j') | KeyCode::Down => app.scroll_help_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_help_up(),
            KeyCode::Char('q') => return true,
            _ => {}
        }
        return false;
    }

    match app.focus {
        app::Focus::Search => match key.code {
            KeyCode::Esc => app.search_escape(),
            KeyCode::Enter => {
                if app.results_visible() {
                    app.activate_selected_result();
                }
            }
            KeyCode::Down | KeyCode::Tab => app.select_next_result(),
            KeyCode::Up | KeyCode::BackTab => app.select_previous_result(),
            KeyCode::Backspace => app.search_backspace(),
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.clear_search()
            }
            KeyCode::Char(c) => app.search_input(c),
            _ => {}
        },
        app::Focus::Document => match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('?') => app.toggle_help(),
            KeyCode::Char('/') | KeyCode::Char('i') => app.focus_search(),
            KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
            KeyCode::Char('d') | KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_page_down(),
            KeyCode::Char('u') | KeyCode::PageUp => app.scroll_page_up(),
            KeyCode::Char('g') | KeyCode::Home => app.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => app.scroll_to_bottom(),
            KeyCode::Enter => {
                if app.results_visible() {
                    app.activate_selected_result();
                }
            }
            KeyCode::Esc => app.clear_search(),
            _ => {}
        },
    }
    false
}

pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) if app.show_help => {}
        MouseEventKind::Down(MouseButton::Left) => app.click(mouse.column, mouse.row),
        MouseEventKind::ScrollDown if app.show_help => app.scroll_help_down(),
        MouseEventKind::ScrollUp if app.show_help => app.scroll_help_up(),
        MouseEventKind::ScrollDown => app.viewport.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => app.viewport.scroll_by(-WHEEL_ROWS),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::glossary::Glossary;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ready_app() -> App {
        let mut config = Config::default();
        config.scroll.smooth = false;
        let mut app = App::new("terminology.md".to_string(), &config);
        app.on_resize(80, 12);
        let text = (1..=12)
            .map(|i| format!("### Term {i}\nSome text about term {i}."))
            .collect::<Vec<_>>()
            .join("\n");
        app.finish_load(Ok(Glossary::from_markdown(&text)));
        app.ensure_layout(79, 11);
        app
    }

    #[test]
    fn test_quit_keys() {
        let mut app = ready_app();
        assert!(handle_key(&mut app, press(KeyCode::Char('q'))));
        assert!(handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)
        ));
    }

    #[test]
    fn test_q_is_typed_while_searching() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        assert_eq!(app.focus, Focus::Search);
        assert!(!handle_key(&mut app, press(KeyCode::Char('q'))));
        assert_eq!(app.query.as_str(), "q");
    }

    #[test]
    fn test_search_and_jump_flow() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('i')));
        for c in "term 1".chars() {
            handle_key(&mut app, press(KeyCode::Char(c)));
        }
        // Term 1, Term 10, Term 11, Term 12
        assert_eq!(app.results.len(), 4);

        handle_key(&mut app, press(KeyCode::Down));
        assert_eq!(app.selected_result, 1);
        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.status_message.as_deref(), Some("→ Term 10"));
        assert!(app.viewport.position() > 0);
    }

    #[test]
    fn test_escape_twice_leaves_search() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('/')));
        handle_key(&mut app, press(KeyCode::Char('x')));
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Search);
        handle_key(&mut app, press(KeyCode::Esc));
        assert_eq!(app.focus, Focus::Document);
    }

    #[test]
    fn test_document_scroll_keys() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.viewport.position(), 1);
        handle_key(&mut app, press(KeyCode::Char('G')));
        assert_eq!(app.viewport.position(), app.viewport.max_position());
        handle_key(&mut app, press(KeyCode::Char('g')));
        assert_eq!(app.viewport.position(), 0);
    }

    #[test]
    fn test_help_captures_keys() {
        let mut app = ready_app();
        handle_key(&mut app, press(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key(&mut app, press(KeyCode::Char('j')));
        assert_eq!(app.help_scroll, 1);
        assert_eq!(app.viewport.position(), 0);
        handle_key(&mut app, press(KeyCode::Esc));
        assert!(!app.show_help);
    }

    #[test]
    fn test_wheel_scrolls_document() {
        let mut app = ready_app();
        handle_mouse(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: 10,
                row: 8,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.viewport.position(), 3);
    }

    #[test]
    fn test_click_ignored_under_help() {
        let mut app = ready_app();
        app.set_query("term 1");
        assert!(app.results_visible());
        app.results_area = ratatui::layout::Rect::new(0, 5, 40, 6);

        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 4,
            row: 6,
            modifiers: KeyModifiers::NONE,
        };
        app.toggle_help();
        handle_mouse(&mut app, click);
        assert!(app.show_help);
        assert!(app.status_message.is_none());

        app.toggle_help();
        handle_mouse(&mut app, click);
        assert_eq!(app.status_message.as_deref(), Some("→ Term 1"));
    }
}
