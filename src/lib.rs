//! # glossview
//!
//! A terminology page library: parse a small markdown subset into blocks,
//! group the blocks into glossary entries, filter entries by title, and
//! compute where to scroll so a jumped-to entry clears a sticky header.
//!
//! ## Features
//!
//! - Line-based block parser (headings 1-3, bullet lists, rules, paragraphs)
//! - Inline `**bold**` segmentation
//! - Entries keyed `term-N` in document order
//! - Case-insensitive title search
//! - Sticky-header scroll arithmetic with smooth scrolling
//! - Background document loading from a file or http(s) URL
//! - Interactive TUI page
//!
//! ## Example
//!
//! ```rust
//! use glossview::{AnchorMap, Glossary, ScrollController, ScrollOffsets};
//!
//! let markdown = "# Terms\n### Cache line\nUnit of transfer.\n### Page\nUnit of paging.";
//! let glossary = Glossary::from_markdown(markdown);
//! assert_eq!(glossary.entries.len(), 2);
//!
//! let matches = glossary.filter("CACHE");
//! assert_eq!(matches[0].id, "term-1");
//!
//! // Headings were laid out at these positions by some renderer.
//! let mut anchors = AnchorMap::new();
//! anchors.insert("term-1", 400);
//! anchors.insert("term-2", 900);
//!
//! let mut scroll = ScrollController::new(ScrollOffsets::default(), true);
//! scroll.recompute(Some(48));
//! let request = scroll.jump_target(&anchors, "term-2").unwrap();
//! assert_eq!(request.target, 900 - (140 + 48 + 12));
//! assert!(scroll.jump_target(&anchors, "term-9").is_none());
//! ```

/// Configuration module for persisting user preferences.
///
/// Provides the TOML config file with document, scroll, search, theme and
/// log settings.
pub mod config;

/// Error types for loading documents and configuration.
pub mod error;

/// Glossary entries and title search.
pub mod glossary;

/// Document loading from files and URLs.
pub mod loader;

/// Logging setup for CLI and TUI modes.
pub mod logging;

/// Parser module for the terminology markdown subset.
///
/// Provides the block parser, the inline bold renderer and JSON output types.
pub mod parser;

/// Sticky-header scroll offsets and the scrolled viewport.
pub mod scroll;

/// TUI module for the interactive terminology page.
pub mod tui;

pub use config::Config;
pub use error::{ConfigError, LOAD_ERROR_MESSAGE, LoadError};
pub use glossary::{Entry, Glossary, SearchQuery, build_entries, entry_id, filter_entries};
pub use loader::{DocumentSource, PendingLoad, load_glossary, spawn_load};
pub use parser::{Block, InlineSegment, parse_blocks, plain_text, render_inline};
pub use scroll::{AnchorLocator, AnchorMap, ScrollController, ScrollOffsets, ScrollRequest, Viewport};
pub use tui::App;
