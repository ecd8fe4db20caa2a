//! Terminology entries derived from a parsed document.
//!
//! A [`Glossary`] is built once per successful load and never mutated; a new
//! document means a new glossary.

mod entry;
pub mod search;

pub use entry::{ENTRY_ID_PREFIX, Entry, build_entries, entry_id};
pub use search::{SearchQuery, filter_entries, filter_indices, normalize_query};

use crate::parser::{Block, parse_blocks};

/// Parsed blocks together with the entries grouped from them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Glossary {
    /// Every block of the document, rendered as-is by the page
    pub blocks: Vec<Block>,
    /// Searchable entries, one per level-3 heading
    pub entries: Vec<Entry>,
}

impl Glossary {
    pub fn from_markdown(text: &str) -> Self {
        let blocks = parse_blocks(text);
        let entries = build_entries(&blocks);
        tracing::debug!(
            blocks = blocks.len(),
            entries = entries.len(),
            "parsed terminology document"
        );
        Self { blocks, entries }
    }

    /// Look up an entry by id.
    pub fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Look up an entry by id, falling back to a case-insensitive exact
    /// title match.
    pub fn find_entry(&self, id_or_title: &str) -> Option<&Entry> {
        self.entry(id_or_title).or_else(|| {
            let wanted = normalize_query(id_or_title);
            self.entries
                .iter()
                .find(|e| e.title.trim().to_lowercase() == wanted)
        })
    }

    /// Entries whose title contains `query`, see [`filter_entries`].
    pub fn filter(&self, query: &str) -> Vec<&Entry> {
        filter_entries(&self.entries, query)
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "# Glossary\nSome intro.\n\n### Alpha\n- one\n- two\n\n## Letters\n### Beta\ntext";

    #[test]
    fn test_from_markdown_keeps_all_blocks() {
        let glossary = Glossary::from_markdown(DOC);
        assert_eq!(glossary.blocks.len(), 7);
        assert_eq!(glossary.entries.len(), 2);
        assert!(!glossary.is_empty());
    }

    #[test]
    fn test_lookup_by_id_and_title() {
        let glossary = Glossary::from_markdown(DOC);

        assert_eq!(glossary.entry("term-2").map(|e| e.title.as_str()), Some("Beta"));
        assert!(glossary.entry("term-3").is_none());

        assert_eq!(
            glossary.find_entry("  alpha ").map(|e| e.id.as_str()),
            Some("term-1")
        );
        assert_eq!(
            glossary.find_entry("term-2").map(|e| e.title.as_str()),
            Some("Beta")
        );
        assert!(glossary.find_entry("alp").is_none());
    }

    #[test]
    fn test_filter_delegates_to_search() {
        let glossary = Glossary::from_markdown(DOC);
        assert_eq!(glossary.filter("").len(), 2);
        assert_eq!(glossary.filter("BETA")[0].id, "term-2");
        assert!(glossary.filter("zzz").is_empty());
    }

    #[test]
    fn test_empty_document() {
        let glossary = Glossary::from_markdown("");
        assert!(glossary.is_empty());
        assert!(glossary.entries.is_empty());
    }
}
