//! Grouping of blocks into terminology entries.

use crate::parser::Block;
use serde::{Deserialize, Serialize};

/// Prefix of every entry id.
pub const ENTRY_ID_PREFIX: &str = "term-";

/// One terminology term: a level-3 heading and the blocks under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// `term-1`, `term-2`, … in order of appearance
    pub id: String,
    /// Text of the originating level-3 heading
    pub title: String,
    /// Body blocks, not including the heading itself
    pub blocks: Vec<Block>,
}

/// Id of the `ordinal`-th entry (1-based).
///
/// The renderer uses the same function to tag the N-th level-3 heading it
/// draws, so jump targets always line up with entries.
pub fn entry_id(ordinal: usize) -> String {
    format!("{ENTRY_ID_PREFIX}{ordinal}")
}

/// Group a block sequence into entries keyed by level-3 headings.
///
/// Level-1 and level-2 headings close the open entry without joining it.
/// Blocks before the first level-3 heading (or after a level-1/2 heading
/// that closed an entry) belong to no entry.
pub fn build_entries(blocks: &[Block]) -> Vec<Entry> {
    let mut entries: Vec<Entry> = Vec::new();
    let mut current: Option<Entry> = None;

    for block in blocks {
        match block {
            Block::Heading3 { text } => {
                if let Some(entry) = current.take() {
                    entries.push(entry);
                }
                current = Some(Entry {
                    id: entry_id(entries.len() + 1),
                    title: text.clone(),
                    blocks: Vec::new(),
                });
            }
            Block::Heading1 { .. } | Block::Heading2 { .. } => {
                if let Some(entry) = current.take() {
                    entries.push(entry);
                }
            }
            other => {
                if let Some(entry) = current.as_mut() {
                    entry.blocks.push(other.clone());
                }
            }
        }
    }

    if let Some(entry) = current {
        entries.push(entry);
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_blocks;

    #[test]
    fn test_build_two_entries() {
        let blocks = parse_blocks("### Alpha\n- one\n- two\n### Beta\ntext");
        let entries = build_entries(&blocks);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "term-1");
        assert_eq!(entries[0].title, "Alpha");
        assert_eq!(
            entries[0].blocks,
            vec![Block::List {
                items: vec!["one".to_string(), "two".to_string()]
            }]
        );
        assert_eq!(entries[1].id, "term-2");
        assert_eq!(entries[1].title, "Beta");
        assert_eq!(
            entries[1].blocks,
            vec![Block::Paragraph {
                text: "text".to_string()
            }]
        );
    }

    #[test]
    fn test_upper_headings_seal_without_joining() {
        let blocks = parse_blocks("### Alpha\nbody\n## Section\nloose\n# Title\n### Beta\nmore");
        let entries = build_entries(&blocks);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].id, "term-1");
        assert_eq!(
            entries[0].blocks,
            vec![Block::Paragraph {
                text: "body".to_string()
            }]
        );
        // "loose" sits under a level-2 heading and belongs to no entry
        assert_eq!(entries[1].id, "term-2");
        assert_eq!(entries[1].title, "Beta");
        assert_eq!(entries[1].blocks.len(), 1);
    }

    #[test]
    fn test_preamble_is_not_indexed() {
        let blocks = parse_blocks("# Glossary\nIntro text\n- a\n---\n### Only\nbody");
        let entries = build_entries(&blocks);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Only");
        assert_eq!(entries[0].blocks.len(), 1);
    }

    #[test]
    fn test_entry_without_body() {
        let entries = build_entries(&parse_blocks("### Empty\n### Next"));
        assert_eq!(entries.len(), 2);
        assert!(entries[0].blocks.is_empty());
        assert!(entries[1].blocks.is_empty());
    }

    #[test]
    fn test_ids_are_sequential_and_unique() {
        let text = (1..=12)
            .map(|i| format!("### Term {i}\nbody {i}\n## Break"))
            .collect::<Vec<_>>()
            .join("\n");
        let entries = build_entries(&parse_blocks(&text));

        assert_eq!(entries.len(), 12);
        for (idx, entry) in entries.iter().enumerate() {
            assert_eq!(entry.id, entry_id(idx + 1));
            assert_eq!(entry.title, format!("Term {}", idx + 1));
        }
    }

    #[test]
    fn test_no_headings_no_entries() {
        assert!(build_entries(&parse_blocks("just text\n- list")).is_empty());
        assert!(build_entries(&[]).is_empty());
    }

    #[test]
    fn test_rule_stays_in_entry_body() {
        let entries = build_entries(&parse_blocks("### A\n---\nafter"));
        assert_eq!(entries[0].blocks.len(), 2);
        assert_eq!(entries[0].blocks[0], Block::Rule);
    }
}
