//! JSON output types for the parsed terminology document.

use super::block::{Block, BlockKind};
use crate::glossary::{Entry, Glossary};
use serde::Serialize;

/// Root document structure with metadata, raw blocks and entries
#[derive(Debug, Clone, Serialize)]
pub struct DocumentOutput<'a> {
    pub metadata: DocumentMetadata,
    pub blocks: &'a [Block],
    pub entries: Vec<&'a Entry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub source: Option<String>,
    #[serde(rename = "blockCount")]
    pub block_count: usize,
    #[serde(rename = "entryCount")]
    pub entry_count: usize,
    /// Entries after filtering, equal to `entryCount` without a query
    #[serde(rename = "matchCount")]
    pub match_count: usize,
    pub query: Option<String>,
}

impl<'a> DocumentOutput<'a> {
    /// Build the output for a glossary, optionally restricted to entries
    /// whose titles match `query`.
    pub fn new(glossary: &'a Glossary, source: Option<String>, query: Option<&str>) -> Self {
        let entries = match query {
            Some(q) => glossary.filter(q),
            None => glossary.entries.iter().collect(),
        };

        Self {
            metadata: DocumentMetadata {
                source,
                block_count: glossary.blocks.len(),
                entry_count: glossary.entries.len(),
                match_count: entries.len(),
                query: query.map(str::to_string),
            },
            blocks: &glossary.blocks,
            entries,
        }
    }
}

/// Block and entry statistics, as printed by `--count`
#[derive(Debug, Clone, Serialize)]
pub struct CountsOutput {
    pub blocks: Vec<KindCount>,
    #[serde(rename = "entryCount")]
    pub entry_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct KindCount {
    pub kind: &'static str,
    pub count: usize,
}

impl CountsOutput {
    pub fn new(glossary: &Glossary) -> Self {
        Self {
            blocks: block_counts(&glossary.blocks)
                .into_iter()
                .map(|(kind, count)| KindCount {
                    kind: kind.label(),
                    count,
                })
                .collect(),
            entry_count: glossary.entries.len(),
        }
    }
}

/// Count blocks by kind, in [`BlockKind::ALL`] order, skipping absent kinds.
pub fn block_counts(blocks: &[Block]) -> Vec<(BlockKind, usize)> {
    BlockKind::ALL
        .iter()
        .map(|kind| (*kind, blocks.iter().filter(|b| b.kind() == *kind).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}
