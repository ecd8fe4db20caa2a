//! Block-level document structure.

use serde::{Deserialize, Serialize};

/// A structural block of the terminology document.
///
/// Blocks are produced in source line order and never change after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Block {
    /// `# Title`
    Heading1 { text: String },
    /// `## Section`
    Heading2 { text: String },
    /// `### Term`, the start of a terminology entry
    Heading3 { text: String },
    /// Consecutive `- item` lines
    List { items: Vec<String> },
    /// A line containing exactly `---`
    Rule,
    /// Any other non-empty line
    Paragraph { text: String },
}

/// Discriminant of a [`Block`], handy for counting and matching without data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    List,
    Rule,
    Paragraph,
}

impl BlockKind {
    /// All kinds in display order.
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Heading1,
        BlockKind::Heading2,
        BlockKind::Heading3,
        BlockKind::List,
        BlockKind::Rule,
        BlockKind::Paragraph,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Heading1 => "h1",
            BlockKind::Heading2 => "h2",
            BlockKind::Heading3 => "h3",
            BlockKind::List => "list",
            BlockKind::Rule => "rule",
            BlockKind::Paragraph => "paragraph",
        }
    }
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading1 { .. } => BlockKind::Heading1,
            Block::Heading2 { .. } => BlockKind::Heading2,
            Block::Heading3 { .. } => BlockKind::Heading3,
            Block::List { .. } => BlockKind::List,
            Block::Rule => BlockKind::Rule,
            Block::Paragraph { .. } => BlockKind::Paragraph,
        }
    }

    /// Heading level (1-3) if this block is a heading.
    pub fn heading_level(&self) -> Option<usize> {
        match self {
            Block::Heading1 { .. } => Some(1),
            Block::Heading2 { .. } => Some(2),
            Block::Heading3 { .. } => Some(3),
            _ => None,
        }
    }

    /// Text carried by headings and paragraphs.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading1 { text }
            | Block::Heading2 { text }
            | Block::Heading3 { text }
            | Block::Paragraph { text } => Some(text),
            Block::List { .. } | Block::Rule => None,
        }
    }
}
