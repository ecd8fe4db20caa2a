//! Markdown parsing for terminology documents.
//!
//! Only a small, line-oriented subset of markdown is recognized:
//! `#`/`##`/`###` headings, `- ` list items, `---` rules and `**bold**`
//! inline spans. Everything else is kept as literal paragraph text, so
//! parsing never fails.

mod block;
pub mod inline;
pub mod output;

pub use block::{Block, BlockKind};
pub use inline::{InlineSegment, plain_text, render_inline};
pub use output::{DocumentMetadata, DocumentOutput};

/// Parse markdown text into an ordered sequence of blocks.
///
/// Lines are trimmed before classification. Consecutive `- ` lines collapse
/// into a single [`Block::List`]; any other line (including a blank one)
/// ends the pending list.
///
/// # Examples
///
/// ```
/// use glossview::parser::{Block, parse_blocks};
///
/// let blocks = parse_blocks("### Alpha\n- one\n- two");
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[1], Block::List { items: vec!["one".into(), "two".into()] });
/// ```
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut pending: Option<Vec<String>> = None;

    for raw in lines(text) {
        let line = raw.trim();

        if line.is_empty() {
            flush_list(&mut pending, &mut blocks);
        } else if line == "---" {
            flush_list(&mut pending, &mut blocks);
            blocks.push(Block::Rule);
        } else if let Some(rest) = line.strip_prefix("### ") {
            flush_list(&mut pending, &mut blocks);
            blocks.push(Block::Heading3 {
                text: rest.to_string(),
            });
        } else if let Some(rest) = line.strip_prefix("## ") {
            flush_list(&mut pending, &mut blocks);
            blocks.push(Block::Heading2 {
                text: rest.to_string(),
            });
        } else if let Some(rest) = line.strip_prefix("# ") {
            flush_list(&mut pending, &mut blocks);
            blocks.push(Block::Heading1 {
                text: rest.to_string(),
            });
        } else if let Some(rest) = line.strip_prefix("- ") {
            pending.get_or_insert_with(Vec::new).push(rest.to_string());
        } else {
            flush_list(&mut pending, &mut blocks);
            blocks.push(Block::Paragraph {
                text: line.to_string(),
            });
        }
    }

    flush_list(&mut pending, &mut blocks);
    blocks
}

/// Split text on `\r\n`, `\n` or a lone `\r`.
fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split("\r\n").flat_map(|chunk| chunk.split(['\n', '\r']))
}

fn flush_list(pending: &mut Option<Vec<String>>, blocks: &mut Vec<Block>) {
    if let Some(items) = pending.take() {
        blocks.push(Block::List { items });
    }
}
