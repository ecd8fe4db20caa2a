//! Inline `**bold**` span detection.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A run of inline text, either plain or bold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum InlineSegment {
    Plain(String),
    Bold(String),
}

impl InlineSegment {
    pub fn text(&self) -> &str {
        match self {
            InlineSegment::Plain(text) | InlineSegment::Bold(text) => text,
        }
    }

    pub fn is_bold(&self) -> bool {
        matches!(self, InlineSegment::Bold(_))
    }
}

/// `**` wrapping one or more non-`*` characters.
fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap())
}

/// Split a line of text into plain and bold segments.
///
/// Bold spans are `**content**` where `content` contains no `*`. Only one
/// level of bold exists, and an unterminated `**` is left as plain text.
/// Empty segments are never produced.
///
/// # Examples
///
/// ```
/// use glossview::parser::{InlineSegment, render_inline};
///
/// assert_eq!(
///     render_inline("plain **bold** more"),
///     vec![
///         InlineSegment::Plain("plain ".into()),
///         InlineSegment::Bold("bold".into()),
///         InlineSegment::Plain(" more".into()),
///     ]
/// );
/// ```
pub fn render_inline(text: &str) -> Vec<InlineSegment> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in bold_pattern().captures_iter(text) {
        let (Some(whole), Some(content)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(InlineSegment::Plain(text[last..whole.start()].to_string()));
        }
        segments.push(InlineSegment::Bold(content.as_str().to_string()));
        last = whole.end();
    }

    if last < text.len() {
        segments.push(InlineSegment::Plain(text[last..].to_string()));
    }

    segments
}

/// The text with bold delimiters removed.
///
/// ```
/// # use glossview::parser::plain_text;
/// assert_eq!(plain_text("a **b** c"), "a b c");
/// assert_eq!(plain_text("open **end"), "open **end");
/// ```
pub fn plain_text(text: &str) -> String {
    render_inline(text)
        .iter()
        .map(InlineSegment::text)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(s: &str) -> InlineSegment {
        InlineSegment::Plain(s.to_string())
    }

    fn bold(s: &str) -> InlineSegment {
        InlineSegment::Bold(s.to_string())
    }

    #[test]
    fn test_plain_bold_plain() {
        assert_eq!(
            render_inline("plain **bold** more"),
            vec![plain("plain "), bold("bold"), plain(" more")]
        );
    }

    #[test]
    fn test_unterminated_bold_is_plain() {
        assert_eq!(
            render_inline("unterminated **bold"),
            vec![plain("unterminated **bold")]
        );
    }

    #[test]
    fn test_empty_text_has_no_segments() {
        assert!(render_inline("").is_empty());
    }

    #[test]
    fn test_bold_only() {
        assert_eq!(render_inline("**Term**"), vec![bold("Term")]);
    }

    #[test]
    fn test_adjacent_bold_runs() {
        assert_eq!(
            render_inline("**a****b** c"),
            vec![bold("a"), bold("b"), plain(" c")]
        );
    }

    #[test]
    fn test_empty_bold_is_plain() {
        assert_eq!(render_inline("x **** y"), vec![plain("x **** y")]);
    }

    #[test]
    fn test_star_inside_delimiters_is_not_bold() {
        assert_eq!(render_inline("**a*b**"), vec![plain("**a*b**")]);
    }

    #[test]
    fn test_multibyte_text_around_bold() {
        assert_eq!(
            render_inline("été **über** naïve"),
            vec![plain("été "), bold("über"), plain(" naïve")]
        );
    }

    #[test]
    fn test_segment_accessors() {
        let seg = bold("x");
        assert!(seg.is_bold());
        assert_eq!(seg.text(), "x");
        assert!(!plain("y").is_bold());
    }

    #[test]
    fn test_serializes_kind_and_text() {
        let json = serde_json::to_value(bold("b")).unwrap();
        assert_eq!(json["kind"], "bold");
        assert_eq!(json["text"], "b");
    }
}
