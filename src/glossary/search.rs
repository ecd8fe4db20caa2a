//! Title search over entries.

use super::entry::Entry;

/// Default cap on query length, in characters.
pub const DEFAULT_MAX_QUERY_LEN: usize = 256;

/// Trim and lower-case a raw query.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Entries whose title contains `query`, case-insensitively, in original order.
///
/// An empty (or all-whitespace) query returns every entry. Callers decide
/// whether to display that list; see [`SearchQuery::is_active`].
pub fn filter_entries<'a>(entries: &'a [Entry], query: &str) -> Vec<&'a Entry> {
    filter_indices(entries, query)
        .into_iter()
        .map(|idx| &entries[idx])
        .collect()
}

/// Like [`filter_entries`], but yields positions into `entries`.
pub fn filter_indices(entries: &[Entry], query: &str) -> Vec<usize> {
    let needle = normalize_query(query);
    entries
        .iter()
        .enumerate()
        .filter(|(_, entry)| needle.is_empty() || entry.title.to_lowercase().contains(&needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// The user-controlled search box contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    max_len: usize,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_QUERY_LEN)
    }
}

impl SearchQuery {
    pub fn new(max_len: usize) -> Self {
        Self {
            text: String::new(),
            max_len,
        }
    }

    /// Raw text as typed.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Trimmed, lower-cased query used for matching.
    pub fn normalized(&self) -> String {
        normalize_query(&self.text)
    }

    /// Whether the result list should be shown.
    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Append a character. Returns false if it was rejected (control
    /// character or length cap reached).
    pub fn push(&mut self, c: char) -> bool {
        if self.text.chars().count() >= self.max_len {
            return false;
        }
        if c.is_control() && c != '\t' {
            return false;
        }
        self.text.push(c);
        true
    }

    /// Remove the last character. Returns false if the query was empty.
    pub fn pop(&mut self) -> bool {
        self.text.pop().is_some()
    }

    /// Returns false if the query was already empty.
    pub fn clear(&mut self) -> bool {
        let had_text = !self.text.is_empty();
        self.text.clear();
        had_text
    }

    /// Replace the query, dropping control characters and anything past the cap.
    pub fn set(&mut self, text: &str) {
        self.text = text
            .chars()
            .filter(|c| !c.is_control() || *c == '\t')
            .take(self.max_len)
            .collect();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glossary::build_entries;
    use crate::parser::parse_blocks;

    fn sample() -> Vec<Entry> {
        build_entries(&parse_blocks(
            "### Alpha\n- one\n- two\n### Beta\ntext\n### Alphabet soup\nx",
        ))
    }

    fn titles(entries: &[&Entry]) -> Vec<String> {
        entries.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let entries = sample();
        let all = filter_entries(&entries, "");
        assert_eq!(titles(&all), vec!["Alpha", "Beta", "Alphabet soup"]);
        assert_eq!(filter_entries(&entries, "   ").len(), 3);
    }

    #[test]
    fn test_case_insensitive_substring() {
        let entries = sample();
        assert_eq!(
            titles(&filter_entries(&entries, "ALPHA")),
            vec!["Alpha", "Alphabet soup"]
        );
        assert_eq!(titles(&filter_entries(&entries, "  eTa ")), vec!["Beta"]);
        assert_eq!(titles(&filter_entries(&entries, "bet s")), vec!["Alphabet soup"]);
    }

    #[test]
    fn test_exact_title_only_match() {
        let entries = build_entries(&parse_blocks("### Alpha\n### Beta"));
        assert_eq!(titles(&filter_entries(&entries, "ALPHA")), vec!["Alpha"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        assert!(filter_entries(&sample(), "zzz").is_empty());
    }

    #[test]
    fn test_filter_indices_match_entries() {
        let entries = sample();
        let indices = filter_indices(&entries, "ta");
        let titles: Vec<_> = indices.iter().map(|i| entries[*i].title.as_str()).collect();
        let direct: Vec<_> = filter_entries(&entries, "ta").iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, direct);
    }

    #[test]
    fn test_body_text_is_not_searched() {
        assert!(filter_entries(&sample(), "one").is_empty());
    }

    #[test]
    fn test_query_editing() {
        let mut query = SearchQuery::default();
        assert!(!query.is_active());

        assert!(query.push(' '));
        assert!(!query.is_active());

        query.push('A');
        query.push('b');
        assert!(query.is_active());
        assert_eq!(query.as_str(), " Ab");
        assert_eq!(query.normalized(), "ab");

        assert!(query.pop());
        assert_eq!(query.as_str(), " A");

        assert!(query.clear());
        assert!(!query.clear());
        assert!(!query.pop());
        assert!(query.is_empty());
    }

    #[test]
    fn test_query_rejects_control_and_overflow() {
        let mut query = SearchQuery::new(3);
        assert!(!query.push('\u{7}'));
        assert!(query.push('a'));
        assert!(query.push('b'));
        assert!(query.push('c'));
        assert!(!query.push('d'));
        assert_eq!(query.as_str(), "abc");

        query.set("x\ny\u{1b}zw");
        assert_eq!(query.as_str(), "xyz");
    }
}
