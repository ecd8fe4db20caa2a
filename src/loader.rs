//! Loading the terminology document from disk or over HTTP.
//!
//! The document is loaded exactly once per run, on a background thread, and
//! the result is handed back to the UI thread through a channel.

use crate::error::LoadError;
use crate::glossary::Glossary;
use reqwest::Url;
use std::fmt;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

/// File name of the terminology document.
pub const DOCUMENT_NAME: &str = "terminology.md";

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the terminology document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    File(PathBuf),
    Url(Url),
}

impl DocumentSource {
    /// Interpret a path or http(s) URL.
    ///
    /// A directory resolves to `<dir>/terminology.md`; a URL whose path ends
    /// in `/` resolves to `<url>/terminology.md`.
    pub fn parse(spec: &str) -> Result<Self, LoadError> {
        let spec = spec.trim();
        if spec.is_empty() {
            return Err(LoadError::InvalidSource(spec.to_string()));
        }

        if spec.starts_with("http://") || spec.starts_with("https://") {
            let url = Url::parse(spec).map_err(|_| LoadError::InvalidSource(spec.to_string()))?;
            let url = if url.path().ends_with('/') {
                url.join(DOCUMENT_NAME)
                    .map_err(|_| LoadError::InvalidSource(spec.to_string()))?
            } else {
                url
            };
            return Ok(DocumentSource::Url(url));
        }

        let path = PathBuf::from(spec);
        if path.is_dir() {
            Ok(DocumentSource::File(path.join(DOCUMENT_NAME)))
        } else {
            Ok(DocumentSource::File(path))
        }
    }

    /// Short name for title bars: the file name, or the URL as given.
    pub fn display_name(&self) -> String {
        match self {
            DocumentSource::File(path) => path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or(DOCUMENT_NAME)
                .to_string(),
            DocumentSource::Url(url) => url.to_string(),
        }
    }

    /// Read the document text. Blocks until done.
    pub fn load(&self, timeout: Duration) -> Result<String, LoadError> {
        tracing::info!(source = %self, "loading terminology document");
        let result = match self {
            DocumentSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| LoadError::Io {
                    path: path.clone(),
                    source,
                })
            }
            DocumentSource::Url(url) => fetch(url, timeout),
        };

        match &result {
            Ok(text) => tracing::info!(bytes = text.len(), "document loaded"),
            Err(e) => tracing::warn!(error = %e, "document load failed"),
        }
        result
    }
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::File(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => write!(f, "{url}"),
        }
    }
}

fn fetch(url: &Url, timeout: Duration) -> Result<String, LoadError> {
    let network = |source| LoadError::Network {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("glossview/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(network)?;

    let response = client.get(url.clone()).send().map_err(network)?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status {
            url: url.to_string(),
            status,
        });
    }

    response.text().map_err(network)
}

/// Parse loaded text into a glossary.
pub fn load_glossary(source: &DocumentSource, timeout: Duration) -> Result<Glossary, LoadError> {
    source.load(timeout).map(|text| Glossary::from_markdown(&text))
}

/// A load running on a background thread.
pub struct PendingLoad {
    receiver: Receiver<Result<Glossary, LoadError>>,
}

impl PendingLoad {
    /// A load that has already settled, e.g. because the source was invalid.
    pub fn settled(result: Result<Glossary, LoadError>) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// The result, if the load has settled. Returns `Some` at most once
    /// with a real result; after that the channel is closed and the load
    /// reports [`LoadError::Interrupted`].
    pub fn try_finish(&self) -> Option<Result<Glossary, LoadError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::Interrupted)),
        }
    }

    /// Block until the load settles.
    pub fn wait(self) -> Result<Glossary, LoadError> {
        self.receiver.recv().unwrap_or(Err(LoadError::Interrupted))
    }
}

/// Start loading and parsing `source` on a background thread.
pub fn spawn_load(source: DocumentSource, timeout: Duration) -> PendingLoad {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(load_glossary(&source, timeout));
    });
    PendingLoad { receiver: rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_settled_load_finishes_immediately() {
        let pending = PendingLoad::settled(Err(LoadError::InvalidSource(String::new())));
        assert!(matches!(
            pending.try_finish(),
            Some(Err(LoadError::InvalidSource(_)))
        ));
    }

    #[test]
    fn test_parse_file_source() {
        let source = DocumentSource::parse("docs/glossary.md").unwrap();
        assert_eq!(source, DocumentSource::File(PathBuf::from("docs/glossary.md")));
        assert_eq!(source.display_name(), "glossary.md");
    }

    #[test]
    fn test_parse_directory_resolves_document_name() {
        let dir = tempfile::tempdir().unwrap();
        let source = DocumentSource::parse(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(source, DocumentSource::File(dir.path().join(DOCUMENT_NAME)));
    }

    #[test]
    fn test_parse_url_sources() {
        let source = DocumentSource::parse("https://example.com").unwrap();
        assert_eq!(source.to_string(), "https://example.com/terminology.md");

        let source = DocumentSource::parse("https://example.com/docs/").unwrap();
        assert_eq!(source.to_string(), "https://example.com/docs/terminology.md");

        let source = DocumentSource::parse("http://example.com/glossary.md").unwrap();
        assert_eq!(source.to_string(), "http://example.com/glossary.md");
    }

    #[test]
    fn test_parse_rejects_empty_and_bad_urls() {
        assert!(matches!(
            DocumentSource::parse("   "),
            Err(LoadError::InvalidSource(_))
        ));
        assert!(matches!(
            DocumentSource::parse("http://"),
            Err(LoadError::InvalidSource(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(DOCUMENT_NAME), "### Alpha\ntext").unwrap();

        let source = DocumentSource::parse(dir.path().to_str().unwrap()).unwrap();
        let glossary = load_glossary(&source, DEFAULT_TIMEOUT).unwrap();
        assert_eq!(glossary.entries.len(), 1);
        assert_eq!(glossary.entries[0].title, "Alpha");
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DocumentSource::File(dir.path().join("missing.md"));
        let err = source.load(DEFAULT_TIMEOUT).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_fetch_over_http() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/terminology.md")
            .with_status(200)
            .with_header("content-type", "text/markdown")
            .with_body("# Terms\n### Alpha\n- one\n### Beta\ntext")
            .create();

        let source = DocumentSource::parse(&server.url()).unwrap();
        let glossary = load_glossary(&source, DEFAULT_TIMEOUT).unwrap();

        mock.assert();
        assert_eq!(glossary.entries.len(), 2);
        assert_eq!(glossary.entries[1].id, "term-2");
    }

    #[test]
    fn test_fetch_non_success_status_is_load_error() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/terminology.md")
            .with_status(404)
            .create();

        let source = DocumentSource::parse(&server.url()).unwrap();
        let err = source.load(DEFAULT_TIMEOUT).unwrap_err();
        match err {
            LoadError::Status { status, .. } => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[test]
    fn test_spawn_load_reports_through_channel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DOCUMENT_NAME);
        fs::write(&path, "### Only\nbody").unwrap();

        let pending = spawn_load(DocumentSource::File(path), DEFAULT_TIMEOUT);
        let glossary = pending.wait().unwrap();
        assert_eq!(glossary.entries[0].title, "Only");
    }

    #[test]
    fn test_spawn_load_failure() {
        let dir = tempfile::tempdir().unwrap();
        let pending = spawn_load(
            DocumentSource::File(dir.path().join("nope.md")),
            DEFAULT_TIMEOUT,
        );
        let err = pending.wait().unwrap_err();
        assert_eq!(err.user_message(), crate::error::LOAD_ERROR_MESSAGE);
    }
}
