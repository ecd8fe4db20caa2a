//! Error types for document loading and configuration.
//!
//! Parsing, filtering and jumping cannot fail; the only runtime failure a
//! user ever sees is [`LoadError`], and it is shown as one fixed message.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown in place of the document when it could not be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Could not load the terminology document.";

/// Failure to obtain the terminology document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Reading a local file failed.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP request could not be completed.
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("request to {url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The source string is neither a usable path nor an http(s) URL.
    #[error("invalid document source '{0}'")]
    InvalidSource(String),

    /// The background loader went away without reporting a result.
    #[error("document loader stopped before finishing")]
    Interrupted,
}

impl LoadError {
    /// The fixed, user-facing text for any load failure.
    pub fn user_message(&self) -> &'static str {
        LOAD_ERROR_MESSAGE
    }
}

/// Failure to read or write the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to access config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}
