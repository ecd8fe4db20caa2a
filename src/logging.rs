//! Logging initialization.
//!
//! CLI mode logs to stderr. The TUI owns the terminal, so while it runs logs
//! go to a file when one is configured and are dropped otherwise.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Verbosity chosen on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    pub fn from_flags(verbose: bool, quiet: bool) -> Self {
        if verbose {
            Verbosity::Verbose
        } else if quiet {
            Verbosity::Quiet
        } else {
            Verbosity::Normal
        }
    }

    pub fn level(self) -> Level {
        match self {
            Verbosity::Quiet => Level::ERROR,
            Verbosity::Normal => Level::WARN,
            Verbosity::Verbose => Level::DEBUG,
        }
    }
}

/// Install a stderr subscriber for non-interactive commands.
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn init_stderr(verbosity: Verbosity) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(verbosity.level())
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}

/// Install a file subscriber for the TUI. Without a file nothing is installed
/// and log events are discarded.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub fn init_tui(verbosity: Verbosity, file: Option<&Path>) -> io::Result<()> {
    let Some(path) = file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    // Quiet still keeps errors; the file is the only place they can go.
    let level = match verbosity {
        Verbosity::Verbose => Level::DEBUG,
        Verbosity::Normal | Verbosity::Quiet => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .finish();
    // A subscriber set earlier (e.g. in tests) wins.
    let _ = tracing::subscriber::set_global_default(subscriber);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_from_flags() {
        assert_eq!(Verbosity::from_flags(true, true), Verbosity::Verbose);
        assert_eq!(Verbosity::from_flags(false, true), Verbosity::Quiet);
        assert_eq!(Verbosity::from_flags(false, false), Verbosity::Normal);
    }

    #[test]
    fn test_levels() {
        assert_eq!(Verbosity::Quiet.level(), Level::ERROR);
        assert_eq!(Verbosity::Normal.level(), Level::WARN);
        assert_eq!(Verbosity::Verbose.level(), Level::DEBUG);
    }

    #[test]
    fn test_tui_without_file_is_noop() {
        assert!(init_tui(Verbosity::Normal, None).is_ok());
    }

    #[test]
    fn test_tui_creates_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("glossview.log");
        init_tui(Verbosity::Verbose, Some(&path)).unwrap();
        assert!(path.exists());
    }
}
