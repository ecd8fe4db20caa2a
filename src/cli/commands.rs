use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "glossview")]
#[command(version)]
#[command(about = "A terminology page viewer with instant title search")]
#[command(
    long_about = "glossview - Browse a terminology document as a searchable glossary.\n\n\
    Launch without flags for the interactive page: a sticky search box filters\n\
    term titles as you type, and picking a result scrolls its entry into view\n\
    just below the header. Use flags for CLI mode to list, filter and extract\n\
    entries.\n\n\
    Examples:\n  \
    glossview                              # Open ./terminology.md\n  \
    glossview docs/                        # Open docs/terminology.md\n  \
    glossview https://example.com/         # Fetch <url>/terminology.md\n  \
    glossview -l --filter cache            # List matching entries\n  \
    glossview -e \"Cache line\"              # Print one entry\n  \
    glossview -l -o json                   # Entries as JSON"
)]
pub struct Cli {
    /// Terminology document: a file, a directory, or an http(s) URL
    ///
    /// A directory or a URL ending in '/' resolves to its terminology.md.
    /// Defaults to the [document] source from the config file.
    pub source: Option<String>,

    /// List all entries as `id  title` (non-interactive)
    ///
    /// Combine with --filter to narrow results.
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Filter entries by title (case-insensitive substring)
    ///
    /// Works with --list and with JSON output.
    ///
    /// Example: --filter "cache" matches "Cache line" and "L2 cache"
    #[arg(long = "filter", value_name = "QUERY")]
    pub filter: Option<String>,

    /// Print one entry's body by id or title
    ///
    /// Accepts an entry id (e.g. term-3) or a title (case-insensitive).
    /// Exits with status 1 if no entry matches.
    #[arg(short = 'e', long = "entry", value_name = "ID|TITLE")]
    pub entry: Option<String>,

    /// Count blocks by kind and entries (shows statistics)
    #[arg(long = "count")]
    pub count: bool,

    /// Output format for --list, --entry and --count
    ///
    ///   plain - Human-readable text (default)
    ///   json  - Document metadata, blocks and entries as JSON
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Load configuration from this file instead of the default location
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write a config file with the current settings and exit
    ///
    /// Writes to --config if given, otherwise to the platform config dir.
    #[arg(long = "init-config")]
    pub init_config: bool,

    /// Append logs to this file while the TUI runs
    ///
    /// Overrides [log] file from the config. CLI mode always logs to stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log debug detail
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

impl Cli {
    /// Whether any non-interactive mode was requested.
    pub fn is_cli_mode(&self) -> bool {
        self.list
            || self.count
            || self.entry.is_some()
            || self.filter.is_some()
            || self.output == OutputFormat::Json
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_flags_is_tui() {
        let cli = Cli::parse_from(["glossview", "docs/"]);
        assert_eq!(cli.source.as_deref(), Some("docs/"));
        assert!(!cli.is_cli_mode());
    }

    #[test]
    fn test_list_with_filter() {
        let cli = Cli::parse_from(["glossview", "-l", "--filter", "cache"]);
        assert!(cli.list);
        assert_eq!(cli.filter.as_deref(), Some("cache"));
        assert!(cli.is_cli_mode());
    }

    #[test]
    fn test_json_output_is_cli_mode() {
        let cli = Cli::parse_from(["glossview", "-o", "json"]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(cli.is_cli_mode());
    }

    #[test]
    fn test_count_accepts_json_output() {
        let cli = Cli::parse_from(["glossview", "--count", "-o", "json"]);
        assert!(cli.count);
        assert_eq!(cli.output, OutputFormat::Json);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        assert!(Cli::try_parse_from(["glossview", "-v", "-q"]).is_err());
    }
}
