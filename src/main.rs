//! # glossview
//!
//! A terminology page viewer: a markdown glossary with a sticky search box
//! that jumps to entries by title.
//!
//! ## Usage
//!
//! Launch the interactive page:
//! ```sh
//! glossview docs/terminology.md
//! ```
//!
//! List entries:
//! ```sh
//! glossview -l docs/
//! ```
//!
//! Print one entry:
//! ```sh
//! glossview -e "Cache line" https://example.com/docs/
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use glossview::logging::{self, Verbosity};
use glossview::parser::DocumentOutput;
use glossview::parser::output::{CountsOutput, block_counts};
use glossview::{
    App, Block, Config, ConfigError, DocumentSource, Entry, Glossary, PendingLoad, load_glossary,
    plain_text, spawn_load,
};
use std::path::PathBuf;
use std::process;

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();
    let verbosity = Verbosity::from_flags(args.verbose, args.quiet);

    if args.is_cli_mode() || args.init_config {
        // Only fails if a subscriber is already installed.
        let _ = logging::init_stderr(verbosity);
    }

    let (config, config_error) = load_config(&args)?;
    if args.is_cli_mode() || args.init_config {
        if let Some(ref e) = config_error {
            tracing::warn!(error = %e, "ignoring config file");
        }
    }

    if args.init_config {
        let path = write_config(&config, args.config.clone())?;
        println!("Wrote {}", path.display());
        return Ok(());
    }

    let source_spec = args
        .source
        .clone()
        .unwrap_or_else(|| config.document.source.clone());

    if args.is_cli_mode() {
        return handle_cli_mode(&args, &config, &source_spec);
    }

    let log_file = args.log_file.clone().or_else(|| config.log.file.clone());
    logging::init_tui(verbosity, log_file.as_deref())
        .wrap_err("Failed to open log file")?;
    if let Some(ref e) = config_error {
        tracing::warn!(error = %e, "ignoring config file");
    }

    // Start loading before the terminal switches screens.
    let (source_name, pending) = match DocumentSource::parse(&source_spec) {
        Ok(source) => {
            tracing::info!(%source, "loading terminology");
            (source.display_name(), spawn_load(source, config.timeout()))
        }
        Err(e) => (source_spec.clone(), PendingLoad::settled(Err(e))),
    };

    use crossterm::ExecutableCommand;
    use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
    use crossterm::terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
    };
    use std::io::stdout;

    // Manually initialize to get better error messages
    enable_raw_mode().inspect_err(|e| {
        eprintln!("Failed to enable raw mode: {}", e);
    })?;

    stdout()
        .execute(EnterAlternateScreen)
        .and_then(|out| out.execute(EnableMouseCapture))
        .inspect_err(|_| {
            disable_raw_mode().ok();
        })?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = ratatui::Terminal::new(backend).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let mut app = App::new(source_name, &config);
    if let Some(e) = config_error {
        app.set_status_message(format!("Using default config: {e}"));
    }
    let result = glossview::tui::run(&mut terminal, app, pending);

    // Cleanup terminal state
    stdout().execute(DisableMouseCapture).ok();
    stdout().execute(LeaveAlternateScreen).ok();
    disable_raw_mode().ok();

    result
}

/// Config from `--config`, or the default location.
///
/// With `--init-config`, a `--config` path that does not exist yet starts
/// from defaults. A broken default config is not fatal; its error comes back
/// for reporting.
fn load_config(args: &Cli) -> Result<(Config, Option<ConfigError>)> {
    match &args.config {
        Some(path) if args.init_config && !path.exists() => Ok((Config::default(), None)),
        Some(path) => Ok((Config::load_from(path)?, None)),
        None => Ok(Config::load()),
    }
}

fn write_config(config: &Config, path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => {
            config.save_to(&path)?;
            Ok(path)
        }
        None => {
            config.save()?;
            Ok(Config::config_path().unwrap_or_default())
        }
    }
}

fn handle_cli_mode(args: &Cli, config: &Config, source_spec: &str) -> Result<()> {
    let source = DocumentSource::parse(source_spec).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let glossary = load_glossary(&source, config.timeout()).unwrap_or_else(|e| {
        tracing::error!(error = %e, "load failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    if args.count {
        print_counts(&glossary, args.output)?;
    } else if let Some(ref name) = args.entry {
        print_entry(&glossary, name, args.output)?;
    } else {
        print_entries(&glossary, &source, args.filter.as_deref(), args.output)?;
    }
    Ok(())
}

fn print_entries(
    glossary: &Glossary,
    source: &DocumentSource,
    filter: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            let entries = match filter {
                Some(query) => glossary.filter(query),
                None => glossary.entries.iter().collect(),
            };
            for entry in entries {
                println!("{}  {}", entry.id, plain_text(&entry.title));
            }
        }
        OutputFormat::Json => {
            let output = DocumentOutput::new(glossary, Some(source.to_string()), filter);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn print_entry(glossary: &Glossary, name: &str, format: OutputFormat) -> Result<()> {
    let Some(entry) = glossary.find_entry(name) else {
        eprintln!("Entry '{}' not found", name);
        process::exit(1);
    };

    match format {
        OutputFormat::Plain => {
            println!("{}", plain_text(&entry.title));
            println!();
            print!("{}", render_plain(entry));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(entry)?),
    }
    Ok(())
}

fn render_plain(entry: &Entry) -> String {
    let mut out = String::new();
    for block in &entry.blocks {
        match block {
            Block::Heading1 { text }
            | Block::Heading2 { text }
            | Block::Heading3 { text }
            | Block::Paragraph { text } => {
                out.push_str(&plain_text(text));
                out.push('\n');
            }
            Block::List { items } => {
                for item in items {
                    out.push_str("  • ");
                    out.push_str(&plain_text(item));
                    out.push('\n');
                }
            }
            Block::Rule => out.push_str("---\n"),
        }
        out.push('\n');
    }
    out
}

fn print_counts(glossary: &Glossary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Plain => {
            println!("Block counts:");
            for (kind, count) in block_counts(&glossary.blocks) {
                println!("  {:<10} {}", kind.label(), count);
            }
            println!("\nEntries: {}", glossary.entries.len());
        }
        OutputFormat::Json => {
            let output = CountsOutput::new(glossary);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}
