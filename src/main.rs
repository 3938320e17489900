//! # vaultheads
//!
//! A terminal explorer for a folder of markdown notes, with each file's
//! headings nested under it in the file tree.
//!
//! Launch the interactive TUI:
//! ```sh
//! vaultheads ~/notes
//! ```
//!
//! Print the heading index:
//! ```sh
//! vaultheads --list -o json ~/notes
//! ```

mod cli;

use clap::Parser as ClapParser;
use cli::{Cli, OutputFormat};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use serde::Serialize;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;
use vaultheads::config::PatternSetting;
use vaultheads::headings::{HeadingEntry, HeadingIndex, PatternSet};
use vaultheads::vault::Vault;
use vaultheads::{App, Config, logging, startup};

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    let log_file = args
        .log_file
        .clone()
        .or_else(|| std::env::var_os(logging::FILE_ENV).map(PathBuf::from));
    if let Some(path) = &log_file {
        logging::init(path)
            .wrap_err_with(|| format!("could not open log file {}", path.display()))?;
    }

    let mut config = Config::load();
    apply_overrides(&mut config, &args);

    let root = match &args.dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let vault = startup::with_retry(
        config.headings.startup_retries,
        Duration::from_millis(config.headings.startup_backoff_ms),
        |attempt| {
            log::debug!("opening vault {} (attempt {})", root.display(), attempt);
            Vault::open(&root)
        },
    );

    if args.list {
        let vault = vault.wrap_err_with(|| format!("could not open {}", root.display()))?;
        return print_index(&vault, &config, args.output);
    }

    let mut app = App::new(config, root, vault);
    if !args.no_watch {
        app.enable_watching();
    }

    enable_raw_mode().inspect_err(|e| {
        eprintln!("Failed to enable raw mode: {}", e);
    })?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture).inspect_err(|_| {
        disable_raw_mode().ok();
    })?;

    let backend = ratatui::backend::CrosstermBackend::new(stdout());
    let mut terminal = ratatui::Terminal::new(backend).inspect_err(|_| restore_terminal())?;

    let result = vaultheads::tui::run(&mut terminal, app);

    restore_terminal();
    terminal.show_cursor().ok();
    result
}

fn restore_terminal() {
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen).ok();
    disable_raw_mode().ok();
}

/// Session-only settings from the command line.
fn apply_overrides(config: &mut Config, args: &Cli) {
    if !args.levels.is_empty() {
        let levels: Vec<usize> = args.levels.iter().map(|&l| usize::from(l)).collect();
        config.headings.show_only_levels(&levels);
    }
    config
        .headings
        .patterns
        .extend(args.patterns.iter().map(|p| PatternSetting::parse_cli(p)));
}

#[derive(Serialize)]
struct FileHeadings<'a> {
    path: String,
    headings: &'a [HeadingEntry],
}

fn print_index(vault: &Vault, config: &Config, format: OutputFormat) -> Result<()> {
    let patterns = PatternSet::compile(&config.headings.patterns);
    for error in patterns.errors() {
        eprintln!("warning: {}", error);
    }

    let mut index = HeadingIndex::new();
    index.rebuild_all(vault, &config.headings, &patterns);

    match format {
        OutputFormat::Plain => {
            for (path, entries) in index.iter() {
                println!("{}", path.display());
                for entry in entries {
                    let indent = "  ".repeat(entry.level.saturating_sub(1));
                    println!("{:>6}  {}{}", entry.line + 1, indent, entry.text);
                }
            }
        }
        OutputFormat::Json => {
            let files: Vec<FileHeadings> = index
                .iter()
                .map(|(path, entries)| FileHeadings {
                    path: path.display().to_string(),
                    headings: entries,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&files)?);
        }
    }
    Ok(())
}
