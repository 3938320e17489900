use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vaultheads")]
#[command(version)]
#[command(about = "Browse a markdown vault with every file's headings in the file tree")]
#[command(
    long_about = "vaultheads - A terminal explorer for a folder of markdown notes.\n\n\
    The left pane lists every markdown file with its headings nested beneath it.\n\
    Open a heading to jump the editor pane to it, or press L in the editor to\n\
    find the heading your cursor is under. Headings refresh as files change.\n\n\
    Examples:\n  \
    vaultheads                         # Explore the current directory\n  \
    vaultheads ~/notes                 # Explore a vault\n  \
    vaultheads --list ~/notes          # Print every file's headings\n  \
    vaultheads --pattern '^TODO: (.*)$:7' ~/notes"
)]
pub struct Cli {
    /// Vault directory (defaults to the current directory)
    pub dir: Option<PathBuf>,

    /// Print the heading index of every file and exit (non-interactive)
    #[arg(short = 'l', long = "list")]
    pub list: bool,

    /// Output format for --list
    ///
    ///   plain - Human-readable text (default)
    ///   json  - JSON array for scripting
    #[arg(short = 'o', long = "output", default_value = "plain")]
    pub output: OutputFormat,

    /// Do not watch the vault for changes
    #[arg(long = "no-watch")]
    pub no_watch: bool,

    /// Extra pseudo-heading pattern for this session (repeatable)
    ///
    /// A regex matched against every line. Capture group 1 becomes the
    /// heading text, or the whole match when there is no group. Append
    /// `:LEVEL` (1-7) to choose the level; the default is 7.
    ///
    /// Example: --pattern '^Q: (.+)$:3'
    #[arg(short = 'p', long = "pattern", value_name = "REGEX[:LEVEL]")]
    pub patterns: Vec<String>,

    /// Show only these structural heading levels
    ///
    /// Example: --levels 1,2
    #[arg(
        short = 'L',
        long = "levels",
        value_name = "LEVELS",
        value_delimiter = ',',
        value_parser = clap::value_parser!(u8).range(1..=6)
    )]
    pub levels: Vec<u8>,

    /// Write logs to this file (also: $VAULTHEADS_LOG_FILE)
    ///
    /// The log filter is read from $VAULTHEADS_LOG, e.g. `debug` or
    /// `vaultheads::vault=trace`.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}
