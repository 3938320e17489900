//! # vaultheads
//!
//! Heading navigation for a vault of markdown files.
//!
//! Every markdown file's headings (plus lines matched by user patterns) are
//! kept in a per-file index, rendered as rows under the file in a tree view,
//! and searched to find the heading an editor cursor is under.
//!
//! ## Example
//!
//! ```rust
//! use vaultheads::config::PatternSetting;
//! use vaultheads::headings::{PatternSet, find_nearest};
//!
//! let patterns = PatternSet::compile(&[PatternSetting::new(r"^\*\*([^*]+)\*\*$", 7)]);
//! let entries = patterns.match_lines("intro\n**Important**\nbody\n");
//!
//! assert_eq!(entries[0].text, "Important");
//! assert_eq!(find_nearest(&entries, 2).map(|e| e.line), Some(1));
//! ```

/// Persisted settings: heading levels, patterns, timings, keybindings.
pub mod config;

pub mod editor;

pub mod error;

/// Tree view of the vault and its synchronisation with the heading index.
pub mod explorer;

/// Pattern matching, the per-file heading index, and the cursor locator.
pub mod headings;

/// Contracts between the heading logic and its collaborators.
pub mod host;

/// Keybindings module for customizable keyboard shortcuts.
pub mod keybindings;

pub mod logging;

/// Markdown heading extraction.
pub mod parser;

pub mod startup;

/// TUI module for the interactive explorer.
pub mod tui;

/// Markdown files on disk and their change watcher.
pub mod vault;

pub use config::Config;
pub use error::{Error, Result};
pub use headings::{HeadingEntry, HeadingIndex};
pub use tui::App;
pub use vault::Vault;
