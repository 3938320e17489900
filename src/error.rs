//! Error types shared by the library modules.
//!
//! The binary wraps these in `color_eyre::Report`; library code returns
//! [`Result`] so callers can decide which failures are fatal.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File watcher error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A redraw was requested for a file the tree does not contain.
    #[error("No tree entry for {}", .0.display())]
    MissingTreeItem(PathBuf),

    #[error("Vault is not available: {}", .0.display())]
    VaultUnavailable(PathBuf),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(e: toml::ser::Error) -> Self {
        Error::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
