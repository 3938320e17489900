//! Log setup for the binary.
//!
//! The terminal belongs to the UI, so records only go to a file. Without a
//! log file nothing is installed and every `log` macro is a no-op.

use crate::error::Result;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Environment variable holding the log filter (env_logger syntax)
pub const FILTER_ENV: &str = "VAULTHEADS_LOG";

/// Environment variable naming a log file when `--log-file` is absent
pub const FILE_ENV: &str = "VAULTHEADS_LOG_FILE";

/// Append log records to `path`, filtered by `$VAULTHEADS_LOG` (default `info`).
pub fn init(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let mut builder = Builder::from_env(Env::default().filter_or(FILTER_ENV, "info"));
    builder
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis();

    if builder.try_init().is_err() {
        log::debug!("logger already installed");
    }
    Ok(())
}
