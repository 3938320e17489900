//! Per-file heading index.
//!
//! Structural headings come from the metadata cache; user patterns add
//! pseudo-headings on top. The merged, line-ordered sequence for each file is
//! what the explorer renders and what the cursor locator searches.

pub mod index;
pub mod locate;
pub mod pattern;

pub use index::{HeadingIndex, build_file_headings};
pub use locate::find_nearest;
pub use pattern::{PatternError, PatternSet};

use crate::host::NodeKey;
use serde::Serialize;

/// One heading-like unit in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub text: String,
    /// 1..=6 for structural headings, usually 7 for pattern matches
    pub level: usize,
    /// 0-based line in the file
    pub line: usize,
    /// Rendered row for this entry, set by the explorer on redraw
    #[serde(skip)]
    pub ui_key: Option<NodeKey>,
}

impl HeadingEntry {
    pub fn new(text: impl Into<String>, level: usize, line: usize) -> Self {
        Self {
            text: text.into(),
            level,
            line,
            ui_key: None,
        }
    }
}
