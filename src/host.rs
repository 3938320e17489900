//! Contracts for the collaborators the heading explorer runs against.
//!
//! The heading logic never talks to the filesystem, the terminal, or the
//! editor pane directly. It goes through these traits so the same code
//! drives the TUI and the in-memory fakes used in tests.
//!
//! All paths are vault-relative.

use crate::error::Result;
use std::io;
use std::path::{Path, PathBuf};

/// A heading as parsed by the metadata cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuralHeading {
    /// 1..=6
    pub level: usize,
    /// 0-based line of the heading in the file
    pub line: usize,
    pub text: String,
}

/// Lookup key for a rendered heading row.
///
/// Rows belong to the tree view and may be rebuilt at any time, so entries
/// keep this key instead of a handle and resolve it when they need the row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    pub path: PathBuf,
    /// Position of the row inside its file's heading container
    pub ordinal: usize,
}

/// One row of a file's heading container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingRow {
    pub key: NodeKey,
    pub text: String,
    pub level: usize,
    pub line: usize,
    /// Indent in terminal cells
    pub indent: u16,
}

/// Parsed heading structure per file.
pub trait MetadataCache {
    /// Headings of `path`, or `None` when the cache has nothing for it yet.
    fn headings(&self, path: &Path) -> Option<&[StructuralHeading]>;
}

/// Access to file contents.
pub trait FileStore {
    fn read_text(&self, path: &Path) -> io::Result<String>;

    /// Every markdown file currently known, in display order.
    fn markdown_files(&self) -> Vec<PathBuf>;
}

/// The file tree panel.
pub trait TreeView {
    fn has_item(&self, path: &Path) -> bool;

    fn item_paths(&self) -> Vec<PathBuf>;

    /// Replace the heading container under `path` with `rows`.
    ///
    /// Returns `false` when the tree has no entry for `path`.
    fn set_headings(&mut self, path: &Path, rows: Vec<HeadingRow>) -> bool;

    /// Remove the heading container under `path`, if any.
    fn clear_headings(&mut self, path: &Path);

    /// Mark every cached item height as stale.
    fn invalidate_heights(&mut self);

    /// Scroll `path` into view and flash its entry.
    fn reveal(&mut self, path: &Path) -> bool;

    /// Highlight the row behind `key`. Returns `false` if it no longer exists.
    fn set_highlight(&mut self, key: &NodeKey) -> bool;

    fn clear_highlight(&mut self, key: &NodeKey);
}

/// The document editor.
pub trait EditorView {
    /// File shown in the focused pane.
    fn focused_file(&self) -> Option<&Path>;

    /// 0-based cursor line in the focused pane.
    fn cursor_line(&self) -> Option<usize>;

    /// Open `path` with the cursor on `line`, selecting that line.
    fn navigate(&mut self, path: &Path, line: usize, new_pane: bool) -> Result<()>;

    /// Drop the transient selection left by [`EditorView::navigate`].
    fn clear_selection(&mut self);
}
