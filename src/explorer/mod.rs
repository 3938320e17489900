//! The explorer pane: a file tree with each file's headings beneath it.

pub mod sync;
pub mod tree;

pub use sync::{Activation, activate, clear_all, indent_for, redraw_all, redraw_file_headings};
pub use tree::{FileTree, ItemHeight, TreeItem, TreeRow};
