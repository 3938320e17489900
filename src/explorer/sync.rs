//! Keeps the tree's heading rows in step with the heading index.

use crate::error::{Error, Result};
use crate::headings::{HeadingEntry, HeadingIndex};
use crate::host::{EditorView, HeadingRow, NodeKey, TreeView};
use std::path::Path;

/// How a heading row was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Enter or left click: reuse the focused editor pane
    Primary,
    /// `o` or middle click: open in a new pane
    Secondary,
}

/// Indent for a heading of `level`; level 1 gets none.
pub fn indent_for(level: usize, per_level: u16) -> u16 {
    let steps = u16::try_from(level.saturating_sub(1)).unwrap_or(u16::MAX);
    steps.saturating_mul(per_level)
}

/// Replace the heading rows under `path` with one row per entry.
///
/// Each entry's `ui_key` is pointed at its new row. Calling this twice with
/// the same entries leaves the same rows behind.
pub fn redraw_file_headings<T: TreeView>(
    tree: &mut T,
    path: &Path,
    entries: &mut [HeadingEntry],
    indent_per_level: u16,
) -> Result<()> {
    let key = |ordinal| NodeKey {
        path: path.to_path_buf(),
        ordinal,
    };
    let rows = entries
        .iter()
        .enumerate()
        .map(|(ordinal, entry)| HeadingRow {
            key: key(ordinal),
            text: entry.text.clone(),
            level: entry.level,
            line: entry.line,
            indent: indent_for(entry.level, indent_per_level),
        })
        .collect();

    if !tree.set_headings(path, rows) {
        return Err(Error::MissingTreeItem(path.to_path_buf()));
    }
    for (ordinal, entry) in entries.iter_mut().enumerate() {
        entry.ui_key = Some(key(ordinal));
    }
    Ok(())
}

/// Redraw every file of the tree from the index.
///
/// Files without an index entry lose their rows. Failures are collected so
/// one bad file does not stop the others.
pub fn redraw_all<T: TreeView>(
    tree: &mut T,
    index: &mut HeadingIndex,
    indent_per_level: u16,
) -> Vec<Error> {
    let mut errors = Vec::new();
    for path in tree.item_paths() {
        match index.get_mut(&path) {
            Some(entries) => {
                if let Err(e) = redraw_file_headings(tree, &path, entries, indent_per_level) {
                    errors.push(e);
                }
            }
            None => tree.clear_headings(&path),
        }
    }
    tree.invalidate_heights();
    errors
}

/// Remove the heading container from every file.
pub fn clear_all<T: TreeView>(tree: &mut T) {
    for path in tree.item_paths() {
        tree.clear_headings(&path);
    }
    tree.invalidate_heights();
}

/// Navigate the editor to a heading row.
///
/// The navigation leaves the target line selected; the caller clears it
/// after a settle delay.
pub fn activate<E: EditorView>(editor: &mut E, row: &HeadingRow, activation: Activation) -> Result<()> {
    log::debug!(
        "opening {} at line {} ({:?})",
        row.key.path.display(),
        row.line,
        activation
    );
    editor.navigate(&row.key.path, row.line, activation == Activation::Secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::tree::FileTree;
    use std::path::PathBuf;

    fn entries() -> Vec<HeadingEntry> {
        vec![
            HeadingEntry::new("Intro", 1, 0),
            HeadingEntry::new("Usage", 2, 4),
            HeadingEntry::new("Important", 7, 6),
        ]
    }

    fn visible(tree: &FileTree, path: &str) -> Vec<(String, u16)> {
        tree.item(Path::new(path))
            .and_then(|item| item.headings.as_ref())
            .map(|rows| rows.iter().map(|r| (r.text.clone(), r.indent)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_indent_for() {
        assert_eq!(indent_for(1, 10), 0);
        assert_eq!(indent_for(2, 10), 10);
        assert_eq!(indent_for(7, 2), 12);
        assert_eq!(indent_for(0, 2), 0);
    }

    #[test]
    fn test_redraw_is_idempotent() {
        let mut tree = FileTree::new([PathBuf::from("a.md")]);
        let mut e = entries();

        redraw_file_headings(&mut tree, Path::new("a.md"), &mut e, 2).unwrap();
        let first = visible(&tree, "a.md");
        redraw_file_headings(&mut tree, Path::new("a.md"), &mut e, 2).unwrap();
        let second = visible(&tree, "a.md");

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
        assert_eq!(
            second,
            vec![
                ("Intro".to_string(), 0),
                ("Usage".to_string(), 2),
                ("Important".to_string(), 12),
            ]
        );
    }

    #[test]
    fn test_redraw_sets_ui_keys() {
        let mut tree = FileTree::new([PathBuf::from("a.md")]);
        let mut e = entries();
        redraw_file_headings(&mut tree, Path::new("a.md"), &mut e, 2).unwrap();

        let key = e[1].ui_key.clone().unwrap();
        assert_eq!(key.path, PathBuf::from("a.md"));
        assert_eq!(key.ordinal, 1);
        tree.invalidate_heights();
        assert!(tree.set_highlight(&key));
    }

    #[test]
    fn test_redraw_missing_item_is_an_error() {
        let mut tree = FileTree::new([PathBuf::from("a.md")]);
        let mut e = entries();
        let err = redraw_file_headings(&mut tree, Path::new("b.md"), &mut e, 2).unwrap_err();
        assert!(matches!(err, Error::MissingTreeItem(p) if p == Path::new("b.md")));
        assert!(e.iter().all(|entry| entry.ui_key.is_none()));
    }

    #[test]
    fn test_redraw_all_and_clear_all() {
        let mut tree = FileTree::new(["a.md", "b.md"].map(PathBuf::from));
        let mut index = HeadingIndex::new();
        index.insert(PathBuf::from("a.md"), entries());
        index.insert(PathBuf::from("ghost.md"), entries());

        let errors = redraw_all(&mut tree, &mut index, 2);
        assert!(errors.is_empty());
        assert_eq!(visible(&tree, "a.md").len(), 3);
        assert!(tree.item(Path::new("b.md")).unwrap().headings.is_none());
        assert_eq!(tree.total_height(), 5);

        clear_all(&mut tree);
        assert!(tree.items().iter().all(|item| item.headings.is_none()));
        assert_eq!(tree.total_height(), 2);
    }

    #[derive(Default)]
    struct RecordingEditor {
        opened: Vec<(PathBuf, usize, bool)>,
    }

    impl EditorView for RecordingEditor {
        fn focused_file(&self) -> Option<&Path> {
            self.opened.last().map(|(p, _, _)| p.as_path())
        }

        fn cursor_line(&self) -> Option<usize> {
            self.opened.last().map(|(_, l, _)| *l)
        }

        fn navigate(&mut self, path: &Path, line: usize, new_pane: bool) -> Result<()> {
            self.opened.push((path.to_path_buf(), line, new_pane));
            Ok(())
        }

        fn clear_selection(&mut self) {}
    }

    #[test]
    fn test_activation_modes() {
        let mut tree = FileTree::new([PathBuf::from("a.md")]);
        let mut e = entries();
        redraw_file_headings(&mut tree, Path::new("a.md"), &mut e, 2).unwrap();
        let row = tree.heading_row(0, 1).unwrap().clone();

        let mut editor = RecordingEditor::default();
        activate(&mut editor, &row, Activation::Primary).unwrap();
        activate(&mut editor, &row, Activation::Secondary).unwrap();

        assert_eq!(
            editor.opened,
            vec![
                (PathBuf::from("a.md"), 4, false),
                (PathBuf::from("a.md"), 4, true),
            ]
        );
    }
}
