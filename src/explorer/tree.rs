//! The file tree model behind the explorer pane.
//!
//! Every markdown file is one item. An item may carry a heading container
//! (rows injected by [`super::sync`]); the tree caches each item's rendered
//! height for scroll math, and that cache must be invalidated whenever the
//! rows change.

use crate::host::{HeadingRow, NodeKey, TreeView};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long a revealed file entry stays flashed.
const FLASH_DURATION: Duration = Duration::from_millis(600);

/// Cached rendered height of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemHeight {
    pub height: usize,
    pub computed: bool,
}

#[derive(Debug, Clone)]
pub struct TreeItem {
    pub path: PathBuf,
    pub expanded: bool,
    /// `None` when no heading container is attached
    pub headings: Option<Vec<HeadingRow>>,
    pub height: ItemHeight,
}

impl TreeItem {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            expanded: true,
            headings: None,
            height: ItemHeight {
                height: 1,
                computed: true,
            },
        }
    }

    /// Rows this item occupies when rendered now.
    fn measure(&self) -> usize {
        let rows = match (&self.headings, self.expanded) {
            (Some(rows), true) => rows.len(),
            _ => 0,
        };
        1 + rows
    }

    /// Display name: the file stem plus its parent folder, if any.
    pub fn label(&self) -> String {
        let stem = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("?");
        match self.path.parent().and_then(|p| p.to_str()) {
            Some(parent) if !parent.is_empty() => format!("{}/{}", parent, stem),
            _ => stem.to_string(),
        }
    }
}

/// A flattened, renderable row of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeRow {
    File { item: usize },
    Heading { item: usize, row: usize },
}

#[derive(Debug, Default)]
pub struct FileTree {
    items: Vec<TreeItem>,
    /// Index into the flattened rows
    selected: usize,
    /// First visible flattened row
    offset: usize,
    highlighted: Option<NodeKey>,
    flash: Option<(PathBuf, Instant)>,
}

impl FileTree {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            items: paths.into_iter().map(TreeItem::new).collect(),
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[TreeItem] {
        &self.items
    }

    pub fn item(&self, path: &Path) -> Option<&TreeItem> {
        self.position(path).map(|i| &self.items[i])
    }

    fn position(&self, path: &Path) -> Option<usize> {
        self.items.iter().position(|item| item.path == path)
    }

    /// Insert a file in sorted position. Returns `false` if already present.
    pub fn add_item(&mut self, path: PathBuf) -> bool {
        if self.position(&path).is_some() {
            return false;
        }
        let pos = self.items.partition_point(|item| item.path < path);
        self.items.insert(pos, TreeItem::new(path));
        self.clamp_selection();
        true
    }

    pub fn remove_item(&mut self, path: &Path) -> bool {
        let Some(pos) = self.position(path) else {
            return false;
        };
        self.items.remove(pos);
        if self.highlighted.as_ref().is_some_and(|k| k.path == path) {
            self.highlighted = None;
        }
        self.clamp_selection();
        true
    }

    /// Move an item to a new path, keeping its expansion state.
    ///
    /// An item already at `to` is replaced, so each path keeps a single entry.
    pub fn rename_item(&mut self, from: &Path, to: PathBuf) -> bool {
        if self.position(from).is_none() {
            return false;
        }
        if from != to {
            self.remove_item(&to);
        }
        let Some(pos) = self.position(from) else {
            return false;
        };
        let mut item = self.items.remove(pos);
        item.path = to;
        item.headings = None;
        item.height.computed = false;
        let insert_at = self.items.partition_point(|i| i.path < item.path);
        self.items.insert(insert_at, item);
        true
    }

    /// Cached height of an item, recomputing it if marked stale.
    pub fn item_height(&mut self, index: usize) -> usize {
        let item = &mut self.items[index];
        if !item.height.computed {
            item.height = ItemHeight {
                height: item.measure(),
                computed: true,
            };
        }
        item.height.height
    }

    /// First flattened row of an item, from cached heights.
    pub fn item_offset(&mut self, index: usize) -> usize {
        (0..index).map(|i| self.item_height(i)).sum()
    }

    /// Total rendered rows, from cached heights.
    pub fn total_height(&mut self) -> usize {
        (0..self.items.len()).map(|i| self.item_height(i)).sum()
    }

    /// Every row in display order.
    pub fn rows(&self) -> Vec<TreeRow> {
        let mut rows = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            rows.push(TreeRow::File { item: i });
            if let (Some(headings), true) = (&item.headings, item.expanded) {
                rows.extend((0..headings.len()).map(|row| TreeRow::Heading { item: i, row }));
            }
        }
        rows
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected_row(&self) -> Option<TreeRow> {
        self.rows().get(self.selected).cloned()
    }

    pub fn heading_row(&self, item: usize, row: usize) -> Option<&HeadingRow> {
        self.items
            .get(item)?
            .headings
            .as_ref()?
            .get(row)
    }

    pub fn select(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    pub fn next(&mut self) {
        self.select(self.selected.saturating_add(1));
    }

    pub fn previous(&mut self) {
        self.select(self.selected.saturating_sub(1));
    }

    pub fn first(&mut self) {
        self.select(0);
    }

    pub fn last(&mut self) {
        self.select(usize::MAX);
    }

    fn clamp_selection(&mut self) {
        let max = self.total_height().saturating_sub(1);
        self.selected = self.selected.min(max);
    }

    /// Path of the file owning the selected row.
    pub fn selected_path(&self) -> Option<&Path> {
        match self.selected_row()? {
            TreeRow::File { item } | TreeRow::Heading { item, .. } => {
                Some(self.items[item].path.as_path())
            }
        }
    }

    pub fn set_expanded(&mut self, path: &Path, expanded: bool) {
        if let Some(pos) = self.position(path) {
            let item = &mut self.items[pos];
            if item.expanded != expanded {
                item.expanded = expanded;
                item.height.computed = false;
            }
            // Keep the cursor on the file row when its children vanish
            if !expanded {
                let file_row = self.item_offset(pos);
                if self.selected > file_row && self.selected < file_row + 1 + self.rows_of(pos) {
                    self.selected = file_row;
                }
            }
            self.clamp_selection();
        }
    }

    fn rows_of(&self, pos: usize) -> usize {
        self.items[pos].headings.as_ref().map_or(0, Vec::len)
    }

    /// Keep the selection inside a viewport of `height` rows.
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + height {
            self.offset = self.selected + 1 - height;
        }
        let max_offset = self.total_height().saturating_sub(height);
        self.offset = self.offset.min(max_offset);
    }

    pub fn scroll_by(&mut self, delta: isize, height: usize) {
        let max_offset = self.total_height().saturating_sub(height);
        self.offset = self.offset.saturating_add_signed(delta).min(max_offset);
    }

    pub fn highlighted(&self) -> Option<&NodeKey> {
        self.highlighted.as_ref()
    }

    /// Whether `path`'s entry is currently flashed by a reveal.
    pub fn is_flashing(&self, path: &Path) -> bool {
        self.flash
            .as_ref()
            .is_some_and(|(p, at)| p == path && at.elapsed() < FLASH_DURATION)
    }

    fn row_index_of_key(&mut self, key: &NodeKey) -> Option<usize> {
        let pos = self.position(&key.path)?;
        let item = &self.items[pos];
        if !item.expanded || item.headings.as_ref()?.len() <= key.ordinal {
            return None;
        }
        Some(self.item_offset(pos) + 1 + key.ordinal)
    }
}

impl TreeView for FileTree {
    fn has_item(&self, path: &Path) -> bool {
        self.position(path).is_some()
    }

    fn item_paths(&self) -> Vec<PathBuf> {
        self.items.iter().map(|item| item.path.clone()).collect()
    }

    fn set_headings(&mut self, path: &Path, rows: Vec<HeadingRow>) -> bool {
        let Some(pos) = self.position(path) else {
            return false;
        };
        self.items[pos].headings = Some(rows);
        if self
            .highlighted
            .as_ref()
            .is_some_and(|k| k.path == path && self.heading_row(pos, k.ordinal).is_none())
        {
            self.highlighted = None;
        }
        true
    }

    fn clear_headings(&mut self, path: &Path) {
        if let Some(pos) = self.position(path) {
            self.items[pos].headings = None;
            if self.highlighted.as_ref().is_some_and(|k| k.path == path) {
                self.highlighted = None;
            }
        }
    }

    fn invalidate_heights(&mut self) {
        for item in &mut self.items {
            item.height.computed = false;
        }
        self.clamp_selection();
    }

    fn reveal(&mut self, path: &Path) -> bool {
        let Some(pos) = self.position(path) else {
            return false;
        };
        if !self.items[pos].expanded {
            self.items[pos].expanded = true;
            self.items[pos].height.computed = false;
        }
        self.selected = self.item_offset(pos);
        self.flash = Some((path.to_path_buf(), Instant::now()));
        true
    }

    fn set_highlight(&mut self, key: &NodeKey) -> bool {
        match self.row_index_of_key(key) {
            Some(row) => {
                self.selected = row;
                self.highlighted = Some(key.clone());
                true
            }
            None => false,
        }
    }

    fn clear_highlight(&mut self, key: &NodeKey) {
        if self.highlighted.as_ref() == Some(key) {
            self.highlighted = None;
        }
    }
}
