//! Read-only editor panes with a line cursor.
//!
//! The explorer navigates here when a heading is activated, and the cursor
//! line of the focused pane is what "highlight location" resolves against.

use crate::error::Result;
use crate::host::EditorView;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct EditorPane {
    pub path: PathBuf,
    pub lines: Vec<String>,
    pub cursor: usize,
    pub scroll: usize,
    /// Line left selected by a navigation, until cleared
    pub selection: Option<usize>,
}

impl EditorPane {
    fn clamp(&mut self) {
        self.cursor = self.cursor.min(self.lines.len().saturating_sub(1));
        if let Some(sel) = self.selection {
            if sel >= self.lines.len() {
                self.selection = None;
            }
        }
    }

    /// Keep the cursor inside a viewport of `height` lines.
    pub fn scroll_into_view(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + height {
            self.scroll = self.cursor + 1 - height;
        }
    }

    pub fn title(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("untitled")
            .to_string()
    }
}

/// All open panes of the editor area.
#[derive(Debug)]
pub struct Editor {
    root: PathBuf,
    panes: Vec<EditorPane>,
    focused: Option<usize>,
}

impl Editor {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            panes: Vec::new(),
            focused: None,
        }
    }

    pub fn panes(&self) -> &[EditorPane] {
        &self.panes
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    pub fn focused_pane(&self) -> Option<&EditorPane> {
        self.focused.and_then(|i| self.panes.get(i))
    }

    pub fn focused_pane_mut(&mut self) -> Option<&mut EditorPane> {
        self.focused.and_then(|i| self.panes.get_mut(i))
    }

    fn load(&self, path: &Path) -> Result<Vec<String>> {
        let text = fs::read_to_string(self.root.join(path))?;
        Ok(text.lines().map(str::to_string).collect())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.cursor = pane.cursor.saturating_add_signed(delta);
            pane.clamp();
        }
    }

    pub fn cursor_to_start(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.cursor = 0;
        }
    }

    pub fn cursor_to_end(&mut self) {
        if let Some(pane) = self.focused_pane_mut() {
            pane.cursor = pane.lines.len().saturating_sub(1);
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(i) = self.focused {
            self.focused = Some((i + 1) % self.panes.len());
        }
    }

    pub fn focus_previous(&mut self) {
        if let Some(i) = self.focused {
            self.focused = Some((i + self.panes.len() - 1) % self.panes.len());
        }
    }

    pub fn close_focused(&mut self) {
        let Some(i) = self.focused else {
            return;
        };
        self.panes.remove(i);
        self.focused = if self.panes.is_empty() {
            None
        } else {
            Some(i.min(self.panes.len() - 1))
        };
    }

    /// Re-read every pane showing `path`.
    pub fn reload(&mut self, path: &Path) {
        if !self.panes.iter().any(|p| p.path == path) {
            return;
        }
        match self.load(path) {
            Ok(lines) => {
                for pane in self.panes.iter_mut().filter(|p| p.path == path) {
                    pane.lines = lines.clone();
                    pane.clamp();
                }
            }
            Err(e) => log::debug!("could not reload {}: {}", path.display(), e),
        }
    }

    pub fn rename(&mut self, from: &Path, to: &Path) {
        for pane in self.panes.iter_mut().filter(|p| p.path == from) {
            pane.path = to.to_path_buf();
        }
    }

    /// Close every pane showing `path`.
    pub fn remove(&mut self, path: &Path) {
        let focused_path = self.focused_pane().map(|p| p.path.clone());
        self.panes.retain(|p| p.path != path);
        self.focused = match focused_path {
            _ if self.panes.is_empty() => None,
            Some(fp) if fp != path => self.panes.iter().position(|p| p.path == fp),
            _ => Some(0),
        };
    }
}

impl EditorView for Editor {
    fn focused_file(&self) -> Option<&Path> {
        self.focused_pane().map(|p| p.path.as_path())
    }

    fn cursor_line(&self) -> Option<usize> {
        self.focused_pane().map(|p| p.cursor)
    }

    fn navigate(&mut self, path: &Path, line: usize, new_pane: bool) -> Result<()> {
        let lines = self.load(path)?;
        let mut pane = EditorPane {
            path: path.to_path_buf(),
            lines,
            cursor: line,
            scroll: line.saturating_sub(2),
            selection: Some(line),
        };
        pane.clamp();

        match self.focused {
            Some(i) if !new_pane => self.panes[i] = pane,
            _ => {
                self.panes.push(pane);
                self.focused = Some(self.panes.len() - 1);
            }
        }
        Ok(())
    }

    fn clear_selection(&mut self) {
        for pane in &mut self.panes {
            pane.selection = None;
        }
    }
}
