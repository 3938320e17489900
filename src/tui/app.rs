use crate::config::Config;
use crate::editor::Editor;
use crate::error::Result;
use crate::explorer::{self, Activation, FileTree, TreeRow};
use crate::headings::{HeadingIndex, PatternSet, find_nearest};
use crate::host::{EditorView, TreeView};
use crate::keybindings::{Action, KeybindingMode, Keybindings};
use crate::tui::scheduler::{Scheduler, Task};
use crate::tui::theme::Theme;
use crate::vault::{Vault, VaultEvent, VaultWatcher};
use crossterm::event::{KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How long a status message stays up without a key press.
const STATUS_TTL: Duration = Duration::from_secs(4);

/// Rows or lines moved by one mouse wheel step.
const WHEEL_STEP: isize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Focus {
    Explorer,
    Editor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AppMode {
    Normal,
    Help,
}

pub struct App {
    pub config: Config,
    root: PathBuf,
    vault: Option<Vault>,
    watcher: Option<VaultWatcher>,
    watch_enabled: bool,
    pub index: HeadingIndex,
    patterns: PatternSet,
    pub tree: FileTree,
    pub editor: Editor,
    pub scheduler: Scheduler,
    keybindings: Keybindings,

    pub theme: Theme,
    pub focus: Focus,
    pub mode: AppMode,
    pub help_scroll: u16,
    pub outline_width: u16,
    pub should_quit: bool,

    status_message: Option<(String, Instant)>,
    shown_notices: HashSet<String>,

    // Filled in by the renderer, used for paging and mouse hits
    pub tree_area: Rect,
    pub tree_viewport: usize,
    pub editor_viewport: usize,
}

impl App {
    /// Build the app around a vault that may have failed to open.
    ///
    /// Without a vault the explorer stays empty and headings inactive until
    /// a recalculation manages to open it.
    pub fn new(config: Config, root: PathBuf, vault: Result<Vault>) -> Self {
        let keybindings = config.keybindings();
        let patterns = PatternSet::compile(&config.headings.patterns);
        let outline_width = config.ui.outline_width;

        let mut app = Self {
            editor: Editor::new(&root),
            config,
            root,
            vault: None,
            watcher: None,
            watch_enabled: false,
            index: HeadingIndex::new(),
            patterns,
            tree: FileTree::default(),
            scheduler: Scheduler::new(),
            keybindings,
            theme: Theme::default(),
            focus: Focus::Explorer,
            mode: AppMode::Normal,
            help_scroll: 0,
            outline_width,
            should_quit: false,
            status_message: None,
            shown_notices: HashSet::new(),
            tree_area: Rect::default(),
            tree_viewport: 0,
            editor_viewport: 0,
        };

        app.report_pattern_errors();
        match vault {
            Ok(vault) => app.attach_vault(vault),
            Err(e) => {
                log::error!("vault unavailable: {}", e);
                app.notice_once(format!("⚠ {}. Press R to retry", e));
            }
        }
        app
    }

    fn attach_vault(&mut self, vault: Vault) {
        self.root = vault.root().to_path_buf();
        self.tree = FileTree::new(vault.files().iter().cloned());
        self.editor = Editor::new(&self.root);
        self.vault = Some(vault);
        self.start_watcher();
        self.rebuild_everything();
    }

    /// Watch the vault for changes, now and whenever it is (re)opened.
    pub fn enable_watching(&mut self) {
        self.watch_enabled = true;
        self.start_watcher();
    }

    fn start_watcher(&mut self) {
        if !self.watch_enabled || self.watcher.is_some() {
            return;
        }
        let Some(vault) = &self.vault else {
            return;
        };
        match VaultWatcher::new(vault.root()) {
            Ok(watcher) => self.watcher = Some(watcher),
            Err(e) => {
                log::warn!("live refresh disabled: {}", e);
                self.notice_once(format!("⚠ Live refresh disabled: {}", e));
            }
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Apply every change the watcher has seen since the last call.
    pub fn poll_watcher(&mut self) {
        let Some(watcher) = self.watcher.as_mut() else {
            return;
        };
        let events = watcher.poll();
        for event in events {
            self.handle_vault_event(event);
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vault(&self) -> Option<&Vault> {
        self.vault.as_ref()
    }

    /// Whether heading rows are being maintained right now.
    pub fn headings_active(&self) -> bool {
        self.vault.is_some() && self.config.headings.enabled
    }

    // === Status messages ===

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_ref().map(|(msg, _)| msg.as_str())
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Show `message` unless it has been shown before.
    pub fn notice_once(&mut self, message: String) {
        if self.shown_notices.insert(message.clone()) {
            self.set_status(message);
        }
    }

    pub fn clear_expired_status(&mut self, now: Instant) {
        if self
            .status_message
            .as_ref()
            .is_some_and(|(_, at)| now.duration_since(*at) >= STATUS_TTL)
        {
            self.status_message = None;
        }
    }

    fn report_pattern_errors(&mut self) {
        let messages: Vec<String> = self
            .patterns
            .errors()
            .iter()
            .map(|e| format!("✗ {}", e))
            .collect();
        for message in messages {
            self.notice_once(message);
        }
    }

    // === Heading maintenance ===

    fn indent_per_level(&self) -> u16 {
        self.config.headings.indent_per_level
    }

    /// Clear the index and rebuild every file, or clear every row when
    /// headings are turned off.
    fn rebuild_everything(&mut self) {
        self.scheduler.cancel_rebuilds();
        self.index.clear();

        let Some(vault) = &self.vault else {
            return;
        };
        if !self.config.headings.enabled {
            explorer::clear_all(&mut self.tree);
            return;
        }

        self.index
            .rebuild_all(vault, &self.config.headings, &self.patterns);
        let indent = self.config.headings.indent_per_level;
        let errors = explorer::redraw_all(&mut self.tree, &mut self.index, indent);
        if let Some(first) = errors.first() {
            self.set_status(format!("✗ {}", first));
        }
        for e in errors {
            log::warn!("redraw failed: {}", e);
        }
    }

    /// Full recalculation: rescan the vault (opening it if startup failed),
    /// recompile patterns, and rebuild every file.
    pub fn recalculate(&mut self) {
        match self.vault.as_mut().map(Vault::scan) {
            Some(Ok(())) => {}
            Some(Err(e)) => {
                log::warn!("rescan failed: {}", e);
                self.set_status(format!("✗ Rescan failed: {}", e));
                return;
            }
            None => match Vault::open(&self.root) {
                Ok(vault) => {
                    log::info!("vault available at {}", vault.root().display());
                    self.attach_vault(vault);
                    self.set_status("✓ Vault opened");
                    return;
                }
                Err(e) => {
                    self.set_status(format!("✗ {}", e));
                    return;
                }
            },
        }

        self.sync_tree_items();
        self.patterns = PatternSet::compile(&self.config.headings.patterns);
        self.shown_notices.clear();
        self.report_pattern_errors();
        self.rebuild_everything();
        if self.config.headings.enabled && self.status_message.is_none() {
            self.set_status(format!("↻ Rebuilt headings for {} files", self.index.len()));
        }
    }

    /// Make the tree's items match the vault's file list.
    fn sync_tree_items(&mut self) {
        let Some(vault) = &self.vault else {
            return;
        };
        for path in self.tree.item_paths() {
            if !vault.contains(&path) {
                self.tree.remove_item(&path);
                self.editor.remove(&path);
            }
        }
        for path in vault.files() {
            self.tree.add_item(path.clone());
        }
    }

    /// Flip the master switch. Turning it off removes every heading row and
    /// drops pending rebuilds; turning it on rebuilds everything.
    pub fn toggle_headings(&mut self) {
        self.config.headings.enabled = !self.config.headings.enabled;
        if self.config.headings.enabled {
            self.rebuild_everything();
            self.set_status("✓ Headings on");
        } else {
            self.scheduler.cancel_rebuilds();
            self.index.clear();
            explorer::clear_all(&mut self.tree);
            self.set_status("Headings off");
        }
    }

    /// Rebuild and redraw one file now.
    pub fn rebuild_file(&mut self, path: &Path) {
        let Some(vault) = &self.vault else {
            return;
        };
        let indexed = self
            .index
            .rebuild_file(vault, path, &self.config.headings, &self.patterns);
        if let Err(e) = indexed {
            log::warn!("could not index {}: {}", path.display(), e);
            self.set_status(format!("✗ Could not read {}: {}", path.display(), e));
        }
        self.redraw_file(path);
        self.tree.invalidate_heights();
    }

    fn redraw_file(&mut self, path: &Path) {
        let indent = self.indent_per_level();
        let redrawn = match self.index.get_mut(path) {
            Some(entries) => explorer::redraw_file_headings(&mut self.tree, path, entries, indent),
            None => {
                self.tree.clear_headings(path);
                Ok(())
            }
        };
        if let Err(e) = redrawn {
            log::warn!("redraw failed: {}", e);
            self.set_status(format!("✗ {}", e));
        }
    }

    fn schedule_rebuild(&mut self, path: PathBuf) {
        if !self.config.headings.enabled {
            return;
        }
        let delay = Duration::from_millis(self.config.headings.refresh_delay_ms);
        self.scheduler.debounce(delay, Task::RebuildFile(path));
    }

    /// Apply one change reported by the vault watcher.
    pub fn handle_vault_event(&mut self, event: VaultEvent) {
        let Some(vault) = self.vault.as_mut() else {
            return;
        };
        log::debug!("{:?}", event);

        match event {
            VaultEvent::Modified(path) | VaultEvent::Created(path) => {
                if !vault.add_file(&path) {
                    vault.refresh(&path);
                }
                if self.tree.add_item(path.clone()) {
                    self.tree.invalidate_heights();
                }
                self.editor.reload(&path);
                self.schedule_rebuild(path);
            }
            VaultEvent::Removed(path) => {
                vault.remove_file(&path);
                self.tree.remove_item(&path);
                self.index.remove(&path);
                self.editor.remove(&path);
                self.scheduler.cancel(&Task::RebuildFile(path));
                self.tree.invalidate_heights();
            }
            VaultEvent::Renamed { from, to } => {
                vault.rename_file(&from, &to);
                if !self.tree.rename_item(&from, to.clone()) {
                    self.tree.add_item(to.clone());
                }
                self.index.rename(&from, to.clone());
                self.editor.rename(&from, &to);
                self.editor.reload(&to);
                self.scheduler.cancel(&Task::RebuildFile(from));
                self.redraw_file(&to);
                self.tree.invalidate_heights();
                self.schedule_rebuild(to);
            }
        }
    }

    /// Run every scheduled task that is due at `now`.
    pub fn run_due(&mut self, now: Instant) {
        self.clear_expired_status(now);
        for task in self.scheduler.take_due(now) {
            match task {
                Task::RebuildFile(path) => {
                    if self.headings_active() {
                        self.rebuild_file(&path);
                    }
                }
                Task::ClearHighlight(key) => self.tree.clear_highlight(&key),
                Task::ClearSelection => self.editor.clear_selection(),
            }
        }
    }

    /// Reveal the file of the focused editor pane and highlight the heading
    /// its cursor is under, for the configured duration.
    pub fn highlight_location(&mut self) {
        let Some(path) = self.editor.focused_file().map(Path::to_path_buf) else {
            return;
        };
        if self.index.get(&path).is_none_or(|entries| entries.is_empty()) {
            return;
        }

        self.tree.reveal(&path);
        let Some(line) = self.editor.cursor_line() else {
            return;
        };
        let key = self
            .index
            .get(&path)
            .and_then(|entries| find_nearest(entries, line))
            .and_then(|entry| entry.ui_key.clone());
        let Some(key) = key else {
            self.tree.scroll_into_view(self.tree_viewport);
            return;
        };

        if self.tree.set_highlight(&key) {
            // Only one highlight exists at a time
            self.scheduler.cancel_highlight_clears();
            let duration = Duration::from_millis(self.config.headings.highlight_duration_ms);
            self.scheduler.schedule(duration, Task::ClearHighlight(key));
        }
        self.tree.scroll_into_view(self.tree_viewport);
    }

    /// Open the selected tree row in the editor.
    pub fn activate_selected(&mut self, activation: Activation) {
        let Some(row) = self.tree.selected_row() else {
            return;
        };
        let result = match row {
            TreeRow::File { item } => {
                let path = self.tree.items()[item].path.clone();
                self.editor
                    .navigate(&path, 0, activation == Activation::Secondary)
            }
            TreeRow::Heading { item, row } => match self.tree.heading_row(item, row).cloned() {
                Some(heading) => explorer::activate(&mut self.editor, &heading, activation),
                None => return,
            },
        };

        match result {
            Ok(()) => {
                if let Some(pane) = self.editor.focused_pane_mut() {
                    pane.scroll_into_view(self.editor_viewport);
                }
                let delay = Duration::from_millis(self.config.headings.selection_clear_delay_ms);
                self.scheduler.debounce(delay, Task::ClearSelection);
            }
            Err(e) => {
                log::warn!("navigation failed: {}", e);
                self.set_status(format!("✗ {}", e));
            }
        }
    }

    // === Input ===

    pub fn keybinding_mode(&self) -> KeybindingMode {
        match (self.mode, self.focus) {
            (AppMode::Help, _) => KeybindingMode::Help,
            (AppMode::Normal, Focus::Explorer) => KeybindingMode::Normal,
            (AppMode::Normal, Focus::Editor) => KeybindingMode::Editor,
        }
    }

    pub fn keybindings(&self) -> &Keybindings {
        &self.keybindings
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let mode = self.keybinding_mode();
        if let Some(action) = self.keybindings.dispatch(mode, key) {
            self.status_message = None;
            self.perform(action);
        }
    }

    pub fn perform(&mut self, action: Action) {
        match action {
            Action::Next => self.move_by(1),
            Action::Previous => self.move_by(-1),
            Action::PageDown => self.move_by(self.page_size()),
            Action::PageUp => self.move_by(-self.page_size()),
            Action::First => match self.focus {
                Focus::Explorer => self.tree.first(),
                Focus::Editor => self.editor.cursor_to_start(),
            },
            Action::Last => match self.focus {
                Focus::Explorer => self.tree.last(),
                Focus::Editor => self.editor.cursor_to_end(),
            },

            Action::Expand => self.set_selected_expanded(true),
            Action::Collapse => self.set_selected_expanded(false),
            Action::Activate => self.activate_selected(Activation::Primary),
            Action::ActivateInNewPane => self.activate_selected(Activation::Secondary),
            Action::ToggleFocus => self.toggle_focus(),
            Action::OutlineWidthIncrease => self.change_outline_width(5),
            Action::OutlineWidthDecrease => self.change_outline_width(-5),

            Action::HighlightLocation => self.highlight_location(),
            Action::ToggleHeadings => {
                self.toggle_headings();
                if let Err(e) = Config::store_headings_enabled(self.config.headings.enabled) {
                    log::warn!("could not save config: {}", e);
                }
            }
            Action::Recalculate => self.recalculate(),

            Action::ClosePane => {
                self.editor.close_focused();
                if self.editor.focused_pane().is_none() {
                    self.focus = Focus::Explorer;
                }
            }
            Action::NextPane => self.editor.focus_next(),
            Action::PreviousPane => self.editor.focus_previous(),

            Action::ToggleHelp => {
                self.mode = match self.mode {
                    AppMode::Help => AppMode::Normal,
                    AppMode::Normal => AppMode::Help,
                };
                self.help_scroll = 0;
                self.keybindings.reset_sequences();
            }
            Action::HelpScrollDown => self.help_scroll = self.help_scroll.saturating_add(1),
            Action::HelpScrollUp => self.help_scroll = self.help_scroll.saturating_sub(1),
            Action::ExitMode => {
                self.mode = AppMode::Normal;
                self.keybindings.reset_sequences();
            }

            Action::Quit => self.should_quit = true,
        }

        if self.focus == Focus::Explorer {
            self.tree.scroll_into_view(self.tree_viewport);
        } else if let Some(pane) = self.editor.focused_pane_mut() {
            pane.scroll_into_view(self.editor_viewport);
        }
    }

    fn page_size(&self) -> isize {
        let viewport = match self.focus {
            Focus::Explorer => self.tree_viewport,
            Focus::Editor => self.editor_viewport,
        };
        isize::try_from(viewport.max(1)).unwrap_or(1)
    }

    fn move_by(&mut self, delta: isize) {
        match self.focus {
            Focus::Explorer => {
                let target = self.tree.selected().saturating_add_signed(delta);
                self.tree.select(target);
            }
            Focus::Editor => self.editor.move_cursor(delta),
        }
    }

    fn set_selected_expanded(&mut self, expanded: bool) {
        if let Some(path) = self.tree.selected_path().map(Path::to_path_buf) {
            self.tree.set_expanded(&path, expanded);
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Explorer if self.editor.focused_pane().is_some() => Focus::Editor,
            Focus::Explorer => {
                self.set_status("⚠ No open document");
                Focus::Explorer
            }
            Focus::Editor => Focus::Explorer,
        };
        self.keybindings.reset_sequences();
    }

    fn change_outline_width(&mut self, delta: i16) {
        self.outline_width = self.outline_width.saturating_add_signed(delta).clamp(15, 70);
        self.config.ui.outline_width = self.outline_width;
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let in_tree = self.tree_area.contains(Position::new(mouse.column, mouse.row));
        match mouse.kind {
            MouseEventKind::Down(button) if in_tree => {
                // Skip the border row
                let Some(offset) = mouse.row.checked_sub(self.tree_area.y + 1) else {
                    return;
                };
                let row = self.tree.offset() + usize::from(offset);
                if row >= self.tree.rows().len() {
                    return;
                }
                self.focus = Focus::Explorer;
                self.tree.select(row);
                match button {
                    MouseButton::Left => self.activate_selected(Activation::Primary),
                    MouseButton::Middle => self.activate_selected(Activation::Secondary),
                    MouseButton::Right => {}
                }
            }
            MouseEventKind::ScrollDown if in_tree => {
                self.tree.scroll_by(WHEEL_STEP, self.tree_viewport);
            }
            MouseEventKind::ScrollUp if in_tree => {
                self.tree.scroll_by(-WHEEL_STEP, self.tree_viewport);
            }
            MouseEventKind::ScrollDown => self.editor.move_cursor(WHEEL_STEP),
            MouseEventKind::ScrollUp => self.editor.move_cursor(-WHEEL_STEP),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NodeKey;
    use std::fs;

    const NOTE: &str = "# Intro\n\nbody\n\n## Usage\nmore\n**Important**\n";

    fn vault_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("note.md"), NOTE).unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/other.md"), "# Other\n").unwrap();
        dir
    }

    fn app_for(dir: &tempfile::TempDir) -> App {
        let root = dir.path().to_path_buf();
        App::new(Config::default(), root.clone(), Vault::open(&root))
    }

    fn row_texts(app: &App, path: &str) -> Vec<String> {
        app.tree
            .item(Path::new(path))
            .and_then(|item| item.headings.as_ref())
            .map(|rows| rows.iter().map(|r| r.text.clone()).collect())
            .unwrap_or_default()
    }

    fn later(ms: u64) -> Instant {
        Instant::now() + Duration::from_millis(ms)
    }

    #[test]
    fn test_startup_builds_rows() {
        let dir = vault_dir();
        let app = app_for(&dir);

        assert!(app.headings_active());
        assert_eq!(row_texts(&app, "note.md"), ["Intro", "Usage", "Important"]);
        assert_eq!(row_texts(&app, "sub/other.md"), ["Other"]);
    }

    #[test]
    fn test_highlight_location_scenario() {
        let dir = vault_dir();
        let mut app = app_for(&dir);
        app.editor.navigate(Path::new("note.md"), 2, false).unwrap();

        app.highlight_location();

        let intro = NodeKey {
            path: PathBuf::from("note.md"),
            ordinal: 0,
        };
        assert_eq!(app.tree.highlighted(), Some(&intro));
        assert!(app.tree.is_flashing(Path::new("note.md")));

        app.run_due(later(1000));
        assert_eq!(app.tree.highlighted(), Some(&intro));

        app.run_due(later(2100));
        assert_eq!(app.tree.highlighted(), None);
    }

    #[test]
    fn test_repeated_highlight_gets_full_duration() {
        let dir = vault_dir();
        let mut app = app_for(&dir);
        app.config.headings.highlight_duration_ms = 200;
        app.editor.navigate(Path::new("note.md"), 2, false).unwrap();

        let start = Instant::now();
        app.highlight_location();
        std::thread::sleep(Duration::from_millis(150));
        app.highlight_location();

        // The first request's deadline has passed, the second's has not
        app.run_due(start + Duration::from_millis(250));
        assert_eq!(app.tree.highlighted().map(|k| k.ordinal), Some(0));

        app.run_due(later(1000));
        assert_eq!(app.tree.highlighted(), None);
    }

    #[test]
    fn test_highlight_location_picks_pattern_heading() {
        let dir = vault_dir();
        let mut app = app_for(&dir);
        app.editor.navigate(Path::new("note.md"), 6, false).unwrap();

        app.highlight_location();
        assert_eq!(app.tree.highlighted().map(|k| k.ordinal), Some(2));
    }

    #[test]
    fn test_highlight_location_without_editor_is_noop() {
        let dir = vault_dir();
        let mut app = app_for(&dir);
        app.highlight_location();

        assert_eq!(app.tree.highlighted(), None);
        assert!(app.scheduler.is_empty());
    }

    #[test]
    fn test_modified_event_rebuilds_after_delay() {
        let dir = vault_dir();
        let mut app = app_for(&dir);

        fs::write(dir.path().join("note.md"), "# Intro\n## Added\n").unwrap();
        app.handle_vault_event(VaultEvent::Modified(PathBuf::from("note.md")));
        app.handle_vault_event(VaultEvent::Modified(PathBuf::from("note.md")));
        assert_eq!(app.scheduler.len(), 1);
        assert_eq!(row_texts(&app, "note.md"), ["Intro", "Usage", "Important"]);

        app.run_due(later(1000));
        assert_eq!(row_texts(&app, "note.md"), ["Intro", "Added"]);
        assert_eq!(app.tree.total_height(), 1 + 2 + 1 + 1);
    }

    #[test]
    fn test_toggle_clears_rows_and_blocks_rebuilds() {
        let dir = vault_dir();
        let mut app = app_for(&dir);

        app.toggle_headings();
        assert!(!app.headings_active());
        assert!(app.tree.items().iter().all(|item| item.headings.is_none()));
        assert!(app.index.is_empty());

        app.handle_vault_event(VaultEvent::Modified(PathBuf::from("note.md")));
        assert!(app.scheduler.is_empty());

        app.toggle_headings();
        assert_eq!(row_texts(&app, "note.md"), ["Intro", "Usage", "Important"]);
    }

    #[test]
    fn test_level_filter_applies_on_recalculate() {
        let dir = vault_dir();
        let mut app = app_for(&dir);
        app.config.headings.show_only_levels(&[1]);
        app.config.headings.patterns.clear();

        app.recalculate();
        assert_eq!(row_texts(&app, "note.md"), ["Intro"]);
    }

    #[test]
    fn test_created_removed_and_renamed_files() {
        let dir = vault_dir();
        let mut app = app_for(&dir);

        fs::write(dir.path().join("new.md"), "# New\n").unwrap();
        app.handle_vault_event(VaultEvent::Created(PathBuf::from("new.md")));
        app.run_due(later(1000));
        assert_eq!(row_texts(&app, "new.md"), ["New"]);

        fs::rename(dir.path().join("new.md"), dir.path().join("renamed.md")).unwrap();
        app.handle_vault_event(VaultEvent::Renamed {
            from: PathBuf::from("new.md"),
            to: PathBuf::from("renamed.md"),
        });
        assert!(app.tree.item(Path::new("new.md")).is_none());
        assert_eq!(row_texts(&app, "renamed.md"), ["New"]);
        assert!(app.index.get(Path::new("new.md")).is_none());

        fs::remove_file(dir.path().join("renamed.md")).unwrap();
        app.handle_vault_event(VaultEvent::Removed(PathBuf::from("renamed.md")));
        assert!(app.tree.item(Path::new("renamed.md")).is_none());
        assert!(app.index.get(Path::new("renamed.md")).is_none());

        app.run_due(later(1000));
        assert!(app.tree.item(Path::new("renamed.md")).is_none());
    }

    #[test]
    fn test_rename_onto_existing_file_keeps_one_entry() {
        let dir = vault_dir();
        fs::write(dir.path().join("b.md"), "# Old B\n").unwrap();
        let mut app = app_for(&dir);
        assert_eq!(row_texts(&app, "b.md"), ["Old B"]);

        fs::rename(dir.path().join("note.md"), dir.path().join("b.md")).unwrap();
        app.handle_vault_event(VaultEvent::Renamed {
            from: PathBuf::from("note.md"),
            to: PathBuf::from("b.md"),
        });

        assert_eq!(
            app.tree.item_paths(),
            ["b.md", "sub/other.md"].map(PathBuf::from).to_vec()
        );
        assert_eq!(row_texts(&app, "b.md"), ["Intro", "Usage", "Important"]);

        app.run_due(later(1000));
        assert_eq!(app.tree.items().len(), 2);
        assert_eq!(row_texts(&app, "b.md"), ["Intro", "Usage", "Important"]);
        assert_eq!(app.index.len(), 2);
    }

    #[test]
    fn test_activation_selects_then_clears() {
        let dir = vault_dir();
        let mut app = app_for(&dir);

        // Rows: note.md, Intro, Usage, Important, sub/other.md, Other
        app.tree.select(2);
        app.activate_selected(Activation::Primary);

        let pane = app.editor.focused_pane().unwrap();
        assert_eq!(pane.path, PathBuf::from("note.md"));
        assert_eq!(pane.cursor, 4);
        assert_eq!(pane.selection, Some(4));

        app.run_due(later(1000));
        assert_eq!(app.editor.focused_pane().unwrap().selection, None);

        app.tree.select(5);
        app.activate_selected(Activation::Secondary);
        assert_eq!(app.editor.panes().len(), 2);
        assert_eq!(app.editor.focused_file(), Some(Path::new("sub/other.md")));
    }

    #[test]
    fn test_unavailable_vault_recovers_on_recalculate() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("later");
        let mut app = App::new(Config::default(), root.clone(), Vault::open(&root));

        assert!(!app.headings_active());
        assert!(app.status_message().is_some());
        assert!(app.tree.items().is_empty());

        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.md"), "# A\n").unwrap();
        app.recalculate();

        assert!(app.headings_active());
        assert_eq!(row_texts(&app, "a.md"), ["A"]);
    }

    #[test]
    fn test_recovered_vault_is_watched() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("later");
        let mut app = App::new(Config::default(), root.clone(), Vault::open(&root));
        app.enable_watching();
        assert!(!app.is_watching());

        fs::create_dir(&root).unwrap();
        fs::write(root.join("a.md"), "# A\n").unwrap();
        app.recalculate();

        assert!(app.headings_active());
        assert!(app.is_watching());
    }

    #[test]
    fn test_watching_stays_off_unless_enabled() {
        let dir = vault_dir();
        let mut app = app_for(&dir);
        assert!(!app.is_watching());
        app.poll_watcher();

        app.enable_watching();
        assert!(app.is_watching());
    }

    #[test]
    fn test_invalid_pattern_is_reported_once() {
        let dir = vault_dir();
        let mut config = Config::default();
        config.headings.patterns.push(crate::config::PatternSetting::new("(", 7));
        let root = dir.path().to_path_buf();
        let mut app = App::new(config, root.clone(), Vault::open(&root));

        assert!(app.status_message().is_some_and(|m| m.contains('(')));
        assert_eq!(row_texts(&app, "note.md"), ["Intro", "Usage", "Important"]);

        app.status_message = None;
        app.report_pattern_errors();
        assert!(app.status_message().is_none());
    }
}
