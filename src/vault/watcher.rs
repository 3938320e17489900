//! File system watcher for live heading refresh.
//!
//! Watches the whole vault recursively and turns raw notify events into
//! [`VaultEvent`]s for markdown files, with vault-relative paths.

use crate::error::Result;
use crate::parser::utils::is_markdown_path;
use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{AccessKind, AccessMode, ModifyKind, RenameMode},
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

/// A change to a markdown file in the vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VaultEvent {
    Modified(PathBuf),
    Renamed { from: PathBuf, to: PathBuf },
    Created(PathBuf),
    Removed(PathBuf),
}

/// Manages file watching for the vault.
pub struct VaultWatcher {
    // Kept alive for as long as events should flow
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
    root: PathBuf,
}

impl VaultWatcher {
    /// Start watching `root` recursively.
    pub fn new(root: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx)?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        log::debug!("watching {}", root.display());

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
            root: root.to_path_buf(),
        })
    }

    /// Drain every pending event without blocking.
    pub fn poll(&mut self) -> Vec<VaultEvent> {
        let mut events: Vec<VaultEvent> = Vec::new();

        loop {
            match self.receiver.try_recv() {
                Ok(Ok(event)) => {
                    for vault_event in classify(&event, &self.root) {
                        // Editors often emit several writes per save
                        if events.last() != Some(&vault_event) {
                            events.push(vault_event);
                        }
                    }
                }
                Ok(Err(e)) => {
                    log::warn!("watch error: {}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break,
            }
        }

        events
    }
}

/// Translate one notify event into vault events.
pub fn classify(event: &Event, root: &Path) -> Vec<VaultEvent> {
    let relative = |path: &Path| -> Option<PathBuf> {
        if !is_markdown_path(path) {
            return None;
        }
        path.strip_prefix(root).ok().map(Path::to_path_buf)
    };

    match event.kind {
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) if event.paths.len() >= 2 => {
            match (relative(&event.paths[0]), relative(&event.paths[1])) {
                (Some(from), Some(to)) => vec![VaultEvent::Renamed { from, to }],
                (Some(from), None) => vec![VaultEvent::Removed(from)],
                (None, Some(to)) => vec![VaultEvent::Created(to)],
                (None, None) => Vec::new(),
            }
        }
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => event
            .paths
            .iter()
            .filter_map(|p| relative(p))
            .map(VaultEvent::Removed)
            .collect(),
        EventKind::Modify(ModifyKind::Name(_)) => event
            .paths
            .iter()
            .filter_map(|p| relative(p).map(|rel| (p, rel)))
            .map(|(abs, rel)| {
                if abs.exists() {
                    VaultEvent::Created(rel)
                } else {
                    VaultEvent::Removed(rel)
                }
            })
            .collect(),
        EventKind::Modify(ModifyKind::Data(_))
        | EventKind::Modify(ModifyKind::Any)
        | EventKind::Access(AccessKind::Close(AccessMode::Write)) => event
            .paths
            .iter()
            .filter_map(|p| relative(p))
            .map(VaultEvent::Modified)
            .collect(),
        EventKind::Create(_) => event
            .paths
            .iter()
            .filter_map(|p| relative(p))
            .map(VaultEvent::Created)
            .collect(),
        EventKind::Remove(_) => event
            .paths
            .iter()
            .filter_map(|p| relative(p))
            .map(VaultEvent::Removed)
            .collect(),
        _ => Vec::new(),
    }
}
