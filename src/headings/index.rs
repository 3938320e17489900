//! Building and caching the merged heading sequence per file.

use super::{HeadingEntry, PatternSet};
use crate::config::HeadingsConfig;
use crate::host::{FileStore, MetadataCache, StructuralHeading};
use indexmap::IndexMap;
use std::io;
use std::path::{Path, PathBuf};

/// Merge visible structural headings with pattern matches, ordered by line.
///
/// `read_text` is only called when there is pattern work to do.
pub fn build_file_headings<F>(
    structural: &[StructuralHeading],
    settings: &HeadingsConfig,
    patterns: &PatternSet,
    read_text: F,
) -> io::Result<Vec<HeadingEntry>>
where
    F: FnOnce() -> io::Result<String>,
{
    let mut entries: Vec<HeadingEntry> = structural
        .iter()
        .filter(|h| settings.level_visible(h.level))
        .map(|h| HeadingEntry::new(h.text.clone(), h.level, h.line))
        .collect();

    if !patterns.is_empty() {
        let text = read_text()?;
        entries.extend(patterns.match_lines(&text));
    }

    // Stable: structural entries stay ahead of pattern matches on the same line
    entries.sort_by_key(|e| e.line);
    Ok(entries)
}

/// Heading sequences keyed by vault-relative path.
#[derive(Debug, Default)]
pub struct HeadingIndex {
    files: IndexMap<PathBuf, Vec<HeadingEntry>>,
}

impl HeadingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, path: &Path) -> Option<&[HeadingEntry]> {
        self.files.get(path).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, path: &Path) -> Option<&mut Vec<HeadingEntry>> {
        self.files.get_mut(path)
    }

    pub fn insert(&mut self, path: PathBuf, entries: Vec<HeadingEntry>) {
        self.files.insert(path, entries);
    }

    pub fn remove(&mut self, path: &Path) -> Option<Vec<HeadingEntry>> {
        self.files.shift_remove(path)
    }

    /// Move an entry to a new key after a rename.
    pub fn rename(&mut self, from: &Path, to: PathBuf) {
        if let Some(entries) = self.files.shift_remove(from) {
            self.files.insert(to, entries);
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &Vec<HeadingEntry>)> {
        self.files.iter()
    }

    /// Rebuild the entry for one file, replacing whatever was there.
    ///
    /// Returns `Ok(false)` when the metadata cache has nothing for the file;
    /// any previous entry is dropped in that case.
    pub fn rebuild_file<S>(
        &mut self,
        store: &S,
        path: &Path,
        settings: &HeadingsConfig,
        patterns: &PatternSet,
    ) -> io::Result<bool>
    where
        S: MetadataCache + FileStore,
    {
        let Some(structural) = store.headings(path) else {
            log::debug!("no cached headings for {}", path.display());
            self.files.shift_remove(path);
            return Ok(false);
        };

        let entries = build_file_headings(structural, settings, patterns, || {
            store.read_text(path)
        })?;
        log::trace!("indexed {} headings in {}", entries.len(), path.display());
        self.files.insert(path.to_path_buf(), entries);
        Ok(true)
    }

    /// Clear the index and rebuild every markdown file in the store.
    ///
    /// A file that cannot be read is logged and left out.
    pub fn rebuild_all<S>(&mut self, store: &S, settings: &HeadingsConfig, patterns: &PatternSet)
    where
        S: MetadataCache + FileStore,
    {
        self.files.clear();
        for path in store.markdown_files() {
            if let Err(e) = self.rebuild_file(store, &path, settings, patterns) {
                log::warn!("could not index {}: {}", path.display(), e);
            }
        }
        log::info!("indexed headings for {} files", self.files.len());
    }
}
