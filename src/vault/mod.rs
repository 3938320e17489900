//! A directory of markdown files on disk.
//!
//! [`Vault`] is both the file store and the metadata cache: it knows which
//! markdown files exist and keeps their parsed headings, refreshed when the
//! change watcher reports an edit.

pub mod watcher;

pub use watcher::{VaultEvent, VaultWatcher};

use crate::error::{Error, Result};
use crate::host::{FileStore, MetadataCache, StructuralHeading};
use crate::parser::{self, utils::is_markdown_path};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct Vault {
    root: PathBuf,
    /// Vault-relative markdown paths, sorted
    files: Vec<PathBuf>,
    headings: HashMap<PathBuf, Vec<StructuralHeading>>,
}

impl Vault {
    /// Open the vault rooted at `root` and parse every markdown file in it.
    pub fn open(root: &Path) -> Result<Self> {
        if !root.is_dir() {
            return Err(Error::VaultUnavailable(root.to_path_buf()));
        }
        let root = root.canonicalize()?;
        let mut vault = Self {
            root,
            files: Vec::new(),
            headings: HashMap::new(),
        };
        vault.scan()?;
        Ok(vault)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn absolute(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }

    /// Vault-relative form of an absolute path inside the vault.
    pub fn relative(&self, path: &Path) -> Option<PathBuf> {
        path.strip_prefix(&self.root).ok().map(Path::to_path_buf)
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.binary_search_by(|p| p.as_path().cmp(path)).is_ok()
    }

    /// Walk the vault again and re-parse every file.
    pub fn scan(&mut self) -> Result<()> {
        let mut files = Vec::new();
        collect_markdown(&self.root, &self.root, &mut files)?;
        files.sort();

        self.headings.clear();
        self.files = files;
        for path in self.files.clone() {
            self.refresh(&path);
        }
        log::info!(
            "scanned {} markdown files under {}",
            self.files.len(),
            self.root.display()
        );
        Ok(())
    }

    /// Re-parse one file into the metadata cache.
    ///
    /// An unreadable file loses its cache entry.
    pub fn refresh(&mut self, path: &Path) {
        match parser::parse_file(&self.absolute(path)) {
            Ok(headings) => {
                self.headings.insert(path.to_path_buf(), headings);
            }
            Err(e) => {
                log::debug!("dropping cached headings for {}: {}", path.display(), e);
                self.headings.remove(path);
            }
        }
    }

    /// Track a newly created file. Returns `false` if it was already known.
    pub fn add_file(&mut self, path: &Path) -> bool {
        match self.files.binary_search_by(|p| p.as_path().cmp(path)) {
            Ok(_) => false,
            Err(pos) => {
                self.files.insert(pos, path.to_path_buf());
                self.refresh(path);
                true
            }
        }
    }

    pub fn remove_file(&mut self, path: &Path) -> bool {
        self.headings.remove(path);
        match self.files.binary_search_by(|p| p.as_path().cmp(path)) {
            Ok(pos) => {
                self.files.remove(pos);
                true
            }
            Err(_) => false,
        }
    }

    /// Move `from` to `to`. A file already tracked at `to` is re-read.
    pub fn rename_file(&mut self, from: &Path, to: &Path) {
        self.remove_file(from);
        if !self.add_file(to) {
            self.refresh(to);
        }
    }
}

impl MetadataCache for Vault {
    fn headings(&self, path: &Path) -> Option<&[StructuralHeading]> {
        self.headings.get(path).map(Vec::as_slice)
    }
}

impl FileStore for Vault {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(self.absolute(path))
    }

    fn markdown_files(&self) -> Vec<PathBuf> {
        self.files.clone()
    }
}

/// Recursively collect markdown files, skipping hidden entries.
fn collect_markdown(root: &Path, dir: &Path, out: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let hidden = entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false);
        if hidden {
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_markdown(root, &path, out)?;
        } else if file_type.is_file() && is_markdown_path(&path) {
            if let Ok(rel) = path.strip_prefix(root) {
                out.push(rel.to_path_buf());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_vault() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.md"), "# B\n").unwrap();
        fs::create_dir(dir.path().join("notes")).unwrap();
        fs::write(dir.path().join("notes").join("a.md"), "# A\n\n## A2\n").unwrap();
        fs::write(dir.path().join("image.png"), [0u8; 4]).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("x.md"), "# hidden").unwrap();
        dir
    }

    #[test]
    fn test_open_collects_markdown_files() {
        let dir = sample_vault();
        let vault = Vault::open(dir.path()).unwrap();
        assert_eq!(
            vault.files(),
            &[PathBuf::from("b.md"), PathBuf::from("notes/a.md")]
        );
        let headings = vault.headings(Path::new("notes/a.md")).unwrap();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[1].line, 2);
    }

    #[test]
    fn test_open_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            Vault::open(&missing),
            Err(Error::VaultUnavailable(_))
        ));
    }

    #[test]
    fn test_refresh_picks_up_edits() {
        let dir = sample_vault();
        let mut vault = Vault::open(dir.path()).unwrap();
        fs::write(dir.path().join("b.md"), "# B\n\n## New\n").unwrap();

        assert_eq!(vault.headings(Path::new("b.md")).unwrap().len(), 1);
        vault.refresh(Path::new("b.md"));
        assert_eq!(vault.headings(Path::new("b.md")).unwrap().len(), 2);
    }

    #[test]
    fn test_add_remove_rename() {
        let dir = sample_vault();
        let mut vault = Vault::open(dir.path()).unwrap();

        fs::write(dir.path().join("c.md"), "# C\n").unwrap();
        assert!(vault.add_file(Path::new("c.md")));
        assert!(!vault.add_file(Path::new("c.md")));
        assert!(vault.contains(Path::new("c.md")));

        fs::rename(dir.path().join("c.md"), dir.path().join("d.md")).unwrap();
        vault.rename_file(Path::new("c.md"), Path::new("d.md"));
        assert!(!vault.contains(Path::new("c.md")));
        assert!(vault.headings(Path::new("c.md")).is_none());
        assert_eq!(vault.headings(Path::new("d.md")).unwrap()[0].text, "C");

        assert!(vault.remove_file(Path::new("d.md")));
        assert!(!vault.remove_file(Path::new("d.md")));
    }

    #[test]
    fn test_rename_onto_existing_file() {
        let dir = sample_vault();
        let mut vault = Vault::open(dir.path()).unwrap();
        fs::write(dir.path().join("c.md"), "# C\n\n## C2\n").unwrap();
        assert!(vault.add_file(Path::new("c.md")));

        fs::rename(dir.path().join("c.md"), dir.path().join("b.md")).unwrap();
        vault.rename_file(Path::new("c.md"), Path::new("b.md"));

        assert_eq!(
            vault.files(),
            &[PathBuf::from("b.md"), PathBuf::from("notes/a.md")]
        );
        let headings = vault.headings(Path::new("b.md")).unwrap();
        assert_eq!(headings.len(), 2);
        assert_eq!(headings[0].text, "C");
    }

    #[test]
    fn test_relative_paths() {
        let dir = sample_vault();
        let vault = Vault::open(dir.path()).unwrap();
        let abs = vault.absolute(Path::new("notes/a.md"));
        assert_eq!(vault.relative(&abs), Some(PathBuf::from("notes/a.md")));
        assert_eq!(vault.read_text(Path::new("b.md")).unwrap(), "# B\n");
    }
}
