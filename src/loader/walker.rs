//! Directory walker for fragment discovery

use crate::error::ForgeError;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory entry types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file with one of the accepted fragment extensions
    File { path: PathBuf },
    /// A directory directly under the root
    Directory { path: PathBuf },
}

impl Entry {
    pub fn path(&self) -> &Path {
        match self {
            Entry::File { path } | Entry::Directory { path } => path,
        }
    }
}

/// File extensions accepted as fragments, without the dot.
pub const FRAGMENT_EXTENSIONS: &[&str] = &["yml", "yaml", "json"];

/// Fragment directory walker. Lists direct children only.
pub struct Walker {
    root: PathBuf,
}

impl Walker {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Walk the root and collect fragment files and subdirectories.
    ///
    /// Returns entries sorted by path so discovery order is stable across hosts.
    /// Symlinks are resolved to their targets; a dangling link is an I/O error.
    pub fn walk(&self) -> Result<Vec<Entry>, ForgeError> {
        let mut entries = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .max_depth(1);

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone());
                ForgeError::io(path, std::io::Error::from(e))
            })?;

            let path = entry.path().to_path_buf();

            // Skip the root directory itself (we only want its contents)
            if path == self.root {
                continue;
            }

            let file_type = entry.file_type();
            if file_type.is_file() {
                if self.has_fragment_extension(&path) {
                    entries.push(Entry::File { path });
                }
            } else if file_type.is_dir() {
                entries.push(Entry::Directory { path });
            }
        }

        entries.sort_by(|a, b| a.path().cmp(b.path()));

        Ok(entries)
    }

    /// Fragment files only, sorted by path.
    pub fn files(&self) -> Result<Vec<PathBuf>, ForgeError> {
        Ok(self
            .walk()?
            .into_iter()
            .filter_map(|e| match e {
                Entry::File { path } => Some(path),
                Entry::Directory { .. } => None,
            })
            .collect())
    }

    /// Subdirectories only, sorted by path.
    pub fn directories(&self) -> Result<Vec<PathBuf>, ForgeError> {
        Ok(self
            .walk()?
            .into_iter()
            .filter_map(|e| match e {
                Entry::Directory { path } => Some(path),
                Entry::File { .. } => None,
            })
            .collect())
    }

    fn has_fragment_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| FRAGMENT_EXTENSIONS.contains(&ext))
            .unwrap_or(false)
    }
}
