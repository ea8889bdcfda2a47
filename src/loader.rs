//! Fragment loading.
//!
//! The composer reads everything through the [`Loader`] trait. [`FsLoader`] is the
//! filesystem implementation: it parses `.yml`/`.yaml` as YAML and `.json` as JSON,
//! and treats an absent directory as an empty collection.

pub mod walker;

use crate::collection::NamedCollection;
use crate::document::Document;
use crate::error::ForgeError;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walker::Walker;

/// Source of documents and named collections.
pub trait Loader {
    /// Parse one file. `Ok(None)` when the file does not exist.
    fn load_document(&self, path: &Path) -> Result<Option<Document>, ForgeError>;

    /// Parse every fragment directly under `dir`, keyed by file stem, in file-name
    /// order. A missing directory yields an empty collection.
    fn load_collection(&self, dir: &Path) -> Result<NamedCollection, ForgeError>;

    /// Names of the subdirectories of `dir`, sorted. A missing directory yields
    /// an empty list.
    fn list_directories(&self, dir: &Path) -> Result<Vec<String>, ForgeError>;
}

/// Loader backed by the local filesystem.
#[derive(Debug, Clone, Default)]
pub struct FsLoader;

impl FsLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Loader for FsLoader {
    fn load_document(&self, path: &Path) -> Result<Option<Document>, ForgeError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(ForgeError::io(path, e)),
        };
        parse_fragment(path, &text).map(Some)
    }

    fn load_collection(&self, dir: &Path) -> Result<NamedCollection, ForgeError> {
        let mut collection = NamedCollection::new();
        if !dir.is_dir() {
            info!(path = %dir.display(), "Fragment directory not found");
            return Ok(collection);
        }

        for path in Walker::new(dir.to_path_buf()).files()? {
            let Some(name) = fragment_name(&path) else {
                continue;
            };
            let text = std::fs::read_to_string(&path).map_err(|e| ForgeError::io(&path, e))?;
            let document = parse_fragment(&path, &text)?;
            debug!(path = %path.display(), name = %name, "Loaded fragment");
            if collection.insert(name.clone(), document).is_some() {
                // web.yaml and web.yml both present: the later file name wins.
                debug!(name = %name, path = %path.display(), "Fragment name defined twice");
            }
        }

        Ok(collection)
    }

    fn list_directories(&self, dir: &Path) -> Result<Vec<String>, ForgeError> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        Ok(Walker::new(dir.to_path_buf())
            .directories()?
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect())
    }
}

fn fragment_name(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().into_owned())
}

/// Parse fragment text according to the file extension.
pub fn parse_fragment(path: &Path, text: &str) -> Result<Document, ForgeError> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        Document::from_json_str(text).map_err(|e| parse_error(path, e.to_string()))
    } else {
        Document::from_yaml_str(text).map_err(|e| parse_error(path, e.to_string()))
    }
}

fn parse_error(path: &Path, message: String) -> ForgeError {
    ForgeError::FragmentParse {
        path: PathBuf::from(path),
        message,
    }
}
