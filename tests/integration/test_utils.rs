//! Shared fixtures for integration tests.
//!
//! A `TemplateTree` is a temporary base directory that tests populate with
//! `base.yml`, fragment files and extension directories.

use mta_forge::composer::{DescriptorComposer, Scope};
use mta_forge::document::Document;
use mta_forge::error::ForgeError;
use mta_forge::loader::FsLoader;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TemplateTree {
    dir: TempDir,
}

impl TemplateTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("output")
    }

    /// Write `text` at `rel`, creating parent directories.
    pub fn write(&self, rel: &str, text: &str) -> &Self {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
        self
    }

    pub fn compose(&self, scope: &Scope) -> Result<Document, ForgeError> {
        DescriptorComposer::new(self.root(), FsLoader::new()).compose(scope)
    }
}

pub fn yaml(text: &str) -> Document {
    Document::from_yaml_str(text).unwrap()
}
