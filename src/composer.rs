//! Descriptor composition.
//!
//! One pass per scope: read `base.yml`, load the `resources/`, `modules/` and
//! `shared/` collections beside it, apply shared overlays to the modules, then
//! assemble the descriptor. Only a missing base file is an error of absence;
//! missing fragment directories yield empty collections.

use crate::collection::NamedCollection;
use crate::document::{Document, Scalar};
use crate::error::ForgeError;
use crate::loader::Loader;
use crate::overlay::apply_shared;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const BASE_CONFIG_FILES: &[&str] = &["base.yml", "base.yaml"];
pub const RESOURCES_DIR: &str = "resources";
pub const MODULES_DIR: &str = "modules";
pub const SHARED_DIR: &str = "shared";
pub const EXTENSIONS_DIR: &str = "extensions";

pub const MODULES_KEY: &str = "modules";
pub const RESOURCES_KEY: &str = "resources";

/// Unit of generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The primary deployment descriptor, rooted at the base directory.
    Deployment,
    /// A named extension, rooted at `extensions/<name>/`.
    Extension(String),
}

impl Scope {
    /// Directory holding this scope's `base.yml` and fragment directories.
    pub fn root(&self, base_dir: &Path) -> PathBuf {
        match self {
            Scope::Deployment => base_dir.to_path_buf(),
            Scope::Extension(name) => base_dir.join(EXTENSIONS_DIR).join(name),
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Deployment => write!(f, "deployment"),
            Scope::Extension(name) => write!(f, "extension '{}'", name),
        }
    }
}

/// Builds descriptors for scopes under one base directory.
pub struct DescriptorComposer<L: Loader> {
    base_dir: PathBuf,
    loader: L,
}

impl<L: Loader> DescriptorComposer<L> {
    pub fn new(base_dir: impl Into<PathBuf>, loader: L) -> Self {
        Self {
            base_dir: base_dir.into(),
            loader,
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Run one generation pass for `scope` and return the merged descriptor.
    pub fn compose(&self, scope: &Scope) -> Result<Document, ForgeError> {
        let root = scope.root(&self.base_dir);

        let base = self.load_base(scope, &root)?;
        let resources = self.load_collection(&root, RESOURCES_DIR)?;
        let mut modules = self.load_collection(&root, MODULES_DIR)?;
        let shared = self.load_collection(&root, SHARED_DIR)?;

        if !shared.is_empty() {
            debug!(scope = %scope, groups = shared.len(), "Processing shared configurations");
            let report = apply_shared(&shared, &mut modules);
            debug!(
                scope = %scope,
                applied = report.applied,
                skipped_kind_mismatch = report.skipped_kind_mismatch,
                unknown_targets = report.unknown_targets,
                malformed = report.malformed,
                "Shared configurations applied"
            );
        }

        Ok(assemble(&base, modules, resources))
    }

    fn load_base(&self, scope: &Scope, root: &Path) -> Result<Document, ForgeError> {
        for file in BASE_CONFIG_FILES {
            let path = root.join(file);
            info!(path = %path.display(), "Reading base configuration file");
            let Some(base) = self.loader.load_document(&path)? else {
                continue;
            };
            return match base {
                Document::Mapping(map) => Ok(Document::Mapping(map)),
                // An empty file parses to null.
                Document::Scalar(Scalar::Null) => Ok(Document::mapping()),
                other => Err(ForgeError::FragmentParse {
                    path,
                    message: format!("base configuration must be a mapping, found {}", other.kind()),
                }),
            };
        }

        Err(ForgeError::MissingBaseConfig {
            scope: scope.to_string(),
            path: root.join(BASE_CONFIG_FILES[0]),
        })
    }

    fn load_collection(&self, root: &Path, dir_name: &str) -> Result<NamedCollection, ForgeError> {
        let dir = root.join(dir_name);
        debug!(path = %dir.display(), "Reading fragment directory");
        self.loader.load_collection(&dir)
    }
}

/// Shallow-copy the base keys, then set `modules` and `resources` to the
/// flattened collections.
pub fn assemble(base: &Document, modules: NamedCollection, resources: NamedCollection) -> Document {
    let mut descriptor = Document::mapping();
    descriptor.copy_fields_from(base);
    descriptor.insert(MODULES_KEY, modules.into_sequence());
    descriptor.insert(RESOURCES_KEY, resources.into_sequence());
    descriptor
}
