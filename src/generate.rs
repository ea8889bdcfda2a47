//! Descriptor generation: compose scopes and write them to the output directory.
//!
//! Layout written:
//! - `<output>/mta.yaml` for the deployment scope
//! - `<output>/descriptors/<name>.mtaext` for each directory under `<base>/extensions/`
//!
//! A file is written only after its scope composed and rendered successfully,
//! through a temporary sibling that is renamed into place.

use crate::composer::{DescriptorComposer, Scope, EXTENSIONS_DIR};
use crate::error::ForgeError;
use crate::loader::Loader;
use crate::serializer::{render, OutputFormat};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const DEPLOYMENT_FILE: &str = "mta.yaml";
pub const DESCRIPTORS_DIR: &str = "descriptors";
pub const EXTENSION_FILE_SUFFIX: &str = "mtaext";

/// What to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationKind {
    Deployment,
    Extension,
    /// Deployment, then every extension. A deployment failure stops the run.
    All,
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationKind::Deployment => write!(f, "deployment"),
            GenerationKind::Extension => write!(f, "extension"),
            GenerationKind::All => write!(f, "all"),
        }
    }
}

/// Files written by one generation run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub written: Vec<PathBuf>,
}

pub struct Generator<L: Loader> {
    composer: DescriptorComposer<L>,
    output_dir: PathBuf,
    format: OutputFormat,
}

impl<L: Loader> Generator<L> {
    pub fn new(
        base_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        loader: L,
        format: OutputFormat,
    ) -> Self {
        Self {
            composer: DescriptorComposer::new(base_dir, loader),
            output_dir: output_dir.into(),
            format,
        }
    }

    pub fn generate(&self, kind: GenerationKind) -> Result<GenerationSummary, ForgeError> {
        info!(kind = %kind, output_dir = %self.output_dir.display(), "Starting generation");
        let mut summary = GenerationSummary::default();
        match kind {
            GenerationKind::Deployment => {
                summary.written.push(self.generate_deployment()?);
            }
            GenerationKind::Extension => {
                summary.written.extend(self.generate_extensions()?);
            }
            GenerationKind::All => {
                summary.written.push(self.generate_deployment()?);
                summary.written.extend(self.generate_extensions()?);
            }
        }
        Ok(summary)
    }

    /// Compose the deployment scope and write `mta.yaml`.
    pub fn generate_deployment(&self) -> Result<PathBuf, ForgeError> {
        info!("Generating {}", DEPLOYMENT_FILE);
        let descriptor = self.composer.compose(&Scope::Deployment)?;
        let text = render(&descriptor, self.format)?;

        let path = self.output_dir.join(DEPLOYMENT_FILE);
        info!(path = %path.display(), "Writing descriptor");
        write_atomic(&path, &text)?;
        Ok(path)
    }

    /// Compose and write every extension.
    ///
    /// Extensions are independent: a failing one is logged and the rest still
    /// run. Files already written are kept. When any extension failed the
    /// result is `ExtensionsFailed` naming them.
    pub fn generate_extensions(&self) -> Result<Vec<PathBuf>, ForgeError> {
        let extensions_dir = self.composer.base_dir().join(EXTENSIONS_DIR);
        info!(path = %extensions_dir.display(), "Reading extensions directory");

        let names = self.composer.loader().list_directories(&extensions_dir)?;
        if names.is_empty() {
            info!(path = %extensions_dir.display(), "No extensions found");
            return Ok(Vec::new());
        }
        debug!(count = names.len(), "Found extensions");

        let descriptors_dir = self.output_dir.join(DESCRIPTORS_DIR);
        info!(path = %descriptors_dir.display(), "Creating descriptors directory");
        fs::create_dir_all(&descriptors_dir).map_err(|e| ForgeError::io(&descriptors_dir, e))?;

        let mut written = Vec::new();
        let mut failed = Vec::new();
        for name in names {
            info!(name = %name, "Creating descriptor for extension");
            let path = descriptors_dir.join(format!("{}.{}", name, EXTENSION_FILE_SUFFIX));
            match self.generate_extension(&name, &path) {
                Ok(()) => {
                    debug!(path = %path.display(), "Successfully wrote descriptor file");
                    written.push(path);
                }
                Err(e) => {
                    error!(extension = %name, error = %e, "Failed to create descriptor");
                    failed.push(name);
                }
            }
        }

        if !failed.is_empty() {
            return Err(ForgeError::ExtensionsFailed { failed });
        }

        info!("Extension generation completed successfully");
        Ok(written)
    }

    fn generate_extension(&self, name: &str, path: &Path) -> Result<(), ForgeError> {
        let descriptor = self.composer.compose(&Scope::Extension(name.to_string()))?;
        let text = render(&descriptor, self.format)?;
        info!(path = %path.display(), "Writing descriptor to file");
        write_atomic(path, &text)
    }
}

/// Write `contents` to `path` through a temporary sibling file and rename.
fn write_atomic(path: &Path, contents: &str) -> Result<(), ForgeError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ForgeError::io(parent, e))?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    if let Err(e) = fs::write(&tmp_path, contents) {
        let _ = fs::remove_file(&tmp_path);
        return Err(ForgeError::io(&tmp_path, e));
    }
    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        ForgeError::io(path, e)
    })
}
