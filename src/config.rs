//! Configuration System
//!
//! Layered configuration built with the `config` crate. The resolved
//! [`ForgeConfig`] is passed explicitly to the generator and logger; nothing is
//! kept in process-wide state.

use crate::logging::LoggingConfig;
use crate::serializer::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::workspace_file::WORKSPACE_CONFIG_FILE;

/// Default output directory name, relative to the base directory.
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgeConfig {
    /// Directory holding `base.yml` and the fragment directories
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Where descriptors are written (defaults to `<base_dir>/output`)
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Encoding of written descriptors
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            output_dir: None,
            output_format: OutputFormat::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl ForgeConfig {
    /// Output directory, falling back to `<base_dir>/output`.
    pub fn resolve_output_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| self.base_dir.join(DEFAULT_OUTPUT_DIR))
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.base_dir.as_os_str().is_empty() {
            errors.push("base_dir cannot be empty".to_string());
        }
        if let Some(output_dir) = &self.output_dir {
            if output_dir.as_os_str().is_empty() {
                errors.push("output_dir cannot be empty".to_string());
            }
        }
        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
