//! Error types for descriptor generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while composing or writing descriptors.
///
/// Every variant except `Config` is fatal for the scope that raised it only;
/// sibling scopes are unaffected. Malformed shared-config overlays are not
/// represented here: they are logged and skipped.
#[derive(Debug, Error)]
pub enum ForgeError {
    #[error("Base configuration for {scope} not found at {}", path.display())]
    MissingBaseConfig { scope: String, path: PathBuf },

    #[error("Failed to parse fragment {}: {message}", path.display())]
    FragmentParse { path: PathBuf, message: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize descriptor: {0}")]
    Serialize(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extension generation failed for: {}", failed.join(", "))]
    ExtensionsFailed { failed: Vec<String> },
}

impl ForgeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ForgeError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when the error came from a missing `base.yml`.
    pub fn is_missing_base_config(&self) -> bool {
        matches!(self, ForgeError::MissingBaseConfig { .. })
    }
}

impl From<config::ConfigError> for ForgeError {
    fn from(err: config::ConfigError) -> Self {
        ForgeError::Config(err.to_string())
    }
}
