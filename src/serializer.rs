//! Descriptor serialization.

use crate::document::Document;
use crate::error::ForgeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Text encoding of written descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Yaml,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Yaml => write!(f, "yaml"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ForgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            "json" => Ok(OutputFormat::Json),
            other => Err(ForgeError::Config(format!(
                "Invalid output format: {} (must be 'yaml' or 'json')",
                other
            ))),
        }
    }
}

/// Encode a descriptor. Output is stable: the same document always renders to
/// the same bytes.
pub fn render(document: &Document, format: OutputFormat) -> Result<String, ForgeError> {
    match format {
        OutputFormat::Yaml => {
            serde_yaml::to_string(document).map_err(|e| ForgeError::Serialize(e.to_string()))
        }
        OutputFormat::Json => serde_json::to_string_pretty(document)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| ForgeError::Serialize(e.to_string())),
    }
}
