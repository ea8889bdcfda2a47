//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ForgeError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &ForgeError) -> String {
    match e {
        ForgeError::MissingBaseConfig { .. } => {
            format!("{}\nHint: pass --base-dir pointing at the directory holding base.yml", e)
        }
        _ => e.to_string(),
    }
}
