//! Workspace config file source: <base_dir>/mta-forge.toml
//!
//! Relative paths in this file are relative to the base directory holding it,
//! not to the process working directory.

use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;
use std::path::{Path, PathBuf};

pub const WORKSPACE_CONFIG_FILE: &str = "mta-forge.toml";

/// Keys whose values are paths anchored at the base directory.
const PATH_KEYS: &[&str] = &["base_dir", "output_dir"];

pub fn workspace_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(WORKSPACE_CONFIG_FILE)
}

/// Add the workspace config file to builder when present, followed by its
/// path keys rewritten against `base_dir`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    base_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_config_path(base_dir);
    if !path.is_file() {
        return Ok(builder);
    }

    let contents = Config::builder()
        .add_source(File::from(path.as_path()))
        .build()?;
    let mut anchored = Config::builder();
    for key in PATH_KEYS {
        let Ok(value) = contents.get_string(key) else {
            continue;
        };
        let value = PathBuf::from(value);
        if value.is_relative() {
            anchored =
                anchored.set_override(*key, base_dir.join(value).to_string_lossy().into_owned())?;
        }
    }

    Ok(builder
        .add_source(File::from(path.as_path()))
        .add_source(anchored.build()?))
}
