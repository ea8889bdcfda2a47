//! Config loading facade: one entry point over the layered sources.

use super::merge::merge_policy;
use super::sources::{env, global_file, workspace_file};
use super::ForgeConfig;
use crate::error::ForgeError;
use config::File;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a base directory.
    ///
    /// Precedence (highest last): defaults, global file, `<base_dir>/mta-forge.toml`,
    /// `MTA_FORGE_*` environment variables.
    pub fn load(base_dir: &Path) -> Result<ForgeConfig, ForgeError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = workspace_file::add_to_builder(builder, base_dir)?;
        let builder = env::add_to_builder(builder)?;

        let mut config: ForgeConfig = builder.build()?.try_deserialize()?;
        // The directory we were asked to load from is authoritative unless a
        // source set it explicitly.
        if config.base_dir == Path::new(".") {
            config.base_dir = base_dir.to_path_buf();
        }
        Ok(config)
    }

    /// Load configuration from an explicit file, skipping the global and
    /// workspace files. Environment variables still apply.
    pub fn load_from_file(path: &Path) -> Result<ForgeConfig, ForgeError> {
        if !path.is_file() {
            return Err(ForgeError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = env::add_to_builder(builder)?;
        Ok(builder.build()?.try_deserialize()?)
    }
}
