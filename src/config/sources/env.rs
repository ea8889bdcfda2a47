//! Environment source: MTA_FORGE_* variables, `__` separates nested keys.
//!
//! `MTA_FORGE_OUTPUT_DIR=dist` sets `output_dir`,
//! `MTA_FORGE_LOGGING__LEVEL=debug` sets `logging.level`.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

pub const ENV_PREFIX: &str = "MTA_FORGE";

pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    ))
}
