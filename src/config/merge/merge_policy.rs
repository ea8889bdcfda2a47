//! Merge rules: defaults, override order, conflict handling.
//!
//! Sources are layered lowest to highest: defaults, global file, workspace
//! file, environment. CLI flags are applied last by the binary.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("base_dir", ".")?
        .set_default("output_format", "yaml")?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "json")?
        .set_default("logging.output", "stderr")
}
