//! CLI route: config resolution and run context. Dispatches to the generator
//! and presentation.

use crate::cli::help::{command_name, generation_kind};
use crate::cli::parse::{Cli, Commands};
use crate::cli::presentation::format_generation_summary;
use crate::config::{ConfigLoader, ForgeConfig};
use crate::error::ForgeError;
use crate::generate::Generator;
use crate::loader::FsLoader;
use std::path::{Path, PathBuf};
use tracing::info;

/// Build the effective configuration from config sources and CLI flags.
/// Precedence: CLI flags override config file override defaults.
pub fn resolve_config(cli: &Cli) -> Result<ForgeConfig, ForgeError> {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)?
    } else {
        let base_dir = cli.base_dir.as_deref().unwrap_or_else(|| Path::new("."));
        ConfigLoader::load(base_dir)?
    };

    if let Some(ref base_dir) = cli.base_dir {
        config.base_dir = base_dir.clone();
    }
    if let Some(ref output_dir) = cli.output_dir {
        config.output_dir = Some(output_dir.clone());
    }
    if let Some(ref format) = cli.format {
        config.output_format = format.parse()?;
    }

    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if cli.local {
        config.logging.format = "text".to_string();
    }
    if cli.expand_source {
        config.logging.source = true;
    }

    config.validate().map_err(|errors| {
        ForgeError::Config(format!(
            "Configuration validation failed:\n{}",
            errors.join("\n")
        ))
    })?;

    Ok(config)
}

/// Runtime context for CLI execution: the resolved configuration.
pub struct RunContext {
    config: ForgeConfig,
    output_dir: PathBuf,
}

impl RunContext {
    pub fn new(config: ForgeConfig) -> Self {
        let output_dir = config.resolve_output_dir();
        Self { config, output_dir }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Run a command and return the text to print on success.
    pub fn execute(&self, command: &Commands) -> Result<String, ForgeError> {
        info!(
            command = %command_name(command),
            base_dir = %self.config.base_dir.display(),
            output_dir = %self.output_dir.display(),
            format = %self.config.output_format,
            "running mta-forge"
        );

        let generator = Generator::new(
            self.config.base_dir.clone(),
            self.output_dir.clone(),
            FsLoader::new(),
            self.config.output_format,
        );
        let summary = generator.generate(generation_kind(command))?;

        let color = self.config.logging.format == "text" && self.config.logging.color;
        Ok(format_generation_summary(&summary, color))
    }
}
