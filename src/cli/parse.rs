//! CLI parse: clap types for mta-forge. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Mta Forge - generate MTA and MTA extension descriptors from templates
#[derive(Parser)]
#[command(name = "mf")]
#[command(version)]
#[command(about = "Mta Forge is a tool to generate MTA & MTA Extension resources")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base directory where the templates are located (default: current directory)
    #[arg(short = 'b', long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Directory where generated files are saved (default: <base-dir>/output)
    #[arg(short = 'o', long, global = true)]
    pub output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Human-readable, colored log output instead of JSON
    #[arg(short = 'l', long, global = true)]
    pub local: bool,

    /// Include source file and line in log events
    #[arg(long, global = true)]
    pub expand_source: bool,

    /// Configuration file path (overrides default config loading)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Descriptor encoding (yaml, json)
    #[arg(long, global = true)]
    pub format: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate mta.yaml and *.mtaext files
    Generate {
        #[command(subcommand)]
        command: Option<GenerateCommands>,
    },
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq, Debug)]
pub enum GenerateCommands {
    /// Generate the mta.yaml deployment descriptor
    Deployment,
    /// Generate *.mtaext files, one per directory under extensions/
    Extension,
}
