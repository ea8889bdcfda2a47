//! CLI command-name contract for logging and routing.

use crate::cli::parse::{Commands, GenerateCommands};
use crate::generate::GenerationKind;

/// Command name string for log events (e.g. "generate", "generate.extension").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Generate { command: None } => "generate".to_string(),
        Commands::Generate {
            command: Some(sub),
        } => format!("generate.{}", generate_command_name(sub)),
    }
}

pub fn generate_command_name(command: &GenerateCommands) -> &'static str {
    match command {
        GenerateCommands::Deployment => "deployment",
        GenerateCommands::Extension => "extension",
    }
}

/// Generation kind selected by a command.
pub fn generation_kind(command: &Commands) -> GenerationKind {
    match command {
        Commands::Generate { command: None } => GenerationKind::All,
        Commands::Generate {
            command: Some(GenerateCommands::Deployment),
        } => GenerationKind::Deployment,
        Commands::Generate {
            command: Some(GenerateCommands::Extension),
        } => GenerationKind::Extension,
    }
}
