//! CLI domain: parse, route, help, output, and presentation only.
//! No merge logic; the route table dispatches to the generator.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, GenerateCommands};
pub use presentation::format_generation_summary;
pub use route::{resolve_config, RunContext};
