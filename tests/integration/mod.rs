//! Integration tests for descriptor generation

mod cli_generate;
mod compose_scenarios;
mod test_utils;
