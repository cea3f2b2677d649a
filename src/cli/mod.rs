//! CLI module for scorepack
//!
//! This module provides the command-line interface, including:
//! - Argument parsing (`args`)
//! - Command handlers (`commands`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod commands;
pub mod setup;

pub use args::{Cli, Commands};
pub use commands::{handle_init_command, handle_pack_command, handle_unpack_command};
pub use setup::{create_formatting_config, init_logging, log_level};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    args::parse_args()
}
