//! Command-line interface for peercheck.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompletionsArgs};
pub use commands::{CheckCommand, Command, CommandDispatcher, CommandResult};
