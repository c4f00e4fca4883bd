//! Command-line interface for the navigator.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CitiesArgs, Cli, Commands, CompletionsArgs, FastestArgs, MapArgs, RouteArgs,
};
pub use commands::{Command, CommandDispatcher, CommandResult};
