//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use crate::cli::args::{Cli, Commands};
use crate::config::NavConfig;
use crate::error::Result;
use crate::ui::UserInterface;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Arguments
    ///
    /// * `ui` - User interface for displaying output and prompts
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    config: NavConfig,
}

impl CommandDispatcher {
    /// Create a dispatcher over the effective configuration.
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Dispatch and execute a command.
    ///
    /// Without a subcommand the interactive menus are opened.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &cli.command {
            None | Some(Commands::Interactive) => {
                super::interactive::InteractiveCommand::new(self.config.clone()).execute(ui)
            }
            Some(Commands::Route(args)) => {
                super::route::RouteCommand::new(&self.config, args.clone()).execute(ui)
            }
            Some(Commands::Fastest(args)) => {
                super::fastest::FastestCommand::new(&self.config, args.clone()).execute(ui)
            }
            Some(Commands::Map(args)) => {
                super::map::MapCommand::new(&self.config, args.clone()).execute(ui)
            }
            Some(Commands::Cities(args)) => {
                super::cities::CitiesCommand::new(&self.config, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_keeps_config() {
        let mut config = NavConfig::default();
        config.example_trips = false;
        let dispatcher = CommandDispatcher::new(config);
        assert!(!dispatcher.config().example_trips);
    }

    #[test]
    fn dispatch_routes_completions() {
        let cli = Cli::try_parse_from(["navigator", "completions", "bash"]).unwrap();
        let dispatcher = CommandDispatcher::new(NavConfig::default());
        let mut ui = MockUI::new();
        let result = dispatcher.dispatch(&cli, &mut ui).unwrap();
        assert!(result.success);
    }
}
