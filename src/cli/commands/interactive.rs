//! Interactive command implementation.
//!
//! `navigator` (or `navigator interactive`) checks the city data file,
//! builds the navigation system and hands over to the menus.

use std::fs::File;
use std::path::{Path, PathBuf};

use crate::config::NavConfig;
use crate::error::{NavError, Result};
use crate::menus::{input_box, main_menu, MenuSettings};
use crate::system::NavigationSystem;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The interactive command implementation.
pub struct InteractiveCommand {
    config: NavConfig,
}

impl InteractiveCommand {
    pub fn new(config: NavConfig) -> Self {
        Self { config }
    }

    /// Settings used by the menus.
    pub fn settings(&self) -> MenuSettings {
        MenuSettings::from_config(&self.config)
    }

    fn build_system(&self, data_file: &Path) -> Result<NavigationSystem> {
        let mut system = NavigationSystem::load(data_file)?;
        for vehicle in &self.config.fleet {
            system.add_vehicle(*vehicle);
        }
        if self.config.example_trips {
            if let Err(e) = system.add_example_trips() {
                tracing::warn!("Example trips were not added: {}", e);
            }
        }
        Ok(system)
    }
}

impl Command for InteractiveCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let Some(data_file) = locate_data_file(ui, &self.config.data_file)? else {
            return Ok(CommandResult::success());
        };
        tracing::debug!("Using city data from {}", data_file.display());

        let mut system = self.build_system(&data_file)?;
        main_menu(ui, &mut system, &self.settings())?;
        Ok(CommandResult::success())
    }
}

fn is_readable(path: &Path) -> bool {
    File::open(path).is_ok() && path.is_file()
}

fn validate_data_file(raw: &str) -> std::result::Result<PathBuf, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Filename cannot be empty.".to_string());
    }
    let path = PathBuf::from(trimmed);
    if is_readable(&path) {
        Ok(path)
    } else {
        Err(format!("'{}' File does not exist or access denied.", trimmed))
    }
}

/// Return `configured` if it can be read, otherwise ask for another file.
///
/// Returns `None` if the operator gives up.
fn locate_data_file(ui: &mut dyn UserInterface, configured: &Path) -> Result<Option<PathBuf>> {
    if is_readable(configured) {
        return Ok(Some(configured.to_path_buf()));
    }
    if !ui.is_interactive() {
        return Err(NavError::DataFileNotFound {
            path: configured.to_path_buf(),
        });
    }
    tracing::warn!("Data file {} is not readable", configured.display());
    input_box(
        ui,
        "data_file",
        "Source File",
        "Please enter a filename or path and hit enter.",
        Some(format!(
            "'{}' File does not exist or access denied.",
            configured.display()
        )),
        validate_data_file,
    )
}
