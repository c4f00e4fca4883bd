//! Fastest command implementation.
//!
//! `navigator fastest Melbourne Canberra Tokyo` compares every vehicle on a
//! fixed trip and reports the quickest one.

use crate::atlas::Atlas;
use crate::cli::args::FastestArgs;
use crate::config::NavConfig;
use crate::error::Result;
use crate::ui::UserInterface;
use crate::vehicle::Vehicle;

use super::dispatcher::{Command, CommandResult};
use super::resolve_trip;

/// The fastest command implementation.
pub struct FastestCommand {
    data_file: std::path::PathBuf,
    fleet: Vec<Vehicle>,
    args: FastestArgs,
}

impl FastestCommand {
    /// Vehicles given on the command line replace the configured fleet.
    pub fn new(config: &NavConfig, args: FastestArgs) -> Self {
        Self {
            data_file: config.data_file.clone(),
            fleet: config.fleet.clone(),
            args,
        }
    }

    fn vehicles(&self) -> &[Vehicle] {
        if self.args.vehicles.is_empty() {
            &self.fleet
        } else {
            &self.args.vehicles
        }
    }
}

impl Command for FastestCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let vehicles = self.vehicles();
        if vehicles.is_empty() {
            ui.warning("No vehicles to compare. Pass --vehicle or configure a fleet.");
            return Ok(CommandResult::failure(1));
        }

        let atlas = Atlas::from_csv_path(&self.data_file)?;
        let trip = resolve_trip(&atlas, &self.args.cities)?;
        ui.message(&trip.to_string());

        if ui.output_mode().shows_details() {
            for vehicle in vehicles {
                let time = match trip.total_travel_time(vehicle) {
                    Some(hours) => format!("{} Hour(s)", hours),
                    None => "Impossible".to_string(),
                };
                ui.message(&format!("  {}: {}", vehicle, time));
            }
        }

        match trip.fastest_vehicle(vehicles) {
            Some((index, hours)) => {
                ui.message(&format!(
                    "Fastest vehicle: {} ({} Hour(s))",
                    vehicles[index], hours
                ));
                Ok(CommandResult::success())
            }
            None => {
                ui.error("All vehicles are not suitable for this trip.");
                Ok(CommandResult::failure(1))
            }
        }
    }
}
