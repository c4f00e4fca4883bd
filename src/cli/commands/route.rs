//! Route command implementation.
//!
//! `navigator route --vehicle car:120 --from Melbourne --to Tokyo` finds the
//! fastest chain of cities the vehicle can travel between two cities.

use serde::Serialize;

use crate::atlas::Atlas;
use crate::cli::args::RouteArgs;
use crate::config::NavConfig;
use crate::error::Result;
use crate::routing::find_shortest_path;
use crate::trip::Trip;
use crate::ui::UserInterface;
use crate::vehicle::Vehicle;

use super::dispatcher::{Command, CommandResult};

/// The route command implementation.
pub struct RouteCommand {
    data_file: std::path::PathBuf,
    args: RouteArgs,
}

impl RouteCommand {
    pub fn new(config: &NavConfig, args: RouteArgs) -> Self {
        Self {
            data_file: config.data_file.clone(),
            args,
        }
    }
}

/// One leg of a route report.
#[derive(Debug, Serialize)]
struct LegReport {
    from: String,
    to: String,
    distance_km: u32,
    hours: u32,
}

/// Machine readable route, printed with `--json`.
#[derive(Debug, Serialize)]
struct RouteReport {
    vehicle: Vehicle,
    cities: Vec<String>,
    legs: Vec<LegReport>,
    total_hours: u64,
}

impl RouteReport {
    fn new(trip: &Trip, vehicle: Vehicle) -> Option<Self> {
        let times = trip.leg_times(&vehicle)?;
        let legs = trip
            .legs()
            .zip(times)
            .map(|((from, to), hours)| LegReport {
                from: from.to_string(),
                to: to.to_string(),
                distance_km: from.distance(to),
                hours,
            })
            .collect::<Vec<_>>();
        Some(Self {
            vehicle,
            cities: trip.cities().iter().map(|c| c.to_string()).collect(),
            total_hours: legs.iter().map(|l| u64::from(l.hours)).sum(),
            legs,
        })
    }
}

impl Command for RouteCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let atlas = Atlas::from_csv_path(&self.data_file)?;
        let from = atlas.resolve(&self.args.from)?;
        let to = atlas.resolve(&self.args.to)?;
        let vehicle = self.args.vehicle;

        let report = find_shortest_path(&atlas, &vehicle, &from, &to)
            .and_then(|trip| RouteReport::new(&trip, vehicle).map(|r| (trip, r)));
        let Some((trip, report)) = report else {
            ui.error(&format!(
                "No route found from {} to {} using {}",
                from, to, vehicle
            ));
            return Ok(CommandResult::failure(1));
        };

        if self.args.json {
            let json = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            ui.message(&json);
            return Ok(CommandResult::success());
        }

        ui.message(&trip.to_string());
        if ui.output_mode().shows_details() {
            for leg in &report.legs {
                ui.message(&format!(
                    "  {} -> {}: {} km, {} Hour(s)",
                    leg.from, leg.to, leg.distance_km, leg.hours
                ));
            }
        }
        ui.message(&format!("Travel time: {} Hour(s)", report.total_hours));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_sums_leg_hours() {
        let atlas = Atlas::example();
        let vehicle = Vehicle::CrappyCrepeCar { speed: 100 };
        let trip = Trip::from_cities(vec![
            atlas.resolve("Melbourne").unwrap(),
            atlas.resolve("Canberra").unwrap(),
            atlas.resolve("Sydney").unwrap(),
        ])
        .unwrap();

        let report = RouteReport::new(&trip, vehicle).unwrap();
        assert_eq!(report.legs.len(), 2);
        assert_eq!(Some(report.total_hours), trip.total_travel_time(&vehicle));
        assert_eq!(report.cities[0], "Melbourne (AUS)");
    }

    #[test]
    fn report_total_of_long_legs_does_not_overflow() {
        let atlas = Atlas::example();
        let vehicle = Vehicle::TeleportingTarteTrolley {
            travel_time: u32::MAX,
            max_distance: 500,
        };
        let from = atlas.resolve("Melbourne").unwrap();
        let to = atlas.resolve("Sydney").unwrap();
        let trip = find_shortest_path(&atlas, &vehicle, &from, &to).unwrap();
        assert_eq!(trip.to_string(), "Melbourne (AUS) -> Canberra (AUS) -> Sydney (AUS)");

        let report = RouteReport::new(&trip, vehicle).unwrap();
        assert_eq!(report.total_hours, 2 * u64::from(u32::MAX));
    }

    #[test]
    fn report_is_none_for_impossible_trip() {
        let atlas = Atlas::example();
        let vehicle = Vehicle::TeleportingTarteTrolley {
            travel_time: 1,
            max_distance: 10,
        };
        let trip = Trip::from_cities(vec![
            atlas.resolve("Melbourne").unwrap(),
            atlas.resolve("Tokyo").unwrap(),
        ])
        .unwrap();
        assert!(RouteReport::new(&trip, vehicle).is_none());
    }

    #[test]
    fn report_serializes_vehicle_kind() {
        let atlas = Atlas::example();
        let vehicle = Vehicle::CrappyCrepeCar { speed: 500 };
        let trip = Trip::from_cities(vec![
            atlas.resolve("Sydney").unwrap(),
            atlas.resolve("Canberra").unwrap(),
        ])
        .unwrap();
        let json = serde_json::to_value(RouteReport::new(&trip, vehicle).unwrap()).unwrap();
        assert_eq!(json["vehicle"]["kind"], "crappy_crepe_car");
        assert_eq!(json["legs"][0]["from"], "Sydney (AUS)");
    }
}
