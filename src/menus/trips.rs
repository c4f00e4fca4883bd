//! Trip management: the trip list and the per-trip actions.

use crate::error::Result;
use crate::map::export_trip;
use crate::simulation::{describe, Simulation, SimulationView};
use crate::system::NavigationSystem;
use crate::trip::Trip;
use crate::ui::{Prompt, PromptOption, PromptResult, UserInterface};
use crate::vehicle::Vehicle;

use super::{information_box, list_index, message_box, plan_trip, warning_box, Level, MenuSettings, Screen};

const NO_VEHICLES: &str = "There are no vehicles in this system yet.\n\
                           Atleast one vehicle is required to plan a trip.\n\
                           Please go to the vehicle management menu and add a vehicle.";

/// List the planned trips, plan new ones or open one of them.
pub fn manage_trips(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    settings: &MenuSettings,
) -> Result<()> {
    loop {
        let description = if system.trips().is_empty() {
            "There is no trips yet.\nPlease select 'Plan a New Trip...' to add a custom trip"
        } else {
            "To get started, select a trip from the menu below,\n\
             or select 'Plan a New Trip...' to plan a custom trip"
        };
        let mut options = vec![PromptOption::new("[Plan a New Trip...]", "plan")];
        options.extend(
            system
                .trips()
                .iter()
                .enumerate()
                .map(|(i, t)| PromptOption::new(t.to_string(), i.to_string())),
        );

        let screen = Screen::new("Manage Trips", description);
        let Some(value) = screen.select(ui, "manage_trips", options)? else {
            return Ok(());
        };
        if value == "plan" {
            if system.vehicles().is_empty() {
                warning_box(ui, NO_VEHICLES)?;
            } else {
                plan_trip(ui, system)?;
            }
        } else if let Some(index) = list_index(&value, system.trips().len()) {
            trip_detail(ui, system, settings, index)?;
        }
    }
}

fn trip_detail(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    settings: &MenuSettings,
    index: usize,
) -> Result<()> {
    let Some(trip) = system.trips().get(index).cloned() else {
        return Ok(());
    };
    let screen = Screen::new(
        "Manage Trips",
        format!(
            "You are now viewing the following trip:\n{}\n\
             You can simulate this trip, export this trip to an image\n\
             or you can also find the fastest vehicle for this trip.",
            trip
        ),
    );

    loop {
        let options = vec![
            PromptOption::new("Export this trip to image", "export"),
            PromptOption::new("Simulate this trip", "simulate"),
            PromptOption::new("Find fastest vehicle for this trip", "fastest"),
            PromptOption::new("Delete this trip", "delete"),
            PromptOption::new("Go back", "back"),
        ];
        match screen.select(ui, "trip_detail", options)?.as_deref() {
            Some("export") => export(ui, &trip, settings)?,
            Some("simulate") => simulate(ui, &trip, system.vehicles(), settings)?,
            Some("fastest") => fastest_vehicle(ui, &trip, system.vehicles())?,
            Some("delete") => {
                system.remove_trip(index);
                return Ok(());
            }
            _ => return Ok(()),
        }
    }
}

fn export(ui: &mut dyn UserInterface, trip: &Trip, settings: &MenuSettings) -> Result<()> {
    match export_trip(trip, &settings.map_dir, &settings.map_style) {
        Ok(path) => message_box(
            ui,
            "Export trip to image",
            &format!(
                "This trip has been exported to the following file:\n'{}'",
                path.display()
            ),
            Level::Information,
        ),
        Err(e) => {
            tracing::warn!("Map export failed: {}", e);
            warning_box(ui, &format!("The map could not be exported.\n{}", e))
        }
    }
}

/// Report the fastest vehicle of the fleet for a trip.
pub fn fastest_vehicle(ui: &mut dyn UserInterface, trip: &Trip, vehicles: &[Vehicle]) -> Result<()> {
    if vehicles.is_empty() {
        return warning_box(
            ui,
            "There are no vehicles in this system yet.\n\
             Please go to the vehicle management menu and add a vehicle.",
        );
    }
    match trip.fastest_vehicle(vehicles) {
        None => warning_box(
            ui,
            "All vehicles are not suitable for this trip.\nMaybe add a vehicle or try another trip?",
        ),
        Some((i, hours)) => information_box(
            ui,
            &format!(
                "The fastest vehicle for this trip is:\nVehicle: {}\nTime required: {} Hour(s)",
                vehicles[i], hours
            ),
        ),
    }
}

/// Pick a capable vehicle and play the trip.
fn simulate(
    ui: &mut dyn UserInterface,
    trip: &Trip,
    vehicles: &[Vehicle],
    settings: &MenuSettings,
) -> Result<()> {
    let capable: Vec<&Vehicle> = vehicles
        .iter()
        .filter(|v| trip.total_travel_time(v).is_some())
        .collect();
    if capable.is_empty() {
        return warning_box(
            ui,
            "No vehicle is capable for this trip\nPlease select another trip or add a new vehicle",
        );
    }

    let mut options: Vec<PromptOption> = capable
        .iter()
        .enumerate()
        .map(|(i, v)| PromptOption::new(v.to_string(), i.to_string()))
        .collect();
    options.push(PromptOption::new("Back to previous step", "back"));
    let screen = Screen::new(
        "Simulate Trip",
        format!(
            "To simulate the following trip:\nYou have to select a vehicle.\n{}\n\
             Note: Only vehicles capable of this trip are being shown.",
            trip
        ),
    );
    let Some(index) = screen
        .select(ui, "simulation_vehicle", options)?
        .and_then(|v| list_index(&v, capable.len()))
    else {
        return Ok(());
    };

    let mut sim = Simulation::new(trip.clone(), *capable[index])?;
    ui.clear();
    ui.show_header("Simulating Trip");
    ui.message("  You are simulating the following trip");
    for line in describe(&sim, settings.tick) {
        ui.message(&line);
    }

    let begin = Prompt::confirm("begin_simulation", "Begin simulation?").with_default("true");
    if ui.prompt(&begin)? != PromptResult::Bool(true) {
        return Ok(());
    }

    if settings.animate {
        ui.message("  Press Esc or q to exit this simulation");
    }
    let view = if settings.animate {
        SimulationView::new(&sim)
    } else {
        SimulationView::hidden(&sim)
    };
    if view.run(&mut sim, settings.tick, |tick| ui.wait_for_cancel(tick)) {
        information_box(ui, "Simulation completed.")
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menus::test_support;
    use crate::ui::MockUI;
    use tempfile::TempDir;

    fn system_with_trip() -> NavigationSystem {
        let mut system = test_support::system();
        let atlas = system.atlas().clone();
        let trip = Trip::from_cities(vec![
            atlas.resolve("Melbourne").unwrap(),
            atlas.resolve("Canberra").unwrap(),
            atlas.resolve("Sydney").unwrap(),
        ])
        .unwrap();
        system.add_trip(trip);
        system
    }

    #[test]
    fn planning_without_vehicles_warns() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("manage_trips", vec!["plan"]);
        let mut system = NavigationSystem::default();

        manage_trips(&mut ui, &mut system, &test_support::settings(temp.path())).unwrap();
        assert!(ui.has_warning("Atleast one vehicle is required to plan a trip."));
        assert!(!ui.prompts_shown().contains(&"plan_type".to_string()));
    }

    #[test]
    fn lists_trips() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let mut system = system_with_trip();

        manage_trips(&mut ui, &mut system, &test_support::settings(temp.path())).unwrap();
        assert_eq!(
            ui.options_shown("manage_trips").unwrap(),
            &[
                "[Plan a New Trip...]",
                "Melbourne (AUS) -> Canberra (AUS) -> Sydney (AUS)"
            ]
        );
    }

    #[test]
    fn delete_trip() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("manage_trips", vec!["0"]);
        ui.set_prompt_response("trip_detail", "delete");
        let mut system = system_with_trip();

        manage_trips(&mut ui, &mut system, &test_support::settings(temp.path())).unwrap();
        assert!(system.trips().is_empty());
    }

    #[test]
    fn export_writes_svg() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("manage_trips", vec!["0"]);
        ui.queue_prompt_responses("trip_detail", vec!["export", "back"]);
        let mut system = system_with_trip();

        manage_trips(&mut ui, &mut system, &test_support::settings(temp.path())).unwrap();
        let path = temp.path().join("map_Melbourne_Canberra_Sydney.svg");
        assert!(path.is_file());
        assert!(ui.has_success("This trip has been exported to the following file:"));
        assert_eq!(system.trips().len(), 1);
    }

    #[test]
    fn fastest_vehicle_reports_hours() {
        let system = system_with_trip();
        let mut ui = MockUI::new();
        let trip = &system.trips()[0];

        fastest_vehicle(&mut ui, trip, system.vehicles()).unwrap();
        let expected_hours = system
            .vehicles()
            .iter()
            .filter_map(|v| trip.total_travel_time(v))
            .min()
            .unwrap();
        assert!(ui.has_success("The fastest vehicle for this trip is:"));
        assert!(ui.has_success(&format!("Time required: {} Hour(s)", expected_hours)));
    }

    #[test]
    fn fastest_vehicle_with_empty_fleet_warns() {
        let system = system_with_trip();
        let mut ui = MockUI::new();
        fastest_vehicle(&mut ui, &system.trips()[0], &[]).unwrap();
        assert!(ui.has_warning("There are no vehicles in this system yet."));
    }

    #[test]
    fn fastest_vehicle_when_none_capable() {
        let system = system_with_trip();
        let mut ui = MockUI::new();
        let weak = [Vehicle::TeleportingTarteTrolley {
            travel_time: 1,
            max_distance: 10,
        }];
        fastest_vehicle(&mut ui, &system.trips()[0], &weak).unwrap();
        assert!(ui.has_warning("All vehicles are not suitable for this trip."));
    }

    #[test]
    fn simulate_offers_only_capable_vehicles() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("simulation_vehicle", "0");
        let system = system_with_trip();
        let vehicles = [
            Vehicle::TeleportingTarteTrolley {
                travel_time: 1,
                max_distance: 10,
            },
            Vehicle::CrappyCrepeCar { speed: 500 },
        ];

        simulate(
            &mut ui,
            &system.trips()[0],
            &vehicles,
            &test_support::settings(temp.path()),
        )
        .unwrap();
        assert_eq!(
            ui.options_shown("simulation_vehicle").unwrap(),
            &["CrappyCrepeCar (500 km/h)", "Back to previous step"]
        );
        assert!(ui.has_message("  * Vehicle: CrappyCrepeCar (500 km/h)"));
        assert!(ui.has_success("Simulation completed."));
    }

    #[test]
    fn simulate_without_capable_vehicle_warns() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let system = system_with_trip();
        let weak = [Vehicle::TeleportingTarteTrolley {
            travel_time: 1,
            max_distance: 10,
        }];

        simulate(&mut ui, &system.trips()[0], &weak, &test_support::settings(temp.path()))
            .unwrap();
        assert!(ui.has_warning("No vehicle is capable for this trip"));
        assert!(!ui.prompts_shown().contains(&"simulation_vehicle".to_string()));
    }

    #[test]
    fn cancelling_simulation_returns_to_trip_menu() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("manage_trips", vec!["0"]);
        ui.queue_prompt_responses("trip_detail", vec!["simulate", "back"]);
        ui.set_prompt_response("simulation_vehicle", "0");
        ui.cancel_after_waits(2);
        let mut system = system_with_trip();

        manage_trips(&mut ui, &mut system, &test_support::settings(temp.path())).unwrap();
        assert_eq!(ui.waits(), 2);
        assert!(!ui.has_success("Simulation completed."));
        let detail_prompts = ui
            .prompts_shown()
            .iter()
            .filter(|k| k.as_str() == "trip_detail")
            .count();
        assert_eq!(detail_prompts, 2);
        assert_eq!(system.trips().len(), 1);
    }

    #[test]
    fn declining_to_begin_skips_simulation() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        ui.set_prompt_response("simulation_vehicle", "0");
        ui.set_prompt_response("begin_simulation", "no");
        let system = system_with_trip();

        simulate(
            &mut ui,
            &system.trips()[0],
            system.vehicles(),
            &test_support::settings(temp.path()),
        )
        .unwrap();
        assert!(!ui.has_success("Simulation completed."));
    }
}
