//! The plan a new trip wizard.
//!
//! Plan Type > Choose Locations > Choose Vehicle > Confirm Trip. Automatic
//! trips only fix the two end points and are routed once a vehicle is
//! chosen; manual trips keep the cities exactly as entered.

use std::sync::Arc;

use crate::atlas::City;
use crate::error::Result;
use crate::routing::find_shortest_path;
use crate::system::NavigationSystem;
use crate::trip::Trip;
use crate::ui::{PromptOption, UserInterface};
use crate::vehicle::Vehicle;

use super::location::{resolve_city_list, select_location, validate_city_list};
use super::{information_box, input_box, list_index, warning_box, Screen};

const WIZARD_TITLE: &str = "Plan a New Trip";
const WIZARD_STEPS: &[&str] = &["Plan Type", "Choose Locations", "Choose Vehicle", "Confirm Trip"];

/// How the trip's cities were chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlanType {
    /// Departure and arrival only; the route is computed.
    Automatic,
    /// Every city given by the operator.
    Manual,
}

/// First wizard step: automatic or manual planning.
///
/// Returns `true` if a trip was added.
pub fn plan_trip(ui: &mut dyn UserInterface, system: &mut NavigationSystem) -> Result<bool> {
    let screen = Screen::new(
        WIZARD_TITLE,
        "Select automatic if you wish to automatically calculate the shortest path to the destination\n\
         Or select manual to manually add cities between the departure and the destination",
    )
    .step(WIZARD_STEPS, 0);
    loop {
        let options = vec![
            PromptOption::new("Automatic Calculate Trip (Recommended)", "automatic"),
            PromptOption::new("Manually Add Cities (Advanced)", "manual"),
        ];
        let done = match screen.select(ui, "plan_type", options)?.as_deref() {
            Some("automatic") => choose_end_points(ui, system)?,
            Some("manual") => choose_cities(ui, system)?,
            None => return Ok(false),
            Some(_) => false,
        };
        if done {
            return Ok(true);
        }
    }
}

fn location_label(label: &str, city: Option<&Arc<City>>) -> String {
    match city {
        Some(city) => format!("{} ({})", label, city),
        None => format!("{} (Not Specified)", label),
    }
}

fn choose_end_points(ui: &mut dyn UserInterface, system: &mut NavigationSystem) -> Result<bool> {
    let mut departure: Option<Arc<City>> = None;
    let mut arrival: Option<Arc<City>> = None;
    let mut screen = Screen::new(
        WIZARD_TITLE,
        "Please select the departure and the arrival location.\n\
         Please specify both locations before entering the next step.",
    )
    .step(WIZARD_STEPS, 1);

    loop {
        let options = vec![
            PromptOption::new(
                location_label("Select Departure Location", departure.as_ref()),
                "departure",
            ),
            PromptOption::new(
                location_label("Select Arrival Location", arrival.as_ref()),
                "arrival",
            ),
            PromptOption::new("Next", "next"),
            PromptOption::new("Go back to previous step", "back"),
        ];
        match screen.select(ui, "plan_locations", options)?.as_deref() {
            Some("departure") => {
                screen.clear_error();
                departure = select_location(ui, system.atlas(), "Set Departure City")?;
            }
            Some("arrival") => {
                screen.clear_error();
                arrival = select_location(ui, system.atlas(), "Set Arrival City")?;
            }
            Some("next") => match (&departure, &arrival) {
                (Some(from), Some(to)) => {
                    let mut trip = Trip::new(Arc::clone(from));
                    trip.add_next_city(Arc::clone(to));
                    if choose_vehicle(ui, system, trip, PlanType::Automatic)? {
                        return Ok(true);
                    }
                }
                _ => screen.set_error(
                    "Please make sure departure and arrival location are specified before confirming",
                ),
            },
            Some("back") | None => return Ok(false),
            Some(_) => {}
        }
    }
}

/// Labels for the cities of a manual trip, marking both ends.
fn city_labels(trip: &Trip) -> Vec<String> {
    let last = trip.len().saturating_sub(1);
    trip.cities()
        .iter()
        .enumerate()
        .map(|(i, city)| {
            if i == 0 {
                format!("| {} [Departure]", city)
            } else if i == last {
                format!("| {} [Arrive]", city)
            } else {
                format!("| {}", city)
            }
        })
        .collect()
}

fn append_cities(trip: &mut Option<Trip>, cities: Vec<Arc<City>>) {
    for city in cities {
        match trip {
            Some(t) => t.add_next_city(city),
            None => *trip = Some(Trip::new(city)),
        }
    }
}

fn choose_cities(ui: &mut dyn UserInterface, system: &mut NavigationSystem) -> Result<bool> {
    let mut trip: Option<Trip> = None;
    let mut screen = Screen::new(
        WIZARD_TITLE,
        "Please manually add the cities, either one by one using the append option\n\
         or enter all cities at once using the 'Enter Comma Separated City Names' option.\n\
         To remove a city from the trip, select that city.\n\
         Please specify both locations before entering the next step.",
    )
    .step(WIZARD_STEPS, 1);

    loop {
        let mut options = vec![
            PromptOption::new("[Append a Single City to Trip...]", "append"),
            PromptOption::new("[Enter 'Comma Separated' City Names...]", "list"),
        ];
        if let Some(t) = &trip {
            options.extend(
                city_labels(t)
                    .into_iter()
                    .enumerate()
                    .map(|(i, label)| PromptOption::new(label, i.to_string())),
            );
        }
        options.push(PromptOption::new("Confirm", "confirm"));
        options.push(PromptOption::new("Go back to previous step", "back"));

        let value = match screen.select(ui, "plan_cities", options)? {
            None => return Ok(false),
            Some(v) if v == "back" => return Ok(false),
            Some(v) => v,
        };

        if value == "confirm" {
            match &trip {
                Some(t) if t.len() >= 2 => {
                    if choose_vehicle(ui, system, t.clone(), PlanType::Manual)? {
                        return Ok(true);
                    }
                }
                _ => screen.set_error(
                    "You need at least 2 cities to create a trip (Departure and Arrival City)",
                ),
            }
            continue;
        }

        screen.clear_error();
        match value.as_str() {
            "append" => {
                if let Some(city) = select_location(ui, system.atlas(), "Append a City")? {
                    append_cities(&mut trip, vec![city]);
                }
            }
            "list" => {
                let atlas = system.atlas();
                let cities = input_box(
                    ui,
                    "city_list",
                    "Add a List of Cities",
                    "Please enter a series of city names separated with comma ','",
                    None,
                    |raw| validate_city_list(raw).and_then(|terms| resolve_city_list(atlas, &terms)),
                )?;
                append_cities(&mut trip, cities.unwrap_or_default());
            }
            _ => {
                let len = trip.as_ref().map_or(0, Trip::len);
                if let Some(index) = list_index(&value, len) {
                    if len == 1 {
                        trip = None;
                    } else if let Some(t) = trip.as_mut() {
                        t.remove(index);
                    }
                }
            }
        }
    }
}

fn choose_vehicle(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    trip: Trip,
    plan: PlanType,
) -> Result<bool> {
    let screen = Screen::new(WIZARD_TITLE, "Select a vehicle to complete this trip").step(WIZARD_STEPS, 2);
    loop {
        let mut options: Vec<PromptOption> = system
            .vehicles()
            .iter()
            .enumerate()
            .map(|(i, v)| PromptOption::new(v.to_string(), i.to_string()))
            .collect();
        options.push(PromptOption::new("Go back to previous step", "back"));

        let Some(value) = screen.select(ui, "plan_vehicle", options)? else {
            return Ok(false);
        };
        let Some(vehicle) = list_index(&value, system.vehicles().len()).map(|i| system.vehicles()[i])
        else {
            return Ok(false);
        };
        if confirm_trip(ui, system, trip.clone(), vehicle, plan)? {
            return Ok(true);
        }
    }
}

fn confirm_trip(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    trip: Trip,
    vehicle: Vehicle,
    plan: PlanType,
) -> Result<bool> {
    let trip = match plan {
        PlanType::Manual => trip,
        PlanType::Automatic => {
            ui.message("Please hold on while the trip is being generated ...");
            match find_shortest_path(system.atlas(), &vehicle, trip.departure(), trip.arrival()) {
                Some(route) => route,
                None => {
                    warning_box(
                        ui,
                        "The vehicle you have selected is not capable for this trip.\n\
                         Please select another vehicle or modify the trip.",
                    )?;
                    return Ok(false);
                }
            }
        }
    };

    let travel_time = match trip.total_travel_time(&vehicle) {
        Some(hours) => format!("{} Hour(s)", hours),
        None => "Impossible\n\n\
                 Note that this trip is impossible for selected vehicle, \
                 but you still can add this to your list."
            .to_string(),
    };
    let screen = Screen::new(
        WIZARD_TITLE,
        format!(
            "The trip you have planned is:\n \
             * Trip sequence: {}\n \
             * Planned using: {}\n \
             * Travel time using: {}",
            trip, vehicle, travel_time
        ),
    )
    .step(WIZARD_STEPS, 3);

    let options = vec![
        PromptOption::new("Confirm", "confirm"),
        PromptOption::new("Go back to previous step", "back"),
    ];
    if screen.select(ui, "plan_confirm", options)?.as_deref() != Some("confirm") {
        return Ok(false);
    }
    system.add_trip(trip);
    information_box(ui, "Trip has been added to your list.")?;
    Ok(true)
}
