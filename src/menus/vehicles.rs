//! Vehicle management and the add vehicle wizard.

use crate::error::Result;
use crate::system::NavigationSystem;
use crate::ui::{PromptOption, UserInterface};
use crate::vehicle::{validate_positive_integer, VehicleKind};

use super::{information_box, input_box, list_index, Screen};

const WIZARD_TITLE: &str = "Create a Vehicle";
const WIZARD_STEPS: &[&str] = &["Select Vehicle Type", "Confirm Vehicle", "Customise Parameters"];

/// List the fleet, add vehicles or open one of them.
pub fn manage_vehicles(ui: &mut dyn UserInterface, system: &mut NavigationSystem) -> Result<()> {
    loop {
        let description = if system.vehicles().is_empty() {
            "There is no vehicles yet.\nPlease select 'Add Vehicle...' to add a custom vehicle"
        } else {
            "To get started, select a vehicle from the menu below,\n\
             or select 'Add Vehicle...' to add a custom vehicle"
        };
        let mut options = vec![PromptOption::new("[Add Vehicle...]", "add")];
        options.extend(
            system
                .vehicles()
                .iter()
                .enumerate()
                .map(|(i, v)| PromptOption::new(v.to_string(), i.to_string())),
        );

        let screen = Screen::new("Manage Vehicles", description);
        let Some(value) = screen.select(ui, "manage_vehicles", options)? else {
            return Ok(());
        };
        if value == "add" {
            add_vehicle_wizard(ui, system)?;
        } else if let Some(index) = list_index(&value, system.vehicles().len()) {
            vehicle_detail(ui, system, index)?;
        }
    }
}

fn vehicle_detail(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    index: usize,
) -> Result<()> {
    let Some(vehicle) = system.vehicles().get(index) else {
        return Ok(());
    };
    let screen = Screen::new(
        "Manage Vehicles",
        format!(
            "You are now viewing: {}\n\n\
             To delete this vehicle, select 'Delete this vehicle'\n\
             select 'Go back' or Esc to go back",
            vehicle
        ),
    );
    let options = vec![
        PromptOption::new("Delete this vehicle", "delete"),
        PromptOption::new("Go back", "back"),
    ];
    if screen.select(ui, "vehicle_detail", options)?.as_deref() == Some("delete") {
        system.remove_vehicle(index);
    }
    Ok(())
}

/// First wizard step: choose a vehicle kind.
///
/// Returns `true` if a vehicle was added.
pub fn add_vehicle_wizard(ui: &mut dyn UserInterface, system: &mut NavigationSystem) -> Result<bool> {
    let screen = Screen::new(
        WIZARD_TITLE,
        "All vehicles in this system has to be derived from one of the 3 vehicles shown below.\n\
         Select one to see descriptions.",
    )
    .step(WIZARD_STEPS, 0);
    loop {
        let options = VehicleKind::ALL
            .iter()
            .map(|k| PromptOption::new(k.name(), k.name()))
            .collect();
        let Some(value) = screen.select(ui, "vehicle_type", options)? else {
            return Ok(false);
        };
        let Ok(kind) = value.parse::<VehicleKind>() else {
            continue;
        };
        if confirm_kind(ui, system, kind)? {
            return Ok(true);
        }
    }
}

fn confirm_kind(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    kind: VehicleKind,
) -> Result<bool> {
    let screen = Screen::new(WIZARD_TITLE, kind.description()).step(WIZARD_STEPS, 1);
    loop {
        let options = vec![
            PromptOption::new("Confirm", "confirm"),
            PromptOption::new("Choose again", "again"),
        ];
        if screen.select(ui, "vehicle_confirm", options)?.as_deref() != Some("confirm") {
            return Ok(false);
        }
        if customise_parameters(ui, system, kind)? {
            return Ok(true);
        }
    }
}

fn customise_parameters(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    kind: VehicleKind,
) -> Result<bool> {
    let params = kind.params();
    let mut values: Vec<Option<u32>> = vec![None; params.len()];
    let mut screen = Screen::new(
        WIZARD_TITLE,
        format!(
            "Customise the parameters of this new {}\n\
             All parameters has to be specified before confirming this vehicle.\n\
             Choose a parameter to start specifying.",
            kind
        ),
    )
    .step(WIZARD_STEPS, 2);

    loop {
        let mut options: Vec<PromptOption> = params
            .iter()
            .zip(&values)
            .enumerate()
            .map(|(i, (param, value))| {
                let state = if value.is_some() {
                    "(Specified)"
                } else {
                    "(Not specified)"
                };
                PromptOption::new(format!("{} {}", param.label, state), i.to_string())
            })
            .collect();
        options.push(PromptOption::new("Confirm", "confirm"));
        options.push(PromptOption::new("Go back to previous step", "back"));

        let value = match screen.select(ui, "vehicle_params", options)? {
            None => return Ok(false),
            Some(v) if v == "back" => return Ok(false),
            Some(v) => v,
        };

        if value == "confirm" {
            let specified: Option<Vec<u32>> = values.iter().copied().collect();
            match specified.and_then(|v| kind.build(&v)) {
                Some(vehicle) => {
                    system.add_vehicle(vehicle);
                    information_box(ui, "Vehicle has been added to your list.")?;
                    return Ok(true);
                }
                None => {
                    screen.set_error(
                        "Please make sure all unspecified parameters are specified before confirming",
                    );
                    continue;
                }
            }
        }

        screen.clear_error();
        let Some(index) = list_index(&value, params.len()) else {
            continue;
        };
        let param = &params[index];
        if let Some(v) = input_box(
            ui,
            "vehicle_param",
            param.title,
            param.prompt,
            None,
            validate_positive_integer,
        )? {
            values[index] = Some(v);
        }
    }
}
