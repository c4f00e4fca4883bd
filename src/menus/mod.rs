//! Interactive menus.
//!
//! Every screen is a function over a [`UserInterface`] and the
//! [`NavigationSystem`] it edits. Cancelling a prompt (Esc, `q`, or an
//! empty answer) goes back one screen; wizard steps return `true` once the
//! whole wizard has completed so callers can unwind to their own menu.

pub mod location;
pub mod plan;
pub mod trips;
pub mod vehicles;

use std::path::PathBuf;
use std::time::Duration;

use crate::config::NavConfig;
use crate::error::Result;
use crate::map::MapStyle;
use crate::system::NavigationSystem;
use crate::ui::{Prompt, PromptOption, PromptResult, UserInterface};

pub use location::{select_location, validate_city_list, validate_filter};
pub use plan::plan_trip;
pub use trips::manage_trips;
pub use vehicles::{add_vehicle_wizard, manage_vehicles};

/// Shown when the operator leaves the main menu.
pub const EXIT_MESSAGE: &str = "Exiting. Thank you for using the Navigation System.";

/// Hint shown under every select prompt.
const BACK_HINT: &str = "(Esc to go back)";

/// Settings the menus need beyond the system itself.
#[derive(Debug, Clone)]
pub struct MenuSettings {
    /// Wall-clock time per simulated hour.
    pub tick: Duration,
    /// Draw simulation progress bars.
    pub animate: bool,
    /// Directory exported maps are written to.
    pub map_dir: PathBuf,
    pub map_style: MapStyle,
}

impl MenuSettings {
    pub fn from_config(config: &NavConfig) -> Self {
        Self {
            tick: Duration::from_millis(config.simulation.tick_ms),
            animate: true,
            map_dir: config.map.output_dir.clone(),
            map_style: MapStyle::with_projection(config.map.projection),
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self::from_config(&NavConfig::default())
    }
}

/// Severity of a message box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    Information,
    Warning,
}

/// One drawn screen: a title, optional wizard progress, a description and
/// the error left over from the last interaction.
#[derive(Debug, Clone, Default)]
pub(crate) struct Screen {
    title: String,
    progress: Option<(&'static [&'static str], usize)>,
    description: String,
    error: Option<String>,
}

impl Screen {
    pub(crate) fn new(title: &str, description: impl Into<String>) -> Self {
        Self {
            title: title.to_string(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Mark this screen as step `current` of a wizard.
    pub(crate) fn step(mut self, steps: &'static [&'static str], current: usize) -> Self {
        self.progress = Some((steps, current));
        self
    }

    pub(crate) fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    pub(crate) fn draw(&self, ui: &mut dyn UserInterface) {
        ui.clear();
        ui.show_header(&self.title);
        if let Some((steps, current)) = self.progress {
            ui.message(&breadcrumb(steps, current));
        }
        if !self.description.is_empty() {
            ui.message(&self.description);
        }
        if let Some(error) = &self.error {
            ui.error(error);
        }
    }

    /// Draw the screen and ask for one of `options`.
    ///
    /// Returns the chosen value, or `None` if the prompt was cancelled.
    pub(crate) fn select(
        &self,
        ui: &mut dyn UserInterface,
        key: &str,
        options: Vec<PromptOption>,
    ) -> Result<Option<String>> {
        self.draw(ui);
        let result = ui.prompt(&Prompt::select(key, BACK_HINT, options))?;
        Ok(result.as_string())
    }
}

/// Render wizard steps with the current one bracketed.
pub(crate) fn breadcrumb(steps: &[&str], current: usize) -> String {
    steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            if i == current {
                format!("[{}]", step)
            } else {
                (*step).to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Show a message and wait for the operator to acknowledge it.
pub(crate) fn message_box(
    ui: &mut dyn UserInterface,
    title: &str,
    message: &str,
    level: Level,
) -> Result<()> {
    ui.clear();
    ui.show_header(title);
    match level {
        Level::Information => ui.success(message),
        Level::Warning => ui.warning(message),
    }
    ui.prompt(&Prompt::select(
        "message_box",
        "",
        vec![PromptOption::new("Confirm", "confirm")],
    ))?;
    Ok(())
}

pub(crate) fn warning_box(ui: &mut dyn UserInterface, message: &str) -> Result<()> {
    message_box(ui, "Warning", message, Level::Warning)
}

pub(crate) fn information_box(ui: &mut dyn UserInterface, message: &str) -> Result<()> {
    message_box(ui, "Information", message, Level::Information)
}

/// Ask for free text until `validate` accepts it.
///
/// `error` is shown with the first prompt. Returns `None` if cancelled.
pub(crate) fn input_box<T>(
    ui: &mut dyn UserInterface,
    key: &str,
    title: &str,
    question: &str,
    mut error: Option<String>,
    validate: impl Fn(&str) -> std::result::Result<T, String>,
) -> Result<Option<T>> {
    loop {
        ui.clear();
        ui.show_header(title);
        if let Some(e) = &error {
            ui.error(e);
        }
        let raw = match ui.prompt(&Prompt::input(key, question))? {
            PromptResult::String(raw) => raw,
            _ => return Ok(None),
        };
        match validate(&raw) {
            Ok(value) => return Ok(Some(value)),
            Err(e) => error = Some(e),
        }
    }
}

/// Parse an index value produced by a list option.
pub(crate) fn list_index(value: &str, len: usize) -> Option<usize> {
    value.parse::<usize>().ok().filter(|&i| i < len)
}

/// The main menu. Returns when the operator exits.
pub fn main_menu(
    ui: &mut dyn UserInterface,
    system: &mut NavigationSystem,
    settings: &MenuSettings,
) -> Result<()> {
    let screen = Screen::new(
        "Navigation System - Main Menu",
        "Welcome to the Navigation System\nPlease select an item from the menu to start",
    );
    loop {
        let options = vec![
            PromptOption::new("Manage Vehicles", "vehicles"),
            PromptOption::new("Manage Trips", "trips"),
            PromptOption::new("Exit", "exit"),
        ];
        match screen.select(ui, "main_menu", options)?.as_deref() {
            Some("vehicles") => manage_vehicles(ui, system)?,
            Some("trips") => manage_trips(ui, system, settings)?,
            _ => {
                ui.message(EXIT_MESSAGE);
                return Ok(());
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn breadcrumb_brackets_current_step() {
        assert_eq!(
            breadcrumb(&["Plan Type", "Choose Locations", "Choose Vehicle"], 1),
            "Plan Type > [Choose Locations] > Choose Vehicle"
        );
    }

    #[test]
    fn list_index_rejects_out_of_range() {
        assert_eq!(list_index("2", 3), Some(2));
        assert_eq!(list_index("3", 3), None);
        assert_eq!(list_index("add", 3), None);
    }

    #[test]
    fn exit_prints_farewell() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("main_menu", "exit");
        let mut system = test_support::system();
        main_menu(&mut ui, &mut system, &MenuSettings::default()).unwrap();
        assert!(ui.has_message(EXIT_MESSAGE));
        assert_eq!(
            ui.options_shown("main_menu").unwrap(),
            &["Manage Vehicles", "Manage Trips", "Exit"]
        );
    }

    #[test]
    fn cancelling_main_menu_exits() {
        let mut ui = MockUI::new();
        let mut system = test_support::system();
        main_menu(&mut ui, &mut system, &MenuSettings::default()).unwrap();
        assert!(ui.has_message(EXIT_MESSAGE));
    }

    #[test]
    fn main_menu_opens_vehicle_management() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("main_menu", vec!["vehicles", "exit"]);
        let mut system = test_support::system();
        main_menu(&mut ui, &mut system, &MenuSettings::default()).unwrap();
        assert!(ui.prompts_shown().contains(&"manage_vehicles".to_string()));
        assert!(ui.has_header("Manage Vehicles"));
    }

    #[test]
    fn input_box_repeats_until_valid() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("speed", vec!["abc", "12"]);
        let value = input_box(&mut ui, "speed", "Speed", "Speed?", None, |raw| {
            raw.parse::<u32>().map_err(|_| "Please enter an integer".to_string())
        })
        .unwrap();
        assert_eq!(value, Some(12));
        assert!(ui.has_error("Please enter an integer"));
    }

    #[test]
    fn input_box_cancel_returns_none() {
        let mut ui = MockUI::new();
        let value = input_box(&mut ui, "speed", "Speed", "Speed?", None, |raw| {
            Ok::<_, String>(raw.to_string())
        })
        .unwrap();
        assert_eq!(value, None);
    }

    #[test]
    fn screen_draw_shows_progress_and_error() {
        let mut ui = MockUI::new();
        let mut screen = Screen::new("Create a Vehicle", "Pick one").step(&["A", "B"], 0);
        screen.set_error("Nope");
        screen.draw(&mut ui);
        assert!(ui.has_message("[A] > B"));
        assert!(ui.has_message("Pick one"));
        assert!(ui.has_error("Nope"));
        assert_eq!(ui.clears(), 1);
    }
}
