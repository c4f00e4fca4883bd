//! Map command implementation.
//!
//! `navigator map Melbourne Tokyo -o maps/` writes the trip as an SVG map.

use std::path::PathBuf;

use crate::atlas::Atlas;
use crate::cli::args::MapArgs;
use crate::config::NavConfig;
use crate::error::Result;
use crate::map::{export_trip, MapStyle};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};
use super::resolve_trip;

/// The map command implementation.
pub struct MapCommand {
    data_file: PathBuf,
    output_dir: PathBuf,
    style: MapStyle,
    cities: Vec<String>,
}

impl MapCommand {
    /// Flags take precedence over the `map` config section.
    pub fn new(config: &NavConfig, args: MapArgs) -> Self {
        let projection = args.projection.unwrap_or(config.map.projection);
        Self {
            data_file: config.data_file.clone(),
            output_dir: args.out.unwrap_or_else(|| config.map.output_dir.clone()),
            style: MapStyle::with_projection(projection),
            cities: args.cities,
        }
    }
}

impl Command for MapCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let atlas = Atlas::from_csv_path(&self.data_file)?;
        let trip = resolve_trip(&atlas, &self.cities)?;
        let path = export_trip(&trip, &self.output_dir, &self.style)?;
        ui.success(&format!(
            "This trip has been exported to the following file:\n'{}'",
            path.display()
        ));
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Projection;

    #[test]
    fn flags_override_config() {
        let args = MapArgs {
            cities: vec!["Tokyo".to_string()],
            out: Some(PathBuf::from("maps")),
            projection: Some(Projection::Equirectangular),
        };
        let cmd = MapCommand::new(&NavConfig::default(), args);
        assert_eq!(cmd.output_dir, PathBuf::from("maps"));
        assert_eq!(cmd.style, MapStyle::with_projection(Projection::Equirectangular));
    }

    #[test]
    fn config_supplies_defaults() {
        let args = MapArgs {
            cities: vec!["Tokyo".to_string()],
            out: None,
            projection: None,
        };
        let config = NavConfig::default();
        let cmd = MapCommand::new(&config, args);
        assert_eq!(cmd.output_dir, config.map.output_dir);
    }
}
