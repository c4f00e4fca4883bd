//! Cities command implementation.
//!
//! `navigator cities mel` lists every city whose "Name (ISO)" label
//! contains the term.

use crate::atlas::Atlas;
use crate::cli::args::CitiesArgs;
use crate::config::NavConfig;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The cities command implementation.
pub struct CitiesCommand {
    data_file: std::path::PathBuf,
    args: CitiesArgs,
}

impl CitiesCommand {
    pub fn new(config: &NavConfig, args: CitiesArgs) -> Self {
        Self {
            data_file: config.data_file.clone(),
            args,
        }
    }
}

impl Command for CitiesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let atlas = Atlas::from_csv_path(&self.data_file)?;
        let matches = atlas.search(&self.args.term);
        if matches.is_empty() {
            ui.error(&format!(
                "'{}' is not found. Please check the spelling, or try another city.",
                self.args.term
            ));
            return Ok(CommandResult::failure(1));
        }

        let verbose = ui.output_mode().shows_details();
        for city in &matches {
            if verbose {
                let capital = match city.capital_type.as_str() {
                    "" => String::new(),
                    kind => format!(", {} capital", kind),
                };
                ui.message(&format!("{}  {}{}, id {}", city, city.country, capital, city.id));
            } else {
                ui.message(&city.to_string());
            }
        }
        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{MockUI, OutputMode};
    use std::fs;
    use tempfile::TempDir;

    fn command(temp: &TempDir, term: &str) -> CitiesCommand {
        let path = temp.path().join("cities.csv");
        fs::write(
            &path,
            "city_ascii,lat,lng,country,iso3,capital,id\n\
             Bern,46.9480,7.4474,Switzerland,CHE,primary,1\n\
             Geneva,46.2017,6.1469,Switzerland,CHE,admin,2\n\
             Lucerne,47.0500,8.3000,Switzerland,CHE,,3\n",
        )
        .unwrap();
        let config = NavConfig {
            data_file: path,
            ..NavConfig::default()
        };
        CitiesCommand::new(
            &config,
            CitiesArgs {
                term: term.to_string(),
            },
        )
    }

    #[test]
    fn lists_every_match() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = command(&temp, "che").execute(&mut ui).unwrap();
        assert!(result.success);
        assert_eq!(ui.messages(), &["Bern (CHE)", "Geneva (CHE)", "Lucerne (CHE)"]);
    }

    #[test]
    fn verbose_adds_details() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::with_mode(OutputMode::Verbose);
        command(&temp, "bern").execute(&mut ui).unwrap();
        assert!(ui.has_message("Bern (CHE)  Switzerland, primary capital, id 1"));
    }

    #[test]
    fn no_match_fails() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        let result = command(&temp, "Atlantis").execute(&mut ui).unwrap();
        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("'Atlantis' is not found."));
    }
}
