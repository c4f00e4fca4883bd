//! City search screens.

use std::sync::Arc;

use crate::atlas::{Atlas, City};
use crate::error::Result;
use crate::ui::{PromptOption, UserInterface};

use super::{input_box, list_index, Screen};

/// Shortest accepted search term, after trimming.
pub const MIN_FILTER_LEN: usize = 3;

/// Check a search term, returning it trimmed.
pub fn validate_filter(raw: &str) -> std::result::Result<String, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Filter value cannot be empty".to_string());
    }
    if trimmed.chars().count() < MIN_FILTER_LEN {
        return Err("Filter value has to be 3 characters or above".to_string());
    }
    Ok(trimmed.to_string())
}

/// Split a comma separated list of search terms, each trimmed and at
/// least three characters long.
pub fn validate_city_list(raw: &str) -> std::result::Result<Vec<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("Value cannot be empty".to_string());
    }
    let terms: Vec<String> = trimmed.split(',').map(|t| t.trim().to_string()).collect();
    if terms.iter().any(|t| t.chars().count() < MIN_FILTER_LEN) {
        return Err("Every filter term has to be 3 characters or above".to_string());
    }
    Ok(terms)
}

/// Resolve every term to its first search match.
pub fn resolve_city_list(
    atlas: &Atlas,
    terms: &[String],
) -> std::result::Result<Vec<Arc<City>>, String> {
    terms
        .iter()
        .map(|term| {
            atlas
                .resolve(term)
                .map_err(|_| format!("Cannot find the following city: '{}'", term))
        })
        .collect()
}

/// Search for a city and let the operator pick one of the matches.
///
/// A single match is returned without asking. Returns `None` if cancelled.
pub fn select_location(
    ui: &mut dyn UserInterface,
    atlas: &Atlas,
    title: &str,
) -> Result<Option<Arc<City>>> {
    let mut error = None;
    loop {
        let Some(term) = input_box(
            ui,
            "city_search",
            title,
            "Please enter a city name to search the city",
            error.take(),
            validate_filter,
        )?
        else {
            return Ok(None);
        };

        let matches = atlas.search(&term);
        tracing::debug!("Search '{}' matched {} cities", term, matches.len());
        match matches.len() {
            0 => {
                error = Some(format!(
                    "'{}' is not found. Please check the spelling, or try another city.",
                    term
                ));
                continue;
            }
            1 => return Ok(matches.into_iter().next()),
            _ => {}
        }

        let mut options = vec![PromptOption::new("[Search again...]", "again")];
        options.extend(
            matches
                .iter()
                .enumerate()
                .map(|(i, city)| PromptOption::new(city.to_string(), i.to_string())),
        );
        let screen = Screen::new(
            title,
            format!("{} cities match '{}'. Select one.", matches.len(), term),
        );
        match screen.select(ui, "city_matches", options)? {
            None => return Ok(None),
            Some(value) => {
                if let Some(i) = list_index(&value, matches.len()) {
                    return Ok(Some(Arc::clone(&matches[i])));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;

    #[test]
    fn filter_needs_three_characters() {
        assert_eq!(validate_filter("  mel "), Ok("mel".to_string()));
        assert_eq!(
            validate_filter("   "),
            Err("Filter value cannot be empty".to_string())
        );
        assert_eq!(
            validate_filter(" ab "),
            Err("Filter value has to be 3 characters or above".to_string())
        );
    }

    #[test]
    fn city_list_checks_every_term() {
        assert_eq!(
            validate_city_list("Melbourne, Sydney"),
            Ok(vec!["Melbourne".to_string(), "Sydney".to_string()])
        );
        assert!(validate_city_list(" ").is_err());
        assert_eq!(
            validate_city_list("Melbourne, NY"),
            Err("Every filter term has to be 3 characters or above".to_string())
        );
    }

    #[test]
    fn resolve_reports_unknown_term() {
        let atlas = Atlas::example();
        let terms = vec!["Melbourne".to_string(), "Atlantis".to_string()];
        assert_eq!(
            resolve_city_list(&atlas, &terms),
            Err("Cannot find the following city: 'Atlantis'".to_string())
        );

        let cities = resolve_city_list(&atlas, &terms[..1]).unwrap();
        assert_eq!(cities[0].name, "Melbourne");
    }

    #[test]
    fn single_match_is_returned_directly() {
        let atlas = Atlas::example();
        let mut ui = MockUI::new();
        ui.set_prompt_response("city_search", "tokyo");

        let city = select_location(&mut ui, &atlas, "Set Departure City").unwrap();
        assert_eq!(city.unwrap().name, "Tokyo");
        assert!(!ui.prompts_shown().contains(&"city_matches".to_string()));
    }

    #[test]
    fn short_term_is_rejected_then_cancelled() {
        let atlas = Atlas::example();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("city_search", vec!["to", MockUI::CANCEL]);

        assert!(select_location(&mut ui, &atlas, "Search").unwrap().is_none());
        assert!(ui.has_error("Filter value has to be 3 characters or above"));
    }

    #[test]
    fn missing_city_asks_again() {
        let atlas = Atlas::example();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("city_search", vec!["Atlantis", "Sydney"]);

        let city = select_location(&mut ui, &atlas, "Search").unwrap();
        assert_eq!(city.unwrap().name, "Sydney");
        assert!(ui.has_error(
            "'Atlantis' is not found. Please check the spelling, or try another city."
        ));
    }

    #[test]
    fn several_matches_offer_a_list() {
        let atlas = Atlas::example();
        let mut ui = MockUI::new();
        // "aus" matches every Australian city through its ISO code.
        ui.set_prompt_response("city_search", "aus");
        ui.set_prompt_response("city_matches", "1");

        let city = select_location(&mut ui, &atlas, "Search").unwrap().unwrap();
        let options = ui.options_shown("city_matches").unwrap();
        assert_eq!(options[0], "[Search again...]");
        assert_eq!(options[2], city.to_string());
    }

    #[test]
    fn search_again_returns_to_the_search_box() {
        let atlas = Atlas::example();
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("city_search", vec!["aus", "Tokyo"]);
        ui.set_prompt_response("city_matches", "again");

        let city = select_location(&mut ui, &atlas, "Search").unwrap();
        assert_eq!(city.unwrap().name, "Tokyo");
    }
}
