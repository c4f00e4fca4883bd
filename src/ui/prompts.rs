//! Interactive prompts.
//!
//! Select and confirm prompts can be cancelled with Esc or `q`, and a text
//! prompt by submitting an empty answer. That is how every menu goes back
//! one level.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::error::{NavError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType};

fn map_dialoguer_err(e: dialoguer::Error) -> NavError {
    NavError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Select { options } => prompt_select(prompt, options, term),
    }
}

/// Confirm prompts default to yes unless the prompt says otherwise.
fn confirm_default(prompt: &Prompt) -> bool {
    prompt
        .default
        .as_deref()
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "y" | "yes"))
        .unwrap_or(true)
}

/// Index of the option whose value matches the prompt default, else 0.
fn select_default(prompt: &Prompt, options: &[PromptOption]) -> usize {
    prompt
        .default
        .as_ref()
        .and_then(|d| options.iter().position(|o| o.value == *d))
        .unwrap_or(0)
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let result = Confirm::with_theme(&theme)
        .with_prompt(&prompt.question)
        .default(confirm_default(prompt))
        .interact_on_opt(term)
        .map_err(map_dialoguer_err)?;

    Ok(result.map_or(PromptResult::Cancelled, PromptResult::Bool))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(true);

    let result: String = if let Some(default) = &prompt.default {
        input
            .default(default.clone())
            .interact_on(term)
            .map_err(map_dialoguer_err)?
    } else {
        input.interact_on(term).map_err(map_dialoguer_err)?
    };

    if result.is_empty() {
        return Ok(PromptResult::Cancelled);
    }
    Ok(PromptResult::String(result))
}

fn prompt_select(prompt: &Prompt, options: &[PromptOption], term: &Term) -> Result<PromptResult> {
    let labels: Vec<_> = options.iter().map(|o| o.label.as_str()).collect();

    let theme = prompt_theme();
    let selection = Select::with_theme(&theme)
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(select_default(prompt, options))
        .interact_on_opt(term)
        .map_err(map_dialoguer_err)?;

    Ok(selection
        .and_then(|i| options.get(i))
        .map_or(PromptResult::Cancelled, |o| {
            PromptResult::String(o.value.clone())
        }))
}
