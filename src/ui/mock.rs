//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use navigator::ui::{MockUI, Prompt, PromptResult, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.queue_prompt_responses("main_menu", vec!["vehicles", MockUI::CANCEL]);
//!
//! let prompt = Prompt::input("main_menu", "Main Menu");
//! assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::String("vehicles".into()));
//! assert_eq!(ui.prompt(&prompt).unwrap(), PromptResult::Cancelled);
//! assert_eq!(ui.prompts_shown(), &["main_menu", "main_menu"]);
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::error::Result;

use super::{OutputMode, Prompt, PromptResult, PromptType, UserInterface};

/// Mock UI implementation for testing.
///
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked several times.
/// A prompt with no configured answer and no default is cancelled, so menu
/// loops always unwind once their script runs out.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    clears: usize,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    prompts_shown: Vec<String>,
    select_options: HashMap<String, Vec<String>>,
    cancel_after_waits: Option<usize>,
    waits: usize,
}

impl MockUI {
    /// Response that cancels the prompt, like pressing Esc.
    pub const CANCEL: &'static str = "<cancel>";

    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Self::new()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of times the screen was cleared.
    pub fn clears(&self) -> usize {
        self.clears
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Labels of the last select prompt shown with this key.
    pub fn options_shown(&self, key: &str) -> Option<&[String]> {
        self.select_options.get(key).map(Vec::as_slice)
    }

    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    pub fn has_header(&self, title: &str) -> bool {
        self.headers.iter().any(|h| h.contains(title))
    }

    /// Press a cancel key during the `n`th wait, counting from 1.
    pub fn cancel_after_waits(&mut self, n: usize) {
        self.cancel_after_waits = Some(n);
    }

    /// Number of times `wait_for_cancel` was called.
    pub fn waits(&self) -> usize {
        self.waits
    }

    /// Clear all captured interactions.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.successes.clear();
        self.warnings.clear();
        self.errors.clear();
        self.headers.clear();
        self.clears = 0;
        self.waits = 0;
        self.prompts_shown.clear();
        self.select_options.clear();
    }

    fn answer(prompt: &Prompt, response: &str) -> PromptResult {
        if response == Self::CANCEL {
            return PromptResult::Cancelled;
        }
        match prompt.prompt_type {
            PromptType::Confirm => {
                PromptResult::Bool(matches!(response, "true" | "yes" | "y" | "1"))
            }
            _ => PromptResult::String(response.to_string()),
        }
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());
        if let PromptType::Select { options } = &prompt.prompt_type {
            self.select_options.insert(
                prompt.key.clone(),
                options.iter().map(|o| o.label.clone()).collect(),
            );
        }

        // Queued responses first (for keys asked several times)
        if let Some(response) = self
            .prompt_queues
            .get_mut(&prompt.key)
            .and_then(VecDeque::pop_front)
        {
            return Ok(Self::answer(prompt, &response));
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::answer(prompt, response));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::answer(prompt, default));
        }

        match prompt.prompt_type {
            PromptType::Confirm => Ok(PromptResult::Bool(false)),
            _ => Ok(PromptResult::Cancelled),
        }
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn clear(&mut self) {
        self.clears += 1;
    }

    fn wait_for_cancel(&mut self, _timeout: Duration) -> bool {
        self.waits += 1;
        self.cancel_after_waits.is_some_and(|n| self.waits >= n)
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}
