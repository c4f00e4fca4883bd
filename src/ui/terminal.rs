//! Interactive terminal UI.

use console::Term;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::Write;
use std::time::{Duration, Instant};

use crate::error::Result;

use super::{prompt_user, NavTheme, NonInteractiveUI, OutputMode, Prompt, PromptResult, UserInterface};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: NavTheme,
    mode: OutputMode,
}

impl TerminalUI {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: NavTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.term)
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn clear(&mut self) {
        // Keep the scrollback when verbose so debug logs stay visible.
        if !self.mode.shows_details() {
            self.term.clear_screen().ok();
        }
    }

    fn wait_for_cancel(&mut self, timeout: Duration) -> bool {
        match poll_cancel_key(timeout) {
            Ok(cancelled) => cancelled,
            Err(e) => {
                tracing::debug!("Key polling unavailable: {}", e);
                std::thread::sleep(timeout);
                false
            }
        }
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }
}

/// Keys that stop a running simulation. Raw mode delivers Ctrl-C as a key.
pub(crate) fn is_cancel_key(key: &KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Read keys in raw mode until `timeout` elapses or a cancel key arrives.
fn poll_cancel_key(timeout: Duration) -> std::io::Result<bool> {
    terminal::enable_raw_mode()?;
    let result = read_until(Instant::now() + timeout);
    terminal::disable_raw_mode()?;
    result
}

fn read_until(deadline: Instant) -> std::io::Result<bool> {
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()? {
            if is_cancel_key(&key) {
                return Ok(true);
            }
        }
        if remaining.is_zero() {
            return Ok(false);
        }
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn cancel_keys() {
        assert!(is_cancel_key(&key(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_cancel_key(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
        assert!(is_cancel_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_cancel_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_cancel_key(&key(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet);
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }

    #[test]
    fn create_ui_non_interactive() {
        let ui = create_ui(false, OutputMode::Normal);
        assert!(!ui.is_interactive());
    }

    #[test]
    fn create_ui_respects_mode() {
        let ui = create_ui(false, OutputMode::Verbose);
        assert_eq!(ui.output_mode(), OutputMode::Verbose);
    }
}
