//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use peercheck::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Checking peers");
//! ui.success("Done!");
//!
//! assert!(ui.messages().contains(&"Checking peers".to_string()));
//! assert!(ui.successes().contains(&"Done!".to_string()));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use super::{OutputMode, SpinnerHandle, UserInterface};

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<Rc<RefCell<MockSpinnerState>>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of spinners started.
    pub fn spinner_count(&self) -> usize {
        self.spinners.len()
    }

    /// Final status of the most recent spinner.
    pub fn last_spinner_status(&self) -> Option<SpinnerStatus> {
        self.spinners.last().and_then(|s| s.borrow().status)
    }

    /// Whether any message, success, warning, or error contains `needle`.
    pub fn has_output(&self, needle: &str) -> bool {
        self.messages
            .iter()
            .chain(&self.successes)
            .chain(&self.warnings)
            .chain(&self.errors)
            .any(|line| line.contains(needle))
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

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let state = Rc::new(RefCell::new(MockSpinnerState {
            messages: vec![message.to_string()],
            status: None,
        }));
        self.spinners.push(Rc::clone(&state));
        Box::new(MockSpinner { state })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// How a mock spinner finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    Success,
    Error,
    Cleared,
}

#[derive(Debug, Default)]
struct MockSpinnerState {
    messages: Vec<String>,
    status: Option<SpinnerStatus>,
}

/// Spinner handle returned by [`MockUI`].
#[derive(Debug)]
pub struct MockSpinner {
    state: Rc<RefCell<MockSpinnerState>>,
}

impl MockSpinner {
    /// All messages the spinner displayed, in order.
    pub fn messages(&self) -> Vec<String> {
        self.state.borrow().messages.clone()
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.state.borrow_mut().messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        let mut state = self.state.borrow_mut();
        state.messages.push(msg.to_string());
        state.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        let mut state = self.state.borrow_mut();
        state.messages.push(msg.to_string());
        state.status = Some(SpinnerStatus::Error);
    }

    fn finish_and_clear(&mut self) {
        self.state.borrow_mut().status = Some(SpinnerStatus::Cleared);
    }
}
