//! Terminal UI.

use std::io::Write;

use console::Term;

use super::{
    should_use_colors, OutputMode, PeercheckTheme, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// Terminal UI implementation.
///
/// Regular output goes to stdout; errors go to stderr so that a failed run
/// never corrupts machine-readable output.
pub struct TerminalUI {
    out: Term,
    err: Term,
    theme: PeercheckTheme,
    mode: OutputMode,
    interactive: bool,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode, interactive: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            theme: PeercheckTheme::for_color(should_use_colors()),
            mode,
            interactive,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.out, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.out, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.err, "{}", self.theme.format_error(msg)).ok();
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.interactive && self.mode.shows_progress() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.out, "{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Create the UI for a run.
///
/// Spinners are only drawn when `interactive` is set and stderr is a
/// terminal.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    let interactive = interactive && Term::stderr().is_term();
    Box::new(TerminalUI::new(mode, interactive))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_output_mode() {
        let ui = TerminalUI::new(OutputMode::Quiet, false);
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

    #[test]
    fn non_interactive_spinner_is_hidden() {
        let mut ui = TerminalUI::new(OutputMode::Normal, false);
        let mut spinner = ui.start_spinner("Scanning");
        spinner.finish_and_clear();
    }
}
