//! Visual theme and styling.

use console::Style;

use crate::peers::PeerStatus;

/// Terminal styles for peercheck output.
#[derive(Debug, Clone)]
pub struct PeercheckTheme {
    /// Style for success messages (green).
    pub success: Style,
    /// Style for warning messages (yellow).
    pub warning: Style,
    /// Style for error messages (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (cyan bold).
    pub header: Style,
    /// Style for remediation commands (cyan).
    pub command: Style,
    /// Style for box-drawing borders (dim).
    pub border: Style,
}

impl Default for PeercheckTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl PeercheckTheme {
    /// Create the colored theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().cyan(),
            command: Style::new().cyan(),
            border: Style::new().dim(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            command: Style::new(),
            border: Style::new(),
        }
    }

    /// Pick the colored or plain theme.
    pub fn for_color(use_color: bool) -> Self {
        if use_color {
            Self::new()
        } else {
            Self::plain()
        }
    }

    /// Format a success message (icon + text in green).
    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    /// Format a warning message (icon + text in yellow).
    pub fn format_warning(&self, msg: &str) -> String {
        format!("{}", self.warning.apply_to(format!("⚠ {}", msg)))
    }

    /// Format an error message (icon + text in red bold).
    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    /// Format a header banner.
    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Icon for a check status.
    pub fn status_icon(status: PeerStatus) -> &'static str {
        match status {
            PeerStatus::Satisfied => "✓",
            PeerStatus::Missing | PeerStatus::Mismatched => "✗",
            PeerStatus::InvalidRange | PeerStatus::InvalidVersion => "?",
        }
    }

    /// Style for a check status.
    pub fn status_style(&self, status: PeerStatus) -> &Style {
        match status {
            PeerStatus::Satisfied => &self.success,
            PeerStatus::Missing | PeerStatus::Mismatched => &self.error,
            PeerStatus::InvalidRange | PeerStatus::InvalidVersion => &self.warning,
        }
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // Check NO_COLOR env var (https://no-color.org/)
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    console::Term::stdout().is_term()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_formats_success() {
        let theme = PeercheckTheme::plain();
        let msg = theme.format_success("Complete");
        assert_eq!(msg, "✓ Complete");
    }

    #[test]
    fn theme_formats_warning() {
        let theme = PeercheckTheme::plain();
        let msg = theme.format_warning("Caution");
        assert!(msg.contains("⚠"));
        assert!(msg.contains("Caution"));
    }

    #[test]
    fn theme_formats_error() {
        let theme = PeercheckTheme::plain();
        let msg = theme.format_error("Failed");
        assert!(msg.contains("✗"));
        assert!(msg.contains("Failed"));
    }

    #[test]
    fn plain_header_is_unstyled() {
        let theme = PeercheckTheme::for_color(false);
        assert_eq!(theme.format_header("peercheck"), "peercheck");
    }

    #[test]
    fn status_icons() {
        assert_eq!(PeercheckTheme::status_icon(PeerStatus::Satisfied), "✓");
        assert_eq!(PeercheckTheme::status_icon(PeerStatus::Mismatched), "✗");
        assert_eq!(PeercheckTheme::status_icon(PeerStatus::InvalidRange), "?");
    }

    #[test]
    fn status_styles_apply_without_panic() {
        let theme = PeercheckTheme::new();
        for status in [
            PeerStatus::Satisfied,
            PeerStatus::Missing,
            PeerStatus::Mismatched,
            PeerStatus::InvalidRange,
            PeerStatus::InvalidVersion,
        ] {
            let _ = theme.status_style(status).apply_to(status.as_str());
        }
    }
}
