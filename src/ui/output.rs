//! Output verbosity.

use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Also list every satisfied peer.
    Verbose,
    /// Issues, hints, and summary tables.
    #[default]
    Normal,
    /// Issues and the overall summary only.
    Quiet,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "verbose" => Ok(Self::Verbose),
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Pick a mode from the `--quiet` and `--verbose` flags. Quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode lists satisfied peers.
    pub fn shows_satisfied(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows the per-package table.
    pub fn shows_package_table(&self) -> bool {
        !matches!(self, Self::Quiet)
    }

    /// Check if this mode shows progress spinners and headers.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
