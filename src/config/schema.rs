//! Project configuration file schema.

use std::path::PathBuf;

use serde::Deserialize;

use crate::detection::PackageManager;
use crate::error::{PeercheckError, Result};
use crate::report::OutputFormat;

/// Contents of `.peercheck.yml`.
///
/// Every key is optional. Unknown keys are rejected so typos surface as
/// parse errors instead of being ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PeercheckConfig {
    /// Store directory, relative to the project root.
    pub store_dir: Option<PathBuf>,

    /// Fail on missing or mismatched peers.
    pub strict: Option<bool>,

    /// Package manager used in remediation hints.
    pub package_manager: Option<PackageManager>,

    /// Peers never checked.
    pub ignore: Vec<String>,

    /// Consumers to check (all when empty).
    pub packages: Vec<String>,

    /// Default output format.
    pub output: Option<OutputFormat>,
}

impl PeercheckConfig {
    /// Reject values that deserialize but cannot be used.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.store_dir {
            if dir.as_os_str().is_empty() {
                return Err(PeercheckError::ConfigValidationError {
                    message: "store_dir must not be empty".to_string(),
                });
            }
        }
        for (key, names) in [("ignore", &self.ignore), ("packages", &self.packages)] {
            if names.iter().any(|name| name.trim().is_empty()) {
                return Err(PeercheckError::ConfigValidationError {
                    message: format!("{} entries must be package names", key),
                });
            }
        }
        Ok(())
    }
}
