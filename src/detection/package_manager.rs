//! Package manager detection.
//!
//! The package manager only affects the remediation command printed for
//! missing or mismatched peers.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A Node package manager.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    Npm,
    Yarn,
    #[default]
    Pnpm,
    Bun,
}

/// Lockfiles in detection order.
const LOCKFILES: &[(&str, PackageManager)] = &[
    ("pnpm-lock.yaml", PackageManager::Pnpm),
    ("yarn.lock", PackageManager::Yarn),
    ("bun.lockb", PackageManager::Bun),
    ("bun.lock", PackageManager::Bun),
    ("package-lock.json", PackageManager::Npm),
    ("npm-shrinkwrap.json", PackageManager::Npm),
];

impl PackageManager {
    /// Detect the package manager from the lockfile in `project_root`.
    pub fn detect(project_root: &Path) -> Option<Self> {
        LOCKFILES
            .iter()
            .find(|(lockfile, _)| project_root.join(lockfile).is_file())
            .map(|(_, manager)| *manager)
    }

    /// Executable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Bun => "bun",
        }
    }

    /// Command that installs `peer` within `range` in the project.
    pub fn add_command(&self, peer: &str, range: &str) -> String {
        let verb = match self {
            Self::Npm => "install",
            Self::Yarn | Self::Pnpm | Self::Bun => "add",
        };
        format!("{} {} {}@\"{}\"", self.name(), verb, peer, range)
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
