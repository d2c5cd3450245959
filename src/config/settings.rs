//! Resolution of the settings for one check run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::schema::PeercheckConfig;
use crate::detection::PackageManager;
use crate::peers::CheckScope;
use crate::report::OutputFormat;
use crate::store::STORE_DIR;
use crate::ui::OutputMode;

/// Whether an environment value counts as "on".
///
/// Anything other than empty, `0`, or `false` (any case) is truthy.
pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

/// Environment inputs to settings resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Environment {
    /// `CI` is set to a truthy value.
    pub ci: bool,
}

impl Environment {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self {
            ci: std::env::var("CI").map(|v| is_truthy(&v)).unwrap_or(false),
        }
    }
}

/// Values given on the command line. `None` and empty mean "not given".
#[derive(Debug, Clone, Default)]
pub struct SettingsOverrides {
    pub root: Option<PathBuf>,
    pub strict: bool,
    pub json: bool,
    pub mode: OutputMode,
    pub packages: Vec<String>,
    pub ignore: Vec<String>,
    pub package_manager: Option<PackageManager>,
}

/// Fully resolved settings for a check run.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    pub project_root: PathBuf,
    pub store_root: PathBuf,
    pub strict: bool,
    /// Strict mode was forced by `CI`.
    pub ci: bool,
    pub format: OutputFormat,
    pub mode: OutputMode,
    pub package_manager: PackageManager,
    pub scope: CheckScope,
}

impl CheckSettings {
    /// Layer defaults, the config file, the environment, and CLI flags.
    pub fn resolve(
        project_root: &Path,
        config: &PeercheckConfig,
        env: Environment,
        overrides: SettingsOverrides,
    ) -> Self {
        // Relative store paths from any layer are relative to the project.
        let store_root = overrides
            .root
            .map(|root| project_root.join(root))
            .or_else(|| config.store_dir.as_ref().map(|dir| project_root.join(dir)))
            .unwrap_or_else(|| project_root.join(STORE_DIR));

        let strict = overrides.strict || env.ci || config.strict.unwrap_or(false);

        let format = if overrides.json {
            OutputFormat::Json
        } else {
            config.output.unwrap_or_default()
        };

        let package_manager = overrides
            .package_manager
            .or(config.package_manager)
            .or_else(|| {
                let lockfile_dir = store_root.parent().unwrap_or(project_root);
                PackageManager::detect(lockfile_dir)
            })
            .unwrap_or_default();

        let packages = if overrides.packages.is_empty() {
            config.packages.clone()
        } else {
            overrides.packages
        };

        let mut ignore = config.ignore.clone();
        for peer in overrides.ignore {
            if !ignore.contains(&peer) {
                ignore.push(peer);
            }
        }

        let settings = Self {
            project_root: project_root.to_path_buf(),
            store_root,
            strict,
            ci: env.ci,
            format,
            mode: overrides.mode,
            package_manager,
            scope: CheckScope { packages, ignore },
        };
        debug!("Resolved settings: {:?}", settings);
        settings
    }
}
