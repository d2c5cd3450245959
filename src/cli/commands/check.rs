//! Check command implementation.
//!
//! The `peercheck check` command (also the default) scans the dependency
//! store, validates every declared peer, prints the report, and applies the
//! exit policy.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::{load_project_config, CheckSettings, Environment};
use crate::error::Result;
use crate::peers::check_peers;
use crate::report::{
    ExitStatus, HumanFormatter, JsonFormatter, OutputFormat, Report, ReportFormatter,
};
use crate::store::RunContext;
use crate::ui::{should_use_colors, UserInterface};

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
    env: Environment,
    use_color: bool,
}

impl CheckCommand {
    /// Create a new check command reading the process environment.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            env: Environment::from_env(),
            use_color: should_use_colors(),
        }
    }

    /// Replace the environment layer.
    pub fn with_environment(mut self, env: Environment) -> Self {
        self.env = env;
        self
    }

    /// Force colors on or off in the human report.
    pub fn with_color(mut self, use_color: bool) -> Self {
        self.use_color = use_color;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Resolve settings from config, environment, and flags.
    pub fn settings(&self) -> Result<CheckSettings> {
        let config = load_project_config(&self.project_root)?;
        Ok(CheckSettings::resolve(
            &self.project_root,
            &config,
            self.env,
            self.args.overrides(),
        ))
    }

    /// Render the report in the selected format.
    fn format_output(&self, report: &Report, settings: &CheckSettings) -> Result<String> {
        let mut output = Vec::new();
        match settings.format {
            OutputFormat::Human => {
                HumanFormatter::new(settings.mode, self.use_color).format(report, &mut output)?
            }
            OutputFormat::Json => {
                JsonFormatter::new(settings.strict, settings.mode.shows_satisfied())
                    .format(report, &mut output)?
            }
        }
        Ok(String::from_utf8_lossy(&output).into_owned())
    }

    fn show_verdict(&self, ui: &mut dyn UserInterface, report: &Report, settings: &CheckSettings) {
        let unchecked = report.summary.invalid_range + report.summary.invalid_version;

        if report.has_blocking_issues() {
            ui.warning("Some peer dependencies need fixing (see suggestions above)");
        } else {
            ui.success("All peer dependencies are satisfied");
        }
        if unchecked > 0 {
            ui.warning(&format!(
                "{} peer {} could not be checked",
                unchecked,
                if unchecked == 1 {
                    "dependency"
                } else {
                    "dependencies"
                }
            ));
        }

        if report.exit_status(settings.strict) == ExitStatus::Fail {
            let reason = if settings.ci {
                "CI mode enabled"
            } else {
                "Strict mode enabled"
            };
            ui.error(&format!(
                "{}: failing due to peer dependency issues",
                reason
            ));
        }
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let settings = self.settings()?;
        let ctx = RunContext::real();

        let mut spinner = ui.start_spinner(&format!(
            "Scanning {}",
            settings.store_root.display()
        ));
        let report = match check_peers(
            &ctx,
            &settings.store_root,
            &settings.scope,
            settings.package_manager,
        ) {
            Ok(report) => report,
            Err(e) => {
                spinner.finish_and_clear();
                return Err(e);
            }
        };
        spinner.finish_and_clear();

        let output = self.format_output(&report, &settings)?;
        match settings.format {
            OutputFormat::Json => ui.message(output.trim_end()),
            OutputFormat::Human => {
                ui.show_header(&format!(
                    "Peer dependencies in {}",
                    report.store_root.display()
                ));
                ui.message(output.trim_end());
                ui.message("");
                self.show_verdict(ui, &report, &settings);
            }
        }

        Ok(match report.exit_status(settings.strict) {
            ExitStatus::Pass => CommandResult::success(),
            ExitStatus::Fail => CommandResult::failure(ExitStatus::Fail.exit_code()),
        })
    }
}
