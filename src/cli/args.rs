//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct. Check flags are accepted
//! both at the top level and on the explicit `check` subcommand.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::config::SettingsOverrides;
use crate::detection::PackageManager;
use crate::ui::OutputMode;

/// peercheck - Verify installed peer dependencies against declared ranges.
#[derive(Debug, Parser)]
#[command(name = "peercheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(flatten)]
    pub check: CheckArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// The check flags in effect, from the subcommand or the top level.
    pub fn check_args(&self) -> &CheckArgs {
        match &self.command {
            Some(Commands::Check(args)) => args,
            _ => &self.check,
        }
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Check peer dependencies (default if no command specified)
    Check(CheckArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Only print issues and the overall summary
    #[arg(short, long)]
    pub quiet: bool,

    /// Also list every satisfied peer
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Exit with status 1 when a peer is missing or mismatched
    #[arg(long)]
    pub strict: bool,

    /// Dependency store to scan, relative to the project (default: <project>/node_modules)
    #[arg(long, env = "PEERCHECK_ROOT")]
    pub root: Option<PathBuf>,

    /// Only check this consumer package (repeatable)
    #[arg(long = "package", value_name = "NAME")]
    pub packages: Vec<String>,

    /// Never check this peer (repeatable)
    #[arg(long, value_name = "PEER")]
    pub ignore: Vec<String>,

    /// Package manager used in remediation hints (default: detected)
    #[arg(long, value_enum)]
    pub package_manager: Option<PackageManager>,
}

impl CheckArgs {
    /// Output mode selected by `--quiet` / `--verbose`.
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_flags(self.quiet, self.verbose)
    }

    /// The command-line layer of settings resolution.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            root: self.root.clone(),
            strict: self.strict,
            json: self.json,
            mode: self.output_mode(),
            packages: self.packages.clone(),
            ignore: self.ignore.clone(),
            package_manager: self.package_manager,
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
