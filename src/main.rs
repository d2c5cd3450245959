//! peercheck CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use peercheck::cli::{Cli, CommandDispatcher};
use peercheck::config::Environment;
use peercheck::ui::create_ui;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr so stdout only ever carries the report.
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("peercheck=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("peercheck=warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    // Exit code 2 is reserved for a missing dependency store, so usage
    // errors exit with 1 instead of clap's default.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
        Err(e) => e.exit(),
    };
    init_tracing(cli.debug);

    tracing::debug!("peercheck starting with args: {:?}", cli);

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    let project_root = cli
        .project
        .clone()
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    // CI logs get no spinners.
    let interactive = !Environment::from_env().ci;
    let mut ui = create_ui(interactive, cli.check_args().output_mode());

    let dispatcher = CommandDispatcher::new(project_root);
    match dispatcher.dispatch(&cli, ui.as_mut()) {
        Ok(result) => ExitCode::from(result.exit_code as u8),
        Err(e) => {
            ui.error(&format!("Error: {}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
