//! Command-line entry points for the check binaries.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`run_check`] - evaluate a check and print its result
//! - [`init_tracing`] - logging setup shared by both binaries

pub mod args;

pub use args::{ModulesArgs, StatusArgs};

use std::io::Write;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::check::{
    evaluate, report, report_named, CheckOutcome, DrushCheck, ModuleSecurityCheck, ServiceState,
};
use crate::shell::CommandRunner;

/// Crates whose events are logged: the library and both binaries.
const LOG_TARGETS: &[&str] = &["drupal_checks", "check_drupal_modules", "check_drupal_status"];

/// Initialize the tracing subscriber for logging.
///
/// Log level is controlled by:
/// 1. `--debug` flag sets level to DEBUG
/// 2. `RUST_LOG` environment variable (if set)
/// 3. Default is WARN
///
/// Logs go to stderr; stdout is reserved for check output.
pub fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new(format!("{}=debug", LOG_TARGETS.join("=debug,")))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("{}=warn", LOG_TARGETS.join("=warn,"))))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Evaluate `check` with `runner`, print the result to `out`, and return
/// the exit code.
pub fn run_check(
    check: &dyn DrushCheck,
    runner: &dyn CommandRunner,
    tool: &str,
    out: &mut dyn Write,
) -> i32 {
    let outcome = evaluate(check, runner, tool);
    report(check, &outcome, out).unwrap_or_else(|e| {
        tracing::error!("Failed to write check output: {}", e);
        ServiceState::Unknown.exit_code()
    })
}

/// Run the module security check described by `args`.
pub fn run_modules(args: &ModulesArgs, runner: &dyn CommandRunner, out: &mut dyn Write) -> i32 {
    match args.build() {
        Ok(check) => run_check(&check, runner, &args.drush, out),
        Err(e) => {
            let outcome = CheckOutcome::from_error(&e);
            report_named(ModuleSecurityCheck::NAME, &outcome, out)
                .unwrap_or_else(|_| ServiceState::Unknown.exit_code())
        }
    }
}

/// Run the core requirements check described by `args`.
pub fn run_status(args: &StatusArgs, runner: &dyn CommandRunner, out: &mut dyn Write) -> i32 {
    run_check(&args.build(), runner, &args.drush, out)
}
