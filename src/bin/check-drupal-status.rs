//! Verifies that all components of Drupal are working as intended.

use std::process::ExitCode;

use clap::Parser;
use drupal_checks::cli::{init_tracing, run_status, StatusArgs};
use drupal_checks::shell::SystemRunner;

fn main() -> ExitCode {
    let args = StatusArgs::parse();
    init_tracing(args.debug);

    tracing::debug!("check-drupal-status starting with args: {:?}", args);

    let mut stdout = std::io::stdout().lock();
    let code = run_status(&args, &SystemRunner, &mut stdout);
    ExitCode::from(code as u8)
}
