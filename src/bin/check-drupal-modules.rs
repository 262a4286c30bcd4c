//! Checks for security updates to Drupal core and contrib modules.

use std::process::ExitCode;

use clap::Parser;
use drupal_checks::cli::{init_tracing, run_modules, ModulesArgs};
use drupal_checks::shell::SystemRunner;

fn main() -> ExitCode {
    let args = ModulesArgs::parse();
    init_tracing(args.debug);

    tracing::debug!("check-drupal-modules starting with args: {:?}", args);

    let mut stdout = std::io::stdout().lock();
    let code = run_modules(&args, &SystemRunner, &mut stdout);
    ExitCode::from(code as u8)
}
