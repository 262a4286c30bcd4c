//! CLI argument definitions.
//!
//! Each check binary has its own [`clap::Parser`] struct. Both share the
//! site root, the exclusion option, the drush program and the debug flag.

use clap::builder::NonEmptyStringValueParser;
use clap::Parser;

use crate::check::status::DEFAULT_SEVERITY;
use crate::check::{ModuleSecurityCheck, StatusCheck};
use crate::error::Result;

/// Checks for security updates to Drupal core and contrib modules.
#[derive(Debug, Clone, Parser)]
#[command(name = "check-drupal-modules")]
#[command(version, about, long_about = None)]
pub struct ModulesArgs {
    /// Path to Drupal project root
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub path: String,

    /// Exclude modules whose name matches this regular expression
    #[arg(short, long, value_name = "PATTERN")]
    pub exclude: Option<String>,

    /// drush program to run
    #[arg(long, env = "DRUSH_BIN", default_value = "drush")]
    pub drush: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl ModulesArgs {
    /// Build the check these arguments describe.
    pub fn build(&self) -> Result<ModuleSecurityCheck> {
        ModuleSecurityCheck::new(self.path.clone(), self.exclude.as_deref())
    }
}

/// Verifies that all components of Drupal are working as intended.
#[derive(Debug, Clone, Parser)]
#[command(name = "check-drupal-status")]
#[command(version, about, long_about = None)]
pub struct StatusArgs {
    /// Path to Drupal project root
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub path: String,

    /// Report requirements with severity greater than or equal to this (-1 to 2)
    #[arg(short, long, default_value_t = DEFAULT_SEVERITY, allow_negative_numbers = true)]
    pub severity: i32,

    /// Comma-separated list of requirements to ignore
    #[arg(short, long, value_name = "LIST")]
    pub exclude: Option<String>,

    /// drush program to run
    #[arg(long, env = "DRUSH_BIN", default_value = "drush")]
    pub drush: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl StatusArgs {
    /// Build the check these arguments describe.
    pub fn build(&self) -> StatusCheck {
        StatusCheck::new(self.path.clone(), self.severity, self.exclude.clone())
    }
}
