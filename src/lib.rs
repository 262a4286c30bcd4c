//! drupal-checks - Monitoring checks for Drupal sites, backed by drush.
//!
//! Two checks ship as separate binaries:
//!
//! - `check-drupal-modules` - flags modules with pending security updates
//! - `check-drupal-status` - flags core requirements at or above a severity
//!
//! Each run invokes drush once, parses its JSON output, prints one line per
//! flagged item followed by a status line, and exits with the usual
//! monitoring plugin codes (0 OK, 2 CRITICAL, 3 UNKNOWN).
//!
//! # Modules
//!
//! - [`check`] - Check evaluation, result sets, and the two checks
//! - [`cli`] - Argument parsing and binary entry points
//! - [`error`] - Error types and result aliases
//! - [`shell`] - External command execution
//!
//! # Example
//!
//! ```
//! use drupal_checks::check::{evaluate, ServiceState, StatusCheck};
//! use drupal_checks::shell::MockRunner;
//!
//! let check = StatusCheck::new("/var/www", 1, None);
//! let runner = MockRunner::succeeding("");
//!
//! let outcome = evaluate(&check, &runner, "drush");
//! assert_eq!(outcome.state, ServiceState::Ok);
//! ```

pub mod check;
pub mod cli;
pub mod error;
pub mod shell;

pub use error::{CheckError, Result};
