//! Check evaluation.
//!
//! A check runs drush once, reads its JSON output, and maps what it finds
//! onto a [`ServiceState`]. The pieces are split so each can be tested on
//! its own:
//!
//! - [`DrushCheck`] - what to run and how to judge the entries
//! - [`evaluate`] - runs a check through an injected [`CommandRunner`]
//! - [`report`] - prints detail lines and the status line, returns the exit code
//!
//! # Example
//!
//! ```
//! use drupal_checks::check::{evaluate, report, ModuleSecurityCheck, ServiceState};
//! use drupal_checks::shell::MockRunner;
//!
//! let check = ModuleSecurityCheck::new("/var/www", None).unwrap();
//! let runner = MockRunner::succeeding(
//!     r#"{"views":{"existing_version":"7.x-3.20","candidate_version":"7.x-3.22"}}"#,
//! );
//!
//! let outcome = evaluate(&check, &runner, "drush");
//! assert_eq!(outcome.state, ServiceState::Critical);
//!
//! let mut out: Vec<u8> = Vec::new();
//! let code = report(&check, &outcome, &mut out).unwrap();
//! assert_eq!(code, 2);
//! assert!(String::from_utf8(out).unwrap().starts_with("views - 7.x-3.20 -> 7.x-3.22\n"));
//! ```

pub mod entries;
pub mod modules;
pub mod status;

pub use entries::{parse_result_set, ResultSet};
pub use modules::{ModuleSecurityCheck, ModuleUpdate};
pub use status::{Requirement, StatusCheck};

use std::fmt;
use std::io::{self, Write};

use serde_json::Value;

use crate::error::{CheckError, Result};
use crate::shell::{CommandRunner, ToolInvocation};

/// Status line message when drush cannot be run or fails.
pub const TOOL_FAILURE_MESSAGE: &str = "drush not found or exited with a non-zero value";

/// Monitoring service state, using the usual plugin exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl ServiceState {
    /// Process exit code for this state.
    pub fn exit_code(&self) -> i32 {
        match self {
            ServiceState::Ok => 0,
            ServiceState::Warning => 1,
            ServiceState::Critical => 2,
            ServiceState::Unknown => 3,
        }
    }

    /// Upper-case label used in the status line.
    pub fn label(&self) -> &'static str {
        match self {
            ServiceState::Ok => "OK",
            ServiceState::Warning => "WARNING",
            ServiceState::Critical => "CRITICAL",
            ServiceState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one check run.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckOutcome {
    /// Overall state.
    pub state: ServiceState,

    /// Optional message appended to the status line.
    pub message: Option<String>,

    /// One line per flagged entry, printed before the status line.
    pub details: Vec<String>,
}

impl CheckOutcome {
    /// Passing outcome with a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Ok,
            message: Some(message.into()),
            details: Vec::new(),
        }
    }

    /// Critical outcome listing the flagged entries.
    pub fn flagged(details: Vec<String>) -> Self {
        Self {
            state: ServiceState::Critical,
            message: None,
            details,
        }
    }

    /// Critical outcome with a message and no details.
    pub fn critical(message: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Critical,
            message: Some(message.into()),
            details: Vec::new(),
        }
    }

    /// Unknown outcome, for when the check itself could not complete.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            state: ServiceState::Unknown,
            message: Some(message.into()),
            details: Vec::new(),
        }
    }

    /// Map an error onto an outcome.
    ///
    /// Tool failures are CRITICAL with a fixed message; anything else is
    /// UNKNOWN carrying the error text.
    pub fn from_error(err: &CheckError) -> Self {
        if err.is_tool_failure() {
            Self::critical(TOOL_FAILURE_MESSAGE)
        } else {
            Self::unknown(err.to_string())
        }
    }
}

/// A check backed by one drush subcommand.
pub trait DrushCheck {
    /// Name printed at the start of the status line.
    fn name(&self) -> &str;

    /// Build the drush invocation, using `tool` as the program.
    fn invocation(&self, tool: &str) -> ToolInvocation;

    /// Judge the parsed output.
    ///
    /// Called only when drush exited 0. `entries` is empty when drush
    /// printed nothing.
    fn evaluate_entries(&self, entries: ResultSet<Value>) -> Result<CheckOutcome>;
}

/// Run `check` once through `runner` and decide its outcome.
///
/// No process-exit side effects happen here; see [`report`].
pub fn evaluate(
    check: &dyn DrushCheck,
    runner: &dyn CommandRunner,
    tool: &str,
) -> CheckOutcome {
    match run_and_evaluate(check, runner, tool) {
        Ok(outcome) => outcome,
        Err(err) => {
            if err.is_tool_failure() {
                tracing::warn!("{}", err);
            } else {
                tracing::debug!("{} failed: {}", check.name(), err);
            }
            CheckOutcome::from_error(&err)
        }
    }
}

fn run_and_evaluate(
    check: &dyn DrushCheck,
    runner: &dyn CommandRunner,
    tool: &str,
) -> Result<CheckOutcome> {
    let invocation = check.invocation(tool);
    let result = runner.run(&invocation)?;
    let stderr = result.stderr.trim();

    // A failed run is fatal whatever it printed
    if !result.success {
        return Err(CheckError::ToolFailed {
            command: invocation.to_string(),
            code: result.exit_code,
            stderr: stderr.to_string(),
        });
    }

    if !stderr.is_empty() {
        tracing::debug!("{} stderr: {}", invocation.program, stderr);
    }

    let entries = parse_result_set(&result.stdout)?;
    tracing::debug!("{} parsed {} entries", check.name(), entries.len());

    check.evaluate_entries(entries)
}

/// Write the outcome and return the process exit code.
///
/// Detail lines come first, then exactly one status line of the form
/// `<name> <STATE>` or `<name> <STATE>: <message>`.
pub fn report(
    check: &dyn DrushCheck,
    outcome: &CheckOutcome,
    out: &mut dyn Write,
) -> io::Result<i32> {
    report_named(check.name(), outcome, out)
}

/// Like [`report`], for callers that only have the check's name.
pub fn report_named(name: &str, outcome: &CheckOutcome, out: &mut dyn Write) -> io::Result<i32> {
    for line in &outcome.details {
        writeln!(out, "{}", line)?;
    }

    match &outcome.message {
        Some(message) => writeln!(out, "{} {}: {}", name, outcome.state, message)?,
        None => writeln!(out, "{} {}", name, outcome.state)?,
    }
    out.flush()?;

    Ok(outcome.state.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{CommandResult, MockRunner};

    struct KeysCheck;

    impl DrushCheck for KeysCheck {
        fn name(&self) -> &str {
            "KeysCheck"
        }

        fn invocation(&self, tool: &str) -> ToolInvocation {
            ToolInvocation::new(tool).arg("list").arg("--format=json")
        }

        fn evaluate_entries(&self, entries: ResultSet<Value>) -> Result<CheckOutcome> {
            if entries.is_empty() {
                return Ok(CheckOutcome::ok("nothing"));
            }
            Ok(CheckOutcome::flagged(
                entries.keys().map(String::from).collect(),
            ))
        }
    }

    fn render(outcome: &CheckOutcome) -> (i32, String) {
        let mut out: Vec<u8> = Vec::new();
        let code = report(&KeysCheck, outcome, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn exit_codes_follow_plugin_convention() {
        assert_eq!(ServiceState::Ok.exit_code(), 0);
        assert_eq!(ServiceState::Warning.exit_code(), 1);
        assert_eq!(ServiceState::Critical.exit_code(), 2);
        assert_eq!(ServiceState::Unknown.exit_code(), 3);
    }

    #[test]
    fn runs_invocation_with_given_tool() {
        let runner = MockRunner::succeeding("");
        evaluate(&KeysCheck, &runner, "/opt/drush/drush");

        let inv = runner.last_invocation().unwrap();
        assert_eq!(inv.program, "/opt/drush/drush");
        assert_eq!(inv.args, vec!["list", "--format=json"]);
    }

    #[test]
    fn one_detail_line_per_entry() {
        let runner = MockRunner::succeeding(r#"{"a":{},"b":{},"c":{}}"#);
        let outcome = evaluate(&KeysCheck, &runner, "drush");

        assert_eq!(outcome.state, ServiceState::Critical);
        assert_eq!(outcome.details.len(), 3);
    }

    #[test]
    fn non_zero_exit_is_critical_even_with_entries() {
        let runner = MockRunner::exiting(1, r#"{"a":{}}"#);
        let outcome = evaluate(&KeysCheck, &runner, "drush");

        assert_eq!(outcome, CheckOutcome::critical(TOOL_FAILURE_MESSAGE));
    }

    #[test]
    fn non_zero_exit_with_garbage_is_still_critical() {
        let runner = MockRunner::exiting(127, "sh: drush: not found");
        let outcome = evaluate(&KeysCheck, &runner, "drush");

        assert_eq!(outcome.state, ServiceState::Critical);
    }

    #[test]
    fn failed_run_keeps_tool_stderr() {
        let runner = MockRunner::with_result(CommandResult::failure(
            Some(1),
            String::new(),
            "Drush was not able to start (bootstrap) Drupal.\n".to_string(),
        ));

        let err = run_and_evaluate(&KeysCheck, &runner, "drush").unwrap_err();
        match err {
            CheckError::ToolFailed { code, stderr, .. } => {
                assert_eq!(code, Some(1));
                assert_eq!(stderr, "Drush was not able to start (bootstrap) Drupal.");
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }

        let outcome = evaluate(&KeysCheck, &runner, "drush");
        assert_eq!(outcome, CheckOutcome::critical(TOOL_FAILURE_MESSAGE));
    }

    #[test]
    fn missing_tool_is_critical() {
        let runner = MockRunner::not_found("No such file or directory");
        let outcome = evaluate(&KeysCheck, &runner, "drush");

        assert_eq!(outcome, CheckOutcome::critical(TOOL_FAILURE_MESSAGE));
    }

    #[test]
    fn empty_output_is_ok() {
        let runner = MockRunner::succeeding("");
        let outcome = evaluate(&KeysCheck, &runner, "drush");

        assert_eq!(outcome, CheckOutcome::ok("nothing"));
    }

    #[test]
    fn unparseable_output_is_unknown() {
        let runner = MockRunner::succeeding("Drush command terminated abnormally");
        let outcome = evaluate(&KeysCheck, &runner, "drush");

        assert_eq!(outcome.state, ServiceState::Unknown);
        assert!(outcome
            .message
            .as_deref()
            .unwrap()
            .contains("Failed to parse drush output"));
    }

    #[test]
    fn report_prints_details_then_status() {
        let outcome = CheckOutcome::flagged(vec!["one".into(), "two".into()]);
        let (code, text) = render(&outcome);

        assert_eq!(code, 2);
        assert_eq!(text, "one\ntwo\nKeysCheck CRITICAL\n");
    }

    #[test]
    fn report_appends_message() {
        let (code, text) = render(&CheckOutcome::ok("all good"));

        assert_eq!(code, 0);
        assert_eq!(text, "KeysCheck OK: all good\n");
    }

    #[test]
    fn report_unknown_exits_three() {
        let (code, text) = render(&CheckOutcome::unknown("bad output"));

        assert_eq!(code, 3);
        assert_eq!(text, "KeysCheck UNKNOWN: bad output\n");
    }

    #[test]
    fn from_error_splits_tool_failures() {
        let tool = CheckError::ToolFailed {
            command: "drush".into(),
            code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(CheckOutcome::from_error(&tool).state, ServiceState::Critical);

        let other = CheckError::InvalidPattern {
            pattern: "(".into(),
            message: "unclosed".into(),
        };
        assert_eq!(CheckOutcome::from_error(&other).state, ServiceState::Unknown);
    }
}
