//! Error types for check execution.
//!
//! This module defines [`CheckError`], the error type used throughout the
//! crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Tool failures ([`CheckError::ToolNotFound`], [`CheckError::ToolFailed`])
//!   end the check as CRITICAL
//! - Everything else (unparseable output, bad patterns) ends it as UNKNOWN

use thiserror::Error;

/// Core error type for check execution.
#[derive(Debug, Error)]
pub enum CheckError {
    /// The external tool could not be started.
    #[error("Failed to start '{program}': {message}")]
    ToolNotFound { program: String, message: String },

    /// The external tool ran but exited with a non-zero status.
    ///
    /// `stderr` holds whatever the tool printed there, trimmed.
    #[error("Command failed with exit code {code:?}: {command}{}", stderr_suffix(.stderr))]
    ToolFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// The tool's stdout was not the JSON mapping we expected.
    #[error("Failed to parse drush output: {message}")]
    MalformedOutput { message: String },

    /// The exclude pattern is not a valid regular expression.
    #[error("Invalid exclude pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n{}", stderr)
    }
}

impl CheckError {
    /// Whether this error means the tool itself could not do its job.
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            CheckError::ToolNotFound { .. } | CheckError::ToolFailed { .. }
        )
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(err: serde_json::Error) -> Self {
        CheckError::MalformedOutput {
            message: err.to_string(),
        }
    }
}

/// Result type alias for check operations.
pub type Result<T> = std::result::Result<T, CheckError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_not_found_displays_program_and_message() {
        let err = CheckError::ToolNotFound {
            program: "drush".into(),
            message: "No such file or directory".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("drush"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn tool_failed_displays_command_and_code() {
        let err = CheckError::ToolFailed {
            command: "drush core-requirements".into(),
            code: Some(1),
            stderr: String::new(),
        };
        assert_eq!(
            err.to_string(),
            "Command failed with exit code Some(1): drush core-requirements"
        );
    }

    #[test]
    fn tool_failed_appends_stderr() {
        let err = CheckError::ToolFailed {
            command: "drush pm-updatestatus".into(),
            code: Some(1),
            stderr: "Could not find a Drupal settings.php file".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Command failed with exit code Some(1): drush pm-updatestatus\n"));
        assert!(msg.ends_with("Could not find a Drupal settings.php file"));
    }

    #[test]
    fn malformed_output_displays_message() {
        let err = CheckError::MalformedOutput {
            message: "expected value at line 1".into(),
        };
        assert!(err.to_string().contains("expected value at line 1"));
    }

    #[test]
    fn invalid_pattern_displays_pattern() {
        let err = CheckError::InvalidPattern {
            pattern: "views(".into(),
            message: "unclosed group".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("views("));
        assert!(msg.contains("unclosed group"));
    }

    #[test]
    fn tool_errors_are_tool_failures() {
        assert!(CheckError::ToolFailed {
            command: "drush".into(),
            code: None,
            stderr: String::new(),
        }
        .is_tool_failure());
        assert!(CheckError::ToolNotFound {
            program: "drush".into(),
            message: "missing".into(),
        }
        .is_tool_failure());
        assert!(!CheckError::MalformedOutput {
            message: "bad".into(),
        }
        .is_tool_failure());
    }

    #[test]
    fn json_error_converts_to_malformed_output() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: CheckError = json_err.into();
        assert!(matches!(err, CheckError::MalformedOutput { .. }));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(CheckError::MalformedOutput {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
