//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning anything. It
//! returns a canned result and records every invocation for later
//! assertion.
//!
//! # Example
//!
//! ```
//! use drupal_checks::shell::{CommandRunner, MockRunner, ToolInvocation};
//!
//! let runner = MockRunner::succeeding("{}");
//! let result = runner.run(&ToolInvocation::new("drush")).unwrap();
//!
//! assert!(result.success);
//! assert_eq!(runner.invocations().len(), 1);
//! ```

use std::cell::RefCell;

use crate::error::{CheckError, Result};

use super::command::{CommandResult, CommandRunner, ToolInvocation};

#[derive(Debug, Clone)]
enum Response {
    Result(CommandResult),
    SpawnFailure(String),
}

/// Mock runner that replays a fixed response.
#[derive(Debug)]
pub struct MockRunner {
    response: Response,
    invocations: RefCell<Vec<ToolInvocation>>,
}

impl MockRunner {
    /// A runner whose tool exits 0 with the given stdout.
    pub fn succeeding(stdout: &str) -> Self {
        Self::with_result(CommandResult::success(stdout.to_string(), String::new()))
    }

    /// A runner whose tool exits with `code` and the given stdout.
    pub fn exiting(code: i32, stdout: &str) -> Self {
        Self::with_result(CommandResult::failure(
            Some(code),
            stdout.to_string(),
            String::new(),
        ))
    }

    /// A runner whose tool cannot be started.
    pub fn not_found(message: &str) -> Self {
        Self {
            response: Response::SpawnFailure(message.to_string()),
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// A runner that returns exactly `result`.
    pub fn with_result(result: CommandResult) -> Self {
        Self {
            response: Response::Result(result),
            invocations: RefCell::new(Vec::new()),
        }
    }

    /// All invocations received so far.
    pub fn invocations(&self) -> Vec<ToolInvocation> {
        self.invocations.borrow().clone()
    }

    /// The most recent invocation, if any.
    pub fn last_invocation(&self) -> Option<ToolInvocation> {
        self.invocations.borrow().last().cloned()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<CommandResult> {
        self.invocations.borrow_mut().push(invocation.clone());
        match &self.response {
            Response::Result(result) => Ok(result.clone()),
            Response::SpawnFailure(message) => Err(CheckError::ToolNotFound {
                program: invocation.program.clone(),
                message: message.clone(),
            }),
        }
    }
}
