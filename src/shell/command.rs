//! External command execution.
//!
//! Commands are always spawned from an argument list. Nothing is passed
//! through a shell, so values like the site root or an ignore list reach the
//! tool verbatim as single arguments.

use crate::error::{CheckError, Result};
use std::fmt;
use std::process::{Command, Stdio};
use std::time::Instant;

/// A program plus its arguments, ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    /// Program name or path.
    pub program: String,

    /// Arguments, one element per argv entry.
    pub args: Vec<String>,
}

impl ToolInvocation {
    /// Create an invocation with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append an argument only when `value` is present.
    pub fn arg_if_some(self, value: Option<String>) -> Self {
        match value {
            Some(arg) => self.arg(arg),
            None => self,
        }
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Result of executing a command.
///
/// Both streams are read to completion once and owned here, so callers can
/// inspect them any number of times.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            success: false,
        }
    }
}

/// Something that can run a [`ToolInvocation`] to completion.
///
/// Checks receive a runner instead of spawning processes themselves, so
/// tests can substitute a fake tool.
pub trait CommandRunner {
    /// Run the invocation, waiting for it to exit.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not as
    /// an error. An error means the process could not be started at all.
    fn run(&self, invocation: &ToolInvocation) -> Result<CommandResult>;
}

/// Runs commands as real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &ToolInvocation) -> Result<CommandResult> {
        let start = Instant::now();

        let mut cmd = Command::new(&invocation.program);
        cmd.args(&invocation.args);
        cmd.stdin(Stdio::null());

        tracing::debug!("Running: {}", invocation);

        // output() waits for exit and drains both pipes
        let output = cmd.output().map_err(|e| CheckError::ToolNotFound {
            program: invocation.program.clone(),
            message: e.to_string(),
        })?;

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        tracing::debug!(
            "{} exited with {:?} after {:?} ({} bytes of stdout)",
            invocation.program,
            output.status.code(),
            duration,
            stdout.len()
        );

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr))
        } else {
            Ok(CommandResult::failure(output.status.code(), stdout, stderr))
        }
    }
}
