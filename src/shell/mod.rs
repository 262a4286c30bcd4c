//! External command execution.

pub mod command;
pub mod mock;

pub use command::{CommandResult, CommandRunner, SystemRunner, ToolInvocation};
pub use mock::MockRunner;
