//! Core requirements check.
//!
//! Unlike the module check, filtering happens inside drush: the severity
//! threshold and the ignore list are forwarded as flags and whatever comes
//! back is reported.

use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::shell::ToolInvocation;

use super::{CheckOutcome, DrushCheck, ResultSet};

/// Default severity threshold (drush's "warning").
pub const DEFAULT_SEVERITY: i32 = 1;

/// One requirement row from `drush core-requirements`.
///
/// Fields are kept as raw JSON; drush modules are free to put markup
/// arrays or numbers in any of them.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Requirement {
    pub title: Option<Value>,
    pub value: Option<Value>,
    pub description: Option<Value>,
}

/// Strings unquoted, anything else as JSON text, absent as empty.
fn render(field: Option<&Value>) -> String {
    match field {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

impl Requirement {
    /// The value, or the description when drush reports no value.
    pub fn summary(&self) -> String {
        render(self.value.as_ref().or(self.description.as_ref()))
    }

    /// `"<key> - <title>: <value-or-description>"`
    pub fn detail_line(&self, key: &str) -> String {
        format!("{} - {}: {}", key, render(self.title.as_ref()), self.summary())
    }
}

/// Flags every requirement drush reports at or above a severity.
#[derive(Debug, Clone)]
pub struct StatusCheck {
    root: String,
    severity: i32,
    ignore: Option<String>,
}

impl StatusCheck {
    /// Status line prefix.
    pub const NAME: &'static str = "CheckDrupalStatus";

    /// Create the check for the site at `root`.
    ///
    /// `ignore` is a comma-separated list of requirement keys, handed to
    /// drush as-is.
    pub fn new(root: impl Into<String>, severity: i32, ignore: Option<String>) -> Self {
        Self {
            root: root.into(),
            severity,
            ignore,
        }
    }
}

impl DrushCheck for StatusCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn invocation(&self, tool: &str) -> ToolInvocation {
        ToolInvocation::new(tool)
            .arg("core-requirements")
            .arg("--format=json")
            .arg(format!("--severity={}", self.severity))
            .arg(format!("--root={}", self.root))
            .arg_if_some(self.ignore.as_ref().map(|list| format!("--ignore={}", list)))
    }

    fn evaluate_entries(&self, entries: ResultSet<Value>) -> Result<CheckOutcome> {
        if entries.is_empty() {
            return Ok(CheckOutcome::ok(format!(
                "No reported errors of severity higher than: {}",
                self.severity
            )));
        }

        let requirements = entries.typed::<Requirement>()?;
        let details = requirements
            .iter()
            .map(|(key, requirement)| requirement.detail_line(key))
            .collect();

        Ok(CheckOutcome::flagged(details))
    }
}
