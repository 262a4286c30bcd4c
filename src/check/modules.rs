//! Security update check for Drupal core and contrib modules.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{CheckError, Result};
use crate::shell::ToolInvocation;

use super::{CheckOutcome, DrushCheck, ResultSet};

/// One module with a pending security release, as reported by drush.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ModuleUpdate {
    pub existing_version: Option<String>,
    pub candidate_version: Option<String>,
}

impl ModuleUpdate {
    /// `"<key> - <existing> -> <candidate>"`
    pub fn detail_line(&self, key: &str) -> String {
        format!(
            "{} - {} -> {}",
            key,
            self.existing_version.as_deref().unwrap_or_default(),
            self.candidate_version.as_deref().unwrap_or_default()
        )
    }
}

/// Flags every module with an available security update.
#[derive(Debug, Clone)]
pub struct ModuleSecurityCheck {
    root: String,
    exclude: Option<Regex>,
}

impl ModuleSecurityCheck {
    /// Status line prefix.
    pub const NAME: &'static str = "CheckDrupalModules";

    /// Create the check for the site at `root`.
    ///
    /// `exclude` is a regular expression; modules whose name matches it are
    /// not reported.
    pub fn new(root: impl Into<String>, exclude: Option<&str>) -> Result<Self> {
        let exclude = exclude
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| CheckError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            root: root.into(),
            exclude,
        })
    }
}

impl DrushCheck for ModuleSecurityCheck {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn invocation(&self, tool: &str) -> ToolInvocation {
        ToolInvocation::new(tool)
            .arg("pm-updatestatus")
            .arg("--format=json")
            .arg("--security-only")
            .arg(format!("--root={}", self.root))
    }

    fn evaluate_entries(&self, entries: ResultSet<Value>) -> Result<CheckOutcome> {
        let entries = match &self.exclude {
            Some(pattern) => entries.exclude(pattern),
            None => entries,
        };

        if entries.is_empty() {
            return Ok(CheckOutcome::ok("No security updates available."));
        }

        let updates = entries.typed::<ModuleUpdate>()?;
        let details = updates
            .iter()
            .map(|(key, update)| update.detail_line(key))
            .collect();

        Ok(CheckOutcome::flagged(details))
    }
}
