//! Rule requiring TODOs to reference Jira issues in an allowed status.
//!
//! # Detected Patterns
//!
//! A `//` TODO line mentioning an issue matched by `issue_pattern`, whose
//! Jira status is not one of the allowed statuses. Lookup failures are
//! reported on the line instead of aborting the scan.
//!
//! # Configuration
//!
//! - `host`, `username`, `password` (or `password_env`)
//! - `allowed_statuses`: statuses compared ignoring case
//! - `issue_pattern`: regex of an issue key (default `[A-Z][A-Z0-9]*-[0-9]+`)

use crate::issues::{IssueError, JiraIssues};
use crate::patterns::{comment_text, compile, todo_referencing, whole_line};
use crate::scope::Scope;

use dirlint_core::{Analyzer, AnalyzerError, ConfigError, PredicateResult, Rule, Violation};
use regex::Regex;
use std::path::Path;

/// Rule code for jira-reference.
pub const CODE: &str = "DL004";

/// Rule name for jira-reference.
pub const NAME: &str = "jira-reference";

/// What jira-reference checks.
pub const DESCRIPTION: &str = "Requires TODOs to reference Jira issues in an allowed status";

/// Default regex of a Jira issue key.
pub const DEFAULT_ISSUE_PATTERN: &str = "[A-Z][A-Z0-9]*-[0-9]+";

/// Flags TODOs referencing Jira issues outside the allowed statuses.
#[derive(Debug)]
pub struct JiraReference {
    issues: JiraIssues,
    todo_line: Regex,
    issue: Regex,
    scope: Scope,
}

impl JiraReference {
    /// Creates the rule over `.java` files.
    ///
    /// # Errors
    ///
    /// Returns an error if `issue_pattern` is not a valid regex.
    pub fn new(issues: JiraIssues, issue_pattern: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            issues,
            todo_line: whole_line(NAME, "issue_pattern", &todo_referencing(issue_pattern))?,
            issue: compile(NAME, "issue_pattern", issue_pattern)?,
            scope: Scope::new(".java"),
        })
    }

    /// Sets the files to scan.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    fn references_disallowed_issue(&self, line: &str) -> PredicateResult {
        if !self.todo_line.is_match(line) {
            return Ok(false);
        }
        let issue = self.issue.find(comment_text(line)).ok_or_else(|| IssueError::NotFound {
            text: line.to_string(),
            pattern: self.issue.as_str().to_string(),
        })?;
        Ok(!self.issues.is_in_allowed_status(issue.as_str())?)
    }

    fn message(&self) -> String {
        format!(
            "Violation was caused by a reference to a Jira issue which is not in any of the accepted statuses: '[{}]'.",
            self.issues.allowed_statuses().join(", ")
        )
    }
}

impl Rule for JiraReference {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }

    fn check(&self, analyzer: &Analyzer, root: &Path) -> Result<Vec<Violation>, AnalyzerError> {
        let request = self.scope.request(root)?;
        analyzer.analyse_lines_of_file(
            &request,
            |line| self.references_disallowed_issue(line),
            &self.message(),
        )
    }
}
