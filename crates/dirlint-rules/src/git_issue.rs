//! Rule requiring TODOs to reference open GitHub issues.
//!
//! # Configuration
//!
//! - `user`, `repository`: the GitHub repository
//! - `api_host`: API host (default `https://api.github.com`)
//! - `issue_pattern`: regex of an issue reference (default `#[0-9]+`)

use crate::issues::{GitHubIssues, IssueError};
use crate::patterns::{comment_text, compile, todo_referencing, whole_line};
use crate::scope::Scope;

use dirlint_core::{Analyzer, AnalyzerError, ConfigError, PredicateResult, Rule, Violation};
use regex::Regex;
use std::path::Path;

/// Rule code for git-issue.
pub const CODE: &str = "DL005";

/// Rule name for git-issue.
pub const NAME: &str = "git-issue";

/// What git-issue checks.
pub const DESCRIPTION: &str = "Requires TODOs to reference open GitHub issues";

/// Default regex of a GitHub issue reference.
pub const DEFAULT_ISSUE_PATTERN: &str = "#[0-9]+";

const MESSAGE: &str =
    "Violation was caused by a reference to a Git issue which is not in the open state.";

/// Flags TODOs referencing GitHub issues that are no longer open.
#[derive(Debug)]
pub struct GitIssue {
    issues: GitHubIssues,
    todo_line: Regex,
    issue: Regex,
    scope: Scope,
}

impl GitIssue {
    /// Creates the rule over `.java` files.
    ///
    /// # Errors
    ///
    /// Returns an error if `issue_pattern` is not a valid regex.
    pub fn new(issues: GitHubIssues, issue_pattern: &str) -> Result<Self, ConfigError> {
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

    fn references_closed_issue(&self, line: &str) -> PredicateResult {
        if !self.todo_line.is_match(line) {
            return Ok(false);
        }
        let issue = self.issue.find(comment_text(line)).ok_or_else(|| IssueError::NotFound {
            text: line.to_string(),
            pattern: self.issue.as_str().to_string(),
        })?;
        Ok(!self.issues.is_open(issue.as_str())?)
    }
}

impl Rule for GitIssue {
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
        analyzer.analyse_lines_of_file(&request, |line| self.references_closed_issue(line), MESSAGE)
    }
}
