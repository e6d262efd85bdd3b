//! Rule requiring files to contain some content.
//!
//! # Configuration
//!
//! - `content`: text every scanned file must contain
//! - `file_type`: files to scan (default: all files)

use crate::scope::Scope;

use dirlint_core::{Analyzer, AnalyzerError, Rule, Violation};
use std::path::Path;

/// Rule code for required-content.
pub const CODE: &str = "DL007";

/// Rule name for required-content.
pub const NAME: &str = "required-content";

/// What required-content checks.
pub const DESCRIPTION: &str = "Requires files to contain the configured content";

/// Flags files missing the required content.
#[derive(Debug, Clone)]
pub struct RequiredContent {
    content: String,
    scope: Scope,
}

impl RequiredContent {
    /// Requires every file to contain `content`.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            scope: Scope::new(""),
        }
    }

    /// Sets the files to scan.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

impl Rule for RequiredContent {
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
        analyzer.analyse_file_content(
            &request,
            |content| Ok(!content.contains(&self.content)),
            &format!("Expected file to contain content\n{}", self.content),
        )
    }
}
