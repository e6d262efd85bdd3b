//! Rule requiring TODO comments to follow a structure.
//!
//! # Detected Patterns
//!
//! A line containing a `//` TODO comment (any letter case) that does not
//! match the structure as a whole line. The default structure requires a
//! date, e.g. `// TODO 2017/05/20 remove once migrated`.
//!
//! # Configuration
//!
//! - `structure`: regex the whole TODO line must match

use crate::patterns::{whole_line, DATED_TODO_PATTERN, TODO_PATTERN};
use crate::scope::Scope;

use dirlint_core::{Analyzer, AnalyzerError, ConfigError, Rule, Violation};
use regex::Regex;
use std::path::Path;

/// Rule code for todo-structure.
pub const CODE: &str = "DL001";

/// Rule name for todo-structure.
pub const NAME: &str = "todo-structure";

/// What todo-structure checks.
pub const DESCRIPTION: &str = "Requires TODO comments to match a structure (by default, a date)";

const MESSAGE: &str = "Violation was caused by the TODO not matching structure with regex: ";

/// Flags TODO comments that do not match a structure.
#[derive(Debug, Clone)]
pub struct TodoStructure {
    todo: Regex,
    structure: Regex,
    pattern: String,
    scope: Scope,
}

impl TodoStructure {
    /// Requires TODO lines to match `structure` in `.java` files.
    ///
    /// # Errors
    ///
    /// Returns an error if `structure` is not a valid regex.
    pub fn new(structure: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            todo: whole_line(NAME, "structure", TODO_PATTERN)?,
            structure: whole_line(NAME, "structure", structure)?,
            pattern: structure.to_string(),
            scope: Scope::new(".java"),
        })
    }

    /// Requires TODO lines to carry a date.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the built-in pattern is valid.
    pub fn dated() -> Result<Self, ConfigError> {
        Self::new(DATED_TODO_PATTERN)
    }

    /// Sets the files to scan.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// The structure pattern as configured.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    fn is_unstructured(&self, line: &str) -> bool {
        self.todo.is_match(line) && !self.structure.is_match(line)
    }
}

impl Rule for TodoStructure {
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
            |line| Ok(self.is_unstructured(line)),
            &format!("{MESSAGE}{}", self.pattern),
        )
    }
}
