//! Rule forbidding `else` statements.
//!
//! A line is flagged when it contains ` else ` before any `//` or `/*`
//! comment start.

use crate::scope::Scope;

use dirlint_core::{Analyzer, AnalyzerError, Rule, Violation};
use std::path::Path;

/// Rule code for else-usage.
pub const CODE: &str = "DL006";

/// Rule name for else-usage.
pub const NAME: &str = "else-usage";

/// What else-usage checks.
pub const DESCRIPTION: &str = "Forbids 'else' statements";

const MESSAGE: &str = "'else' statement used.";

/// Flags `else` statements outside comments.
#[derive(Debug, Clone)]
pub struct ElseUsage {
    scope: Scope,
}

impl ElseUsage {
    /// Creates the rule over `.java` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: Scope::new(".java"),
        }
    }

    /// Sets the files to scan.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

impl Default for ElseUsage {
    fn default() -> Self {
        Self::new()
    }
}

fn uses_else(line: &str) -> bool {
    let Some(position) = line.find(" else ") else {
        return false;
    };
    let comment = [line.find("//"), line.find("/*")]
        .into_iter()
        .flatten()
        .min();
    comment.map_or(true, |start| position < start)
}

impl Rule for ElseUsage {
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
        analyzer.analyse_lines_of_file(&request, |line| Ok(uses_else(line)), MESSAGE)
    }
}
