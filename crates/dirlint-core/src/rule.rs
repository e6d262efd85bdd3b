//! Rule trait for checks built on the analysis engine.

use crate::analyzer::{Analyzer, AnalyzerError};
use crate::violation::Violation;

use std::path::Path;

/// A check run against a directory.
///
/// Rules hold their own configuration and call into the [`Analyzer`] they
/// are given, choosing the analysis mode, file type and ignore list they need.
///
/// # Example
///
/// ```ignore
/// use dirlint_core::{AnalysisRequest, Analyzer, AnalyzerError, Rule, Violation};
/// use std::path::Path;
///
/// pub struct NoTabs;
///
/// impl Rule for NoTabs {
///     fn name(&self) -> &'static str { "no-tabs" }
///     fn code(&self) -> &'static str { "DL100" }
///
///     fn check(&self, analyzer: &Analyzer, root: &Path) -> Result<Vec<Violation>, AnalyzerError> {
///         let request = AnalysisRequest::builder(root).java_files().build()?;
///         analyzer.analyse_lines_of_file(&request, |line| Ok(line.contains('\t')), "Tab found.")
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "todo-structure").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "DL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Checks every relevant file under `root`.
    ///
    /// # Errors
    ///
    /// Returns an error only when the whole check cannot run, for example
    /// because `root` is not a directory.
    fn check(&self, analyzer: &Analyzer, root: &Path) -> Result<Vec<Violation>, AnalyzerError>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
