//! Rule restricting imports to specified packages.
//!
//! Each restriction pairs a package with an import regex. An import line
//! matching a restriction's regex is only allowed in files whose first line
//! declares that package (or a sub-package). The first restriction whose
//! regex matches decides; imports matching none are allowed.
//!
//! # Configuration
//!
//! ```toml
//! [[rules.import-restriction.restrictions]]
//! package = "com.example.db"
//! imports = "import java\\.sql\\..*"
//! ```

use crate::patterns::whole_line;
use crate::scope::Scope;

use dirlint_core::{Analyzer, AnalyzerError, ConfigError, LineContext, Rule, Violation};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Rule code for import-restriction.
pub const CODE: &str = "DL002";

/// Rule name for import-restriction.
pub const NAME: &str = "import-restriction";

/// What import-restriction checks.
pub const DESCRIPTION: &str = "Restricts imports to the packages allowed to use them";

const MESSAGE: &str =
    "Violation was caused by an import which does not matching any of the import restrictions.";

/// A package and the imports only it may use.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImportRestriction {
    /// Package allowed to use the imports, e.g. `com.example.db`.
    pub package: String,
    /// Regex of the restricted import lines.
    pub imports: String,
}

impl ImportRestriction {
    /// Creates a restriction.
    #[must_use]
    pub fn new(package: impl Into<String>, imports: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: imports.into(),
        }
    }
}

#[derive(Debug, Clone)]
struct Compiled {
    package_line: String,
    imports: Regex,
}

/// Flags imports used outside the package they are restricted to.
#[derive(Debug, Clone)]
pub struct ImportsRestrictedToPackages {
    restrictions: Vec<Compiled>,
    scope: Scope,
}

impl ImportsRestrictedToPackages {
    /// Creates the rule over `.java` files.
    ///
    /// # Errors
    ///
    /// Returns an error if an import regex is invalid.
    pub fn new(restrictions: &[ImportRestriction]) -> Result<Self, ConfigError> {
        let restrictions = restrictions
            .iter()
            .map(|r| {
                Ok(Compiled {
                    package_line: format!("package {}", r.package),
                    imports: whole_line(NAME, "imports", &r.imports)?,
                })
            })
            .collect::<Result<_, ConfigError>>()?;
        Ok(Self {
            restrictions,
            scope: Scope::new(".java"),
        })
    }

    /// Sets the files to scan.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    fn used_outside_package(&self, package_line: &str, line: &str) -> bool {
        if !line.starts_with("import ") {
            return false;
        }
        self.restrictions
            .iter()
            .find(|r| r.imports.is_match(line))
            .is_some_and(|r| !package_line.starts_with(&r.package_line))
    }
}

impl Rule for ImportsRestrictedToPackages {
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
        analyzer.analyse_lines_in_context(
            &request,
            |ctx: &LineContext<'_>| Ok(self.used_outside_package(ctx.first_line(), ctx.line)),
            MESSAGE,
        )
    }
}
