//! Aggregated results of running several rules.

use crate::violation::Violation;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Violations found by one rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleReport {
    /// Rule code (e.g., "DL001").
    pub code: String,
    /// Rule name (e.g., "todo-structure").
    pub rule: String,
    /// Violations found by the rule.
    pub violations: Vec<Violation>,
}

impl RuleReport {
    /// Creates a new rule report.
    #[must_use]
    pub fn new(code: impl Into<String>, rule: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            violations,
        }
    }
}

/// Result of running a set of rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LintReport {
    /// One entry per rule, in the order the rules ran.
    pub rules: Vec<RuleReport>,
}

impl LintReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the result of one rule.
    pub fn push(&mut self, report: RuleReport) {
        self.rules.push(report);
    }

    /// Total number of violations across rules.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rules.iter().map(|r| r.violations.len()).sum()
    }

    /// Returns true if no rule found anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Distinct files with at least one violation.
    #[must_use]
    pub fn files_flagged(&self) -> usize {
        self.violations()
            .map(|(_, v)| v.path())
            .collect::<BTreeSet<&Path>>()
            .len()
    }

    /// Iterates over every violation with the rule that raised it.
    pub fn violations(&self) -> impl Iterator<Item = (&RuleReport, &Violation)> {
        self.rules
            .iter()
            .flat_map(|r| r.violations.iter().map(move |v| (r, v)))
    }

    /// Formats the report as plain text, one rendered violation per block.
    #[must_use]
    pub fn format_report(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        for rule in self.rules.iter().filter(|r| !r.violations.is_empty()) {
            let _ = writeln!(
                report,
                "=== {} [{}]: {} violation(s) ===\n",
                rule.rule,
                rule.code,
                rule.violations.len()
            );
            for violation in &rule.violations {
                let _ = writeln!(report, "{violation}");
            }
        }

        let _ = writeln!(
            report,
            "Found {} violation(s) in {} file(s)",
            self.total(),
            self.files_flagged()
        );
        report
    }
}
