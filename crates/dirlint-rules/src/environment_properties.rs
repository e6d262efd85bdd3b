//! Rule requiring every environment's properties file to define the same keys.
//!
//! Properties files are compared in path order against the first readable
//! one. A file with a different key set is flagged once.

use crate::scope::Scope;

use dirlint_core::{
    Analyzer, AnalyzerError, Candidate, FileLineViolation, FileViolation, Rule, Violation,
    UNREADABLE_FILE_MESSAGE,
};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rule code for environment-properties.
pub const CODE: &str = "DL003";

/// Rule name for environment-properties.
pub const NAME: &str = "environment-properties";

/// What environment-properties checks.
pub const DESCRIPTION: &str = "Requires all properties files to define the same keys";

/// Flags properties files whose keys differ from the first one.
#[derive(Debug, Clone)]
pub struct EnvironmentProperties {
    scope: Scope,
}

impl EnvironmentProperties {
    /// Creates the rule over `.properties` files.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scope: Scope::new(".properties"),
        }
    }

    /// Sets the files to scan.
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }
}

impl Default for EnvironmentProperties {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EnvironmentProperties {
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
        let mut candidates = analyzer.candidates(&request)?;
        candidates.sort_by(|a, b| candidate_path(a).cmp(candidate_path(b)));

        let mut violations = Vec::new();
        let mut key_sets: Vec<(PathBuf, BTreeSet<String>)> = Vec::new();
        for candidate in candidates {
            match candidate {
                Candidate::File(path) => match analyzer.read_all_lines(&path) {
                    Ok(lines) => key_sets.push((path, property_keys(&lines))),
                    Err(e) => {
                        let line = format!("Unable to read properties file '{}'.", file_name(&path));
                        violations.push(FileLineViolation::new(path, line, e.to_string()).into());
                    }
                },
                Candidate::Unreadable { path, message } => violations.push(
                    FileViolation::new(path, format!("{UNREADABLE_FILE_MESSAGE}\n{message}")).into(),
                ),
            }
        }

        let Some((first, expected)) = key_sets.first() else {
            return Ok(violations);
        };
        debug!(
            "Comparing {} properties file(s) against {}",
            key_sets.len(),
            first.display()
        );
        for (path, keys) in &key_sets[1..] {
            if keys != expected {
                let message = format!(
                    "'{}' does not have matching property keys as '{}'",
                    file_name(path),
                    file_name(first)
                );
                violations.push(FileViolation::new(path.clone(), message).into());
            }
        }
        Ok(violations)
    }
}

fn candidate_path(candidate: &Candidate) -> &Path {
    match candidate {
        Candidate::File(path) | Candidate::Unreadable { path, .. } => path,
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Keys defined in the lines of a properties file.
fn property_keys(lines: &[String]) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    let mut continued = false;
    for line in lines {
        let trimmed = line.trim_start();
        if continued {
            continued = ends_with_continuation(trimmed);
            continue;
        }
        if trimmed.is_empty() || trimmed.starts_with(['#', '!']) {
            continue;
        }
        continued = ends_with_continuation(trimmed);
        keys.insert(property_key(trimmed));
    }
    keys
}

fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

fn property_key(line: &str) -> String {
    let mut key = String::new();
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    key.push(escaped);
                }
            }
            '=' | ':' => break,
            c if c.is_whitespace() => break,
            c => key.push(c),
        }
    }
    key
}
