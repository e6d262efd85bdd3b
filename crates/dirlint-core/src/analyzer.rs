//! The directory analysis engine.
//!
//! [`Analyzer`] walks an [`AnalysisRequest`]'s root, applies a caller-supplied
//! predicate to each candidate file and turns failures into [`Violation`]s.
//! Three modes share the same walk:
//!
//! - [`Analyzer::analyse_file`]: predicate on the file path
//! - [`Analyzer::analyse_file_content`]: predicate on the whole content
//! - [`Analyzer::analyse_lines_of_file`]: predicate on every line
//!
//! Problems with a single file never abort the scan. Read errors, empty files
//! and predicate errors each become one violation on that file.

use crate::line_cache::{LineCache, Lines};
use crate::report::{LintReport, RuleReport};
use crate::request::AnalysisRequest;
use crate::rule::RuleBox;
use crate::violation::{FileLineViolation, FileViolation, Violation};
use crate::walker::{Candidate, Walker};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Error type returned by fallible predicates.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Outcome of a predicate: `Ok(true)` means the check failed.
pub type PredicateResult = Result<bool, BoxError>;

/// Message of the violation raised for files without any line.
pub const EMPTY_FILE_MESSAGE: &str =
    "Empty file! - Should this file be in the list of ignored files? Or in a different directory?";

/// Prefix of the violation raised when a file cannot be read.
pub const UNREADABLE_FILE_MESSAGE: &str = "Unable to read file.";

/// Prefix of the violation raised when a predicate fails with an error.
pub const ANALYSIS_ERROR_MESSAGE: &str = "Error occurred analysing file.";

#[cfg(windows)]
const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
const LINE_SEPARATOR: &str = "\n";

/// Errors that fail a whole analysis call.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// The root to scan is not a directory.
    #[error("Expected a directory. '{}' was provided.", path.display())]
    NotADirectory {
        /// The offending root.
        path: PathBuf,
    },

    /// IO error outside per-file handling, such as an unreadable root.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// One line handed to a context-aware line predicate.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    /// The file being analysed.
    pub path: &'a Path,
    /// Every line of the file.
    pub lines: &'a [String],
    /// Zero-based index of the current line.
    pub index: usize,
    /// The current line.
    pub line: &'a str,
}

impl LineContext<'_> {
    /// One-based line number.
    #[must_use]
    pub fn number(&self) -> usize {
        self.index + 1
    }

    /// The first line of the file.
    #[must_use]
    pub fn first_line(&self) -> &str {
        self.lines.first().map_or("", String::as_str)
    }
}

enum Mode<'p> {
    Path(&'p dyn Fn(&Path) -> PredicateResult),
    Content(&'p dyn Fn(&str) -> PredicateResult),
    Lines(&'p dyn Fn(&LineContext<'_>) -> PredicateResult),
}

/// Runs predicates over the files of a directory.
///
/// The analyzer owns no scan state; it only holds the [`LineCache`] used to
/// read files. Analyzers built from the same `Arc<LineCache>` share reads.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    cache: Arc<LineCache>,
}

impl Analyzer {
    /// Creates an analyzer reading through `cache`.
    #[must_use]
    pub fn new(cache: Arc<LineCache>) -> Self {
        Self { cache }
    }

    /// The line cache used by this analyzer.
    #[must_use]
    pub fn cache(&self) -> &Arc<LineCache> {
        &self.cache
    }

    /// Reads the lines of a file through the shared cache.
    ///
    /// # Errors
    ///
    /// See [`LineCache::read_all_lines`].
    pub fn read_all_lines(&self, path: &Path) -> Result<Lines, crate::ReadError> {
        self.cache.read_all_lines(path)
    }

    /// Starts a walk over the candidate files of `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory or cannot be listed.
    pub fn walk<'r>(&self, request: &'r AnalysisRequest) -> Result<Walker<'r>, AnalyzerError> {
        request.ensure_root_is_directory()?;
        std::fs::read_dir(request.root())?;
        Ok(Walker::new(request.root(), request.filter()))
    }

    /// Collects the candidate files of `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root is not a directory or cannot be listed.
    pub fn candidates(&self, request: &AnalysisRequest) -> Result<Vec<Candidate>, AnalyzerError> {
        Ok(self.walk(request)?.collect())
    }

    /// Flags every candidate file whose path fails `predicate`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root itself cannot be scanned.
    pub fn analyse_file<F>(
        &self,
        request: &AnalysisRequest,
        predicate: F,
        message: &str,
    ) -> Result<Vec<Violation>, AnalyzerError>
    where
        F: Fn(&Path) -> PredicateResult,
    {
        self.analyse(request, &Mode::Path(&predicate), message)
    }

    /// Flags every candidate file whose content fails `predicate`.
    ///
    /// Lines are joined with the platform line separator. Empty files are
    /// always flagged, whatever the predicate says.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root itself cannot be scanned.
    pub fn analyse_file_content<F>(
        &self,
        request: &AnalysisRequest,
        predicate: F,
        message: &str,
    ) -> Result<Vec<Violation>, AnalyzerError>
    where
        F: Fn(&str) -> PredicateResult,
    {
        self.analyse(request, &Mode::Content(&predicate), message)
    }

    /// Flags every line failing `predicate`, in file order.
    ///
    /// Empty files are always flagged, whatever the predicate says.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root itself cannot be scanned.
    pub fn analyse_lines_of_file<F>(
        &self,
        request: &AnalysisRequest,
        predicate: F,
        message: &str,
    ) -> Result<Vec<Violation>, AnalyzerError>
    where
        F: Fn(&str) -> PredicateResult,
    {
        let per_line: &dyn Fn(&LineContext<'_>) -> PredicateResult = &|ctx| predicate(ctx.line);
        self.analyse(request, &Mode::Lines(per_line), message)
    }

    /// Like [`Analyzer::analyse_lines_of_file`], but the predicate also sees
    /// the file path and its other lines.
    ///
    /// # Errors
    ///
    /// Returns an error only if the root itself cannot be scanned.
    pub fn analyse_lines_in_context<F>(
        &self,
        request: &AnalysisRequest,
        predicate: F,
        message: &str,
    ) -> Result<Vec<Violation>, AnalyzerError>
    where
        F: Fn(&LineContext<'_>) -> PredicateResult,
    {
        self.analyse(request, &Mode::Lines(&predicate), message)
    }

    /// Runs every rule against `root` and gathers their violations.
    ///
    /// # Errors
    ///
    /// Returns the first whole-call error raised by a rule.
    pub fn run(&self, root: &Path, rules: &[RuleBox]) -> Result<LintReport, AnalyzerError> {
        if !root.is_dir() {
            return Err(AnalyzerError::NotADirectory {
                path: root.to_path_buf(),
            });
        }
        info!("Running {} rule(s) under {}", rules.len(), root.display());

        let mut report = LintReport::new();
        for rule in rules {
            debug!("Running rule: {}", rule.name());
            let violations = rule.check(self, root)?;
            report.push(RuleReport::new(rule.code(), rule.name(), violations));
        }

        info!(
            "Analysis complete: {} violation(s), {} cached file(s)",
            report.total(),
            self.cache.cached_files()
        );
        Ok(report)
    }

    fn analyse(
        &self,
        request: &AnalysisRequest,
        mode: &Mode<'_>,
        message: &str,
    ) -> Result<Vec<Violation>, AnalyzerError> {
        let walker = self.walk(request)?;
        info!("Starting analysis at {}", request.root().display());

        let mut violations = Vec::new();
        let mut files_checked = 0usize;

        for candidate in walker {
            match candidate {
                Candidate::File(path) => {
                    debug!("Analyzing: {}", path.display());
                    files_checked += 1;
                    violations.extend(self.analyse_candidate(&path, mode, message));
                }
                Candidate::Unreadable { path, message } => {
                    warn!("Unable to visit {}: {}", path.display(), message);
                    violations.push(
                        FileViolation::new(path, format!("{UNREADABLE_FILE_MESSAGE}\n{message}"))
                            .into(),
                    );
                }
            }
        }

        info!(
            "Checked {} file(s), found {} violation(s)",
            files_checked,
            violations.len()
        );
        Ok(violations)
    }

    fn analyse_candidate(&self, path: &Path, mode: &Mode<'_>, message: &str) -> Vec<Violation> {
        match mode {
            Mode::Path(predicate) => match predicate(path) {
                Ok(true) => vec![FileViolation::new(path, message).into()],
                Ok(false) => Vec::new(),
                Err(e) => vec![predicate_error(path, None, &*e)],
            },
            Mode::Content(predicate) => {
                let lines = match self.cache.read_all_lines(path) {
                    Ok(lines) => lines,
                    Err(e) => {
                        warn!("Unable to read {}: {}", path.display(), e);
                        return vec![FileViolation::new(
                            path,
                            format!("{UNREADABLE_FILE_MESSAGE}\n{e}"),
                        )
                        .into()];
                    }
                };
                if lines.is_empty() {
                    return vec![FileViolation::new(path, EMPTY_FILE_MESSAGE).into()];
                }

                let content = lines.join(LINE_SEPARATOR);
                match predicate(&content) {
                    Ok(true) => vec![FileViolation::new(path, message).into()],
                    Ok(false) => Vec::new(),
                    Err(e) => vec![predicate_error(path, None, &*e)],
                }
            }
            Mode::Lines(predicate) => {
                let lines = match self.cache.read_all_lines(path) {
                    Ok(lines) => lines,
                    Err(e) => {
                        warn!("Unable to read {}: {}", path.display(), e);
                        return vec![FileLineViolation::new(
                            path,
                            UNREADABLE_FILE_MESSAGE,
                            e.to_string(),
                        )
                        .into()];
                    }
                };
                if lines.is_empty() {
                    return vec![FileViolation::new(path, EMPTY_FILE_MESSAGE).into()];
                }

                lines
                    .iter()
                    .enumerate()
                    .filter_map(|(index, line)| {
                        let ctx = LineContext {
                            path,
                            lines: &lines[..],
                            index,
                            line,
                        };
                        match predicate(&ctx) {
                            Ok(true) => {
                                Some(FileLineViolation::new(path, line.as_str(), message).into())
                            }
                            Ok(false) => None,
                            Err(e) => Some(predicate_error(path, Some(line.as_str()), &*e)),
                        }
                    })
                    .collect()
            }
        }
    }
}

fn predicate_error(
    path: &Path,
    line: Option<&str>,
    error: &(dyn std::error::Error + Send + Sync),
) -> Violation {
    warn!("Predicate failed on {}: {}", path.display(), error);
    let message = format!("{ANALYSIS_ERROR_MESSAGE}\n{error}");
    match line {
        Some(line) => FileLineViolation::new(path, line, message).into(),
        None => FileViolation::new(path, message).into(),
    }
}
