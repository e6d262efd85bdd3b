//! # dirlint-core
//!
//! Directory analysis engine for line- and file-oriented static checks.
//!
//! This crate walks a directory tree, applies caller-supplied predicates and
//! collects violations. It includes:
//!
//! - [`Analyzer`] with three analysis modes (path, content, per line)
//! - [`AnalysisRequest`] describing root, file type and ignore list
//! - [`LineCache`] for reading each file once across rules
//! - [`Violation`] for representing findings
//! - [`Rule`] trait for checks built on the analyzer
//!
//! ## Example
//!
//! ```ignore
//! use dirlint_core::{AnalysisRequest, Analyzer, LineCache};
//! use std::sync::Arc;
//!
//! let analyzer = Analyzer::new(Arc::new(LineCache::new()));
//! let request = AnalysisRequest::builder("./src")
//!     .java_files()
//!     .ignoring(["Generated"])
//!     .build()?;
//!
//! let violations = analyzer.analyse_lines_of_file(
//!     &request,
//!     |line| Ok(line.contains("System.out")),
//!     "Use a logger instead of System.out",
//! )?;
//! for violation in &violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod cache;
mod config;
mod exemption;
mod line_cache;
mod report;
mod request;
mod rule;
mod violation;
mod walker;

pub use analyzer::{
    Analyzer, AnalyzerError, BoxError, LineContext, PredicateResult, ANALYSIS_ERROR_MESSAGE,
    EMPTY_FILE_MESSAGE, UNREADABLE_FILE_MESSAGE,
};
pub use cache::LoadingCache;
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use exemption::{is_exempt, normalize_file_type, ExemptionFilter};
pub use line_cache::{FsLineSource, LineCache, LineSource, Lines, ReadError};
pub use report::{LintReport, RuleReport};
pub use request::{AnalysisRequest, AnalysisRequestBuilder};
pub use rule::{Rule, RuleBox};
pub use violation::{FileLineViolation, FileViolation, Violation};
pub use walker::{Candidate, Walker};
