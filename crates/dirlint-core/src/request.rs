//! Immutable description of one directory analysis.

use crate::analyzer::AnalyzerError;
use crate::exemption::{normalize_file_type, ExemptionFilter};

use std::path::{Path, PathBuf};

/// What to scan: a root directory, an optional file-type suffix and an
/// ignore list. Built once and never mutated during a traversal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    root: PathBuf,
    filter: ExemptionFilter,
}

impl AnalysisRequest {
    /// Starts building a request for `root`.
    #[must_use]
    pub fn builder(root: impl Into<PathBuf>) -> AnalysisRequestBuilder {
        AnalysisRequestBuilder::new(root)
    }

    /// The root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The file-type suffix, if any.
    #[must_use]
    pub fn file_type(&self) -> Option<&str> {
        self.filter.file_type()
    }

    /// The exemption filter applied during the walk.
    #[must_use]
    pub fn filter(&self) -> &ExemptionFilter {
        &self.filter
    }

    /// Fails unless the root is a directory.
    pub(crate) fn ensure_root_is_directory(&self) -> Result<(), AnalyzerError> {
        if self.root.is_dir() {
            Ok(())
        } else {
            Err(AnalyzerError::NotADirectory {
                path: self.root.clone(),
            })
        }
    }
}

/// Builder for an [`AnalysisRequest`].
#[derive(Debug, Clone)]
pub struct AnalysisRequestBuilder {
    root: PathBuf,
    file_type: Option<String>,
    ignored: Vec<String>,
}

impl AnalysisRequestBuilder {
    /// Creates a builder scanning every regular file under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            file_type: None,
            ignored: Vec::new(),
        }
    }

    /// Restricts the scan to files ending with `file_type`. A missing leading
    /// dot is added; an empty string scans all files.
    #[must_use]
    pub fn file_type(mut self, file_type: &str) -> Self {
        self.file_type = normalize_file_type(file_type);
        self
    }

    /// Restricts the scan to `.java` files.
    #[must_use]
    pub fn java_files(self) -> Self {
        self.file_type(".java")
    }

    /// Restricts the scan to `.properties` files.
    #[must_use]
    pub fn properties_files(self) -> Self {
        self.file_type(".properties")
    }

    /// Adds one ignore entry.
    #[must_use]
    pub fn ignore(mut self, entry: impl Into<String>) -> Self {
        self.ignored.push(entry.into());
        self
    }

    /// Adds several ignore entries.
    #[must_use]
    pub fn ignoring<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored.extend(entries.into_iter().map(Into::into));
        self
    }

    /// Builds the request.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::NotADirectory`] if the root is not a directory.
    pub fn build(self) -> Result<AnalysisRequest, AnalyzerError> {
        let request = AnalysisRequest {
            filter: ExemptionFilter::new(self.file_type, self.ignored),
            root: self.root,
        };
        request.ensure_root_is_directory()?;
        Ok(request)
    }
}
