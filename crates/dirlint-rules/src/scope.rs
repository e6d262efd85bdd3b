//! File type and ignore list a rule scans with.

use dirlint_core::{AnalysisRequest, AnalyzerError, Config};
use std::path::Path;

/// The files a rule looks at under a root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    file_type: String,
    ignore: Vec<String>,
}

impl Scope {
    /// Scans files ending with `file_type`; an empty string scans every file.
    #[must_use]
    pub fn new(file_type: impl Into<String>) -> Self {
        Self {
            file_type: file_type.into(),
            ignore: Vec::new(),
        }
    }

    /// Scope of `rule` in `config`, falling back to `default_file_type`.
    #[must_use]
    pub fn from_config(config: &Config, rule: &str, default_file_type: &str) -> Self {
        Self {
            file_type: config.file_type_for(rule, default_file_type),
            ignore: config.ignore_for(rule),
        }
    }

    /// Adds ignore entries.
    #[must_use]
    pub fn ignoring<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore.extend(entries.into_iter().map(Into::into));
        self
    }

    /// The file type suffix.
    #[must_use]
    pub fn file_type(&self) -> &str {
        &self.file_type
    }

    /// The ignore entries.
    #[must_use]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Builds the analysis request for `root`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyzerError::NotADirectory`] if `root` is not a directory.
    pub fn request(&self, root: &Path) -> Result<AnalysisRequest, AnalyzerError> {
        AnalysisRequest::builder(root)
            .file_type(&self.file_type)
            .ignoring(self.ignore.iter().cloned())
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_request_uses_file_type_and_ignore() {
        let tmp = TempDir::new().unwrap();
        let request = Scope::new("java")
            .ignoring(["Generated"])
            .request(tmp.path())
            .unwrap();

        assert_eq!(request.file_type(), Some(".java"));
        assert_eq!(request.filter().ignored(), ["Generated.java"]);
    }

    #[test]
    fn test_from_config_merges_ignore_lists() {
        let config = Config::parse(
            r#"
[analyzer]
ignore = ["Shared"]

[rules.else-usage]
file_type = ".kt"
ignore = ["Own"]
"#,
        )
        .unwrap();

        let scope = Scope::from_config(&config, "else-usage", ".java");
        assert_eq!(scope.file_type(), ".kt");
        assert_eq!(scope.ignore(), ["Shared", "Own"]);

        let scope = Scope::from_config(&config, "todo-structure", ".java");
        assert_eq!(scope.file_type(), ".java");
        assert_eq!(scope.ignore(), ["Shared"]);
    }
}
