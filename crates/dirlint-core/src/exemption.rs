//! File-type and ignore-list filtering.

use std::path::Path;

/// Normalizes a file-type suffix: `"java"` becomes `".java"`, an empty
/// string means "all files".
#[must_use]
pub fn normalize_file_type(file_type: &str) -> Option<String> {
    let file_type = file_type.trim();
    if file_type.is_empty() {
        None
    } else if file_type.starts_with('.') {
        Some(file_type.to_string())
    } else {
        Some(format!(".{file_type}"))
    }
}

/// Decides which discovered files are skipped.
///
/// Ignore entries are suffixed with the file type when they do not already
/// end with it, then matched against the end of the path string. Entries may
/// therefore be bare names (`"Foo"`), file names (`"Foo.java"`) or partial
/// paths (`"sub/dir/Foo.java"`) that tell same-named files apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExemptionFilter {
    file_type: Option<String>,
    ignored: Vec<String>,
}

impl ExemptionFilter {
    /// Creates a filter for `file_type` (already normalized) and an ignore list.
    #[must_use]
    pub fn new<I, S>(file_type: Option<String>, ignored: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ignored = ignored
            .into_iter()
            .map(Into::into)
            .filter(|entry: &String| !entry.is_empty())
            .map(|entry| suffixed(entry, file_type.as_deref()))
            .collect();
        Self { file_type, ignored }
    }

    /// The configured file-type suffix, if any.
    #[must_use]
    pub fn file_type(&self) -> Option<&str> {
        self.file_type.as_deref()
    }

    /// The normalized ignore entries.
    #[must_use]
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    /// Returns true if `path` ends with any normalized ignore entry.
    #[must_use]
    pub fn is_exempt(&self, path: &Path) -> bool {
        let path = path.to_string_lossy();
        self.ignored.iter().any(|entry| path.ends_with(entry.as_str()))
    }

    /// Returns true if `path` has the configured suffix, or no suffix is set.
    #[must_use]
    pub fn matches_file_type(&self, path: &Path) -> bool {
        self.file_type
            .as_deref()
            .map_or(true, |suffix| path.to_string_lossy().ends_with(suffix))
    }

    /// Returns true if `path` should be analysed.
    #[must_use]
    pub fn accepts(&self, path: &Path) -> bool {
        !self.is_exempt(path) && self.matches_file_type(path)
    }
}

fn suffixed(entry: String, file_type: Option<&str>) -> String {
    match file_type {
        Some(suffix) if !entry.ends_with(suffix) => entry + suffix,
        _ => entry,
    }
}

/// Returns true if `path` is exempt under `ignored` and `file_type`.
#[must_use]
pub fn is_exempt(path: &Path, ignored: &[String], file_type: Option<&str>) -> bool {
    ExemptionFilter::new(file_type.and_then(normalize_file_type), ignored.iter().cloned())
        .is_exempt(path)
}
