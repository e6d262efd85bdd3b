//! Violation records produced by the analysis engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A whole-file failure: the file's path or content failed a check, or the
/// file could not be read.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileViolation {
    /// Path of the offending file, as discovered during the walk.
    pub file: PathBuf,
    /// Human-readable message.
    pub message: String,
}

impl FileViolation {
    /// Creates a new file violation.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FileViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Violation in file '{}'\n{}\n",
            base_name(&self.file),
            self.message
        )
    }
}

/// A single offending line within a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileLineViolation {
    /// Path of the file containing the line.
    pub file: PathBuf,
    /// The raw text of the offending line.
    pub line: String,
    /// Human-readable message.
    pub message: String,
}

impl FileLineViolation {
    /// Creates a new line violation.
    #[must_use]
    pub fn new(
        file: impl Into<PathBuf>,
        line: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            line: line.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FileLineViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Violation in file '{}'\n\n{}\n\n{}\n",
            base_name(&self.file),
            self.line,
            self.message
        )
    }
}

/// Something that failed a check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The file as a whole failed.
    File(FileViolation),
    /// One line of the file failed.
    Line(FileLineViolation),
}

impl Violation {
    /// Path of the file this violation refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File(v) => &v.file,
            Self::Line(v) => &v.file,
        }
    }

    /// The violation message.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::File(v) => &v.message,
            Self::Line(v) => &v.message,
        }
    }

    /// The offending line, for line-scoped violations.
    #[must_use]
    pub fn line(&self) -> Option<&str> {
        match self {
            Self::File(_) => None,
            Self::Line(v) => Some(&v.line),
        }
    }

    /// Final path segment of the offending file.
    #[must_use]
    pub fn file_name(&self) -> String {
        base_name(self.path())
    }
}

impl From<FileViolation> for Violation {
    fn from(v: FileViolation) -> Self {
        Self::File(v)
    }
}

impl From<FileLineViolation> for Violation {
    fn from(v: FileLineViolation) -> Self {
        Self::Line(v)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(v) => v.fmt(f),
            Self::Line(v) => v.fmt(f),
        }
    }
}

/// Last path segment, independent of whether the path is absolute.
fn base_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.to_string_lossy().into_owned(),
        |n| n.to_string_lossy().into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_violation_renders_basename_and_message() {
        let v = FileViolation::new("/home/ci/checkout/src/Main.java", "Empty file!");
        assert_eq!(v.to_string(), "Violation in file 'Main.java'\nEmpty file!\n");
    }

    #[test]
    fn line_violation_renders_line_between_blank_lines() {
        let v = FileLineViolation::new(
            "src/A.java",
            "    // TODO no-date",
            "Violation was caused by the TODO not matching structure",
        );
        insta::assert_snapshot!(v.to_string(), @r"
        Violation in file 'A.java'

            // TODO no-date

        Violation was caused by the TODO not matching structure
        ");
    }

    #[test]
    fn rendering_is_stable_across_checkout_locations() {
        let a = Violation::from(FileViolation::new("/a/b/Foo.java", "msg"));
        let b = Violation::from(FileViolation::new("Foo.java", "msg"));
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn accessors_expose_fields() {
        let v = Violation::from(FileLineViolation::new("x/Y.java", "else {", "no else"));
        assert_eq!(v.path(), Path::new("x/Y.java"));
        assert_eq!(v.line(), Some("else {"));
        assert_eq!(v.message(), "no else");
        assert_eq!(v.file_name(), "Y.java");

        let v = Violation::from(FileViolation::new("x/Y.java", "bad"));
        assert_eq!(v.line(), None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let v = Violation::from(FileViolation::new("A.java", "bad"));
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["kind"], "file");
        assert_eq!(json["message"], "bad");
    }
}
