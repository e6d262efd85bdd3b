//! Memoizing line reader shared across rule invocations.

use crate::cache::LoadingCache;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// The lines of a file, shared between every caller that reads it.
pub type Lines = Arc<[String]>;

/// Errors returned when reading the lines of a file.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The path does not point at a regular file.
    #[error("Expected a file to read. Instead was provided: '{}'", path.display())]
    NotAFile {
        /// The offending path.
        path: PathBuf,
    },

    /// The file could not be read.
    #[error("{source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Storage backend that splits a file into lines.
pub trait LineSource: Send + Sync {
    /// Reads every line of `path`, without trailing line terminators.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the file cannot be read or is not valid UTF-8.
    fn read_lines(&self, path: &Path) -> std::io::Result<Vec<String>>;
}

/// Reads lines straight from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLineSource;

impl LineSource for FsLineSource {
    fn read_lines(&self, path: &Path) -> std::io::Result<Vec<String>> {
        let content = std::fs::read_to_string(path)?;
        Ok(content.lines().map(String::from).collect())
    }
}

/// Reads the lines of files and remembers them.
///
/// A path is read from storage at most once per cache instance, even when
/// several analyzers ask for it at the same time. Entries are never evicted,
/// so files are expected to stay unchanged for the cache's lifetime.
pub struct LineCache {
    source: Box<dyn LineSource>,
    entries: LoadingCache<PathBuf, Lines>,
}

impl Default for LineCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineCache")
            .field("cached_files", &self.entries.len())
            .finish_non_exhaustive()
    }
}

impl LineCache {
    /// Creates a cache reading from the filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::with_source(FsLineSource)
    }

    /// Creates a cache reading through a custom source.
    #[must_use]
    pub fn with_source(source: impl LineSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            entries: LoadingCache::new(),
        }
    }

    /// Returns every line of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ReadError::NotAFile`] if `path` is not a regular file, checked
    /// on every call, and [`ReadError::Io`] if reading fails.
    pub fn read_all_lines(&self, path: &Path) -> Result<Lines, ReadError> {
        if !path.is_file() {
            return Err(ReadError::NotAFile {
                path: path.to_path_buf(),
            });
        }

        self.entries.get_or_try_load(&path.to_path_buf(), |key| {
            debug!("Reading lines of {}", key.display());
            self.source
                .read_lines(key)
                .map(Lines::from)
                .map_err(|source| ReadError::Io {
                    path: key.clone(),
                    source,
                })
        })
    }

    /// Number of files currently held.
    #[must_use]
    pub fn cached_files(&self) -> usize {
        self.entries.len()
    }
}
