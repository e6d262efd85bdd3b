//! Recursive discovery of candidate files under a root directory.

use crate::exemption::ExemptionFilter;

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// An item produced by the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// A regular, visible, non-exempt file of the configured type.
    File(PathBuf),
    /// An entry below the root that could not be visited.
    Unreadable {
        /// The entry that failed.
        path: PathBuf,
        /// Description of the failure.
        message: String,
    },
}

type KeepEntry = fn(&DirEntry) -> bool;

/// Lazy, single-pass walk over the candidate files under a root.
///
/// Entries are visited depth-first in file-name order. Hidden directories
/// below the root are pruned together with everything beneath them. A
/// hidden root is still scanned, and inside it only hidden files are
/// skipped: hidden directories under a hidden root are descended into.
pub struct Walker<'a> {
    entries: walkdir::FilterEntry<walkdir::IntoIter, KeepEntry>,
    filter: &'a ExemptionFilter,
    root: PathBuf,
}

impl<'a> Walker<'a> {
    /// Starts a walk under `root`, yielding only files accepted by `filter`.
    #[must_use]
    pub fn new(root: &Path, filter: &'a ExemptionFilter) -> Self {
        let keep: KeepEntry = if path_is_hidden(root) {
            debug!("Root is hidden, scanning hidden directories: {}", root.display());
            not_a_hidden_file
        } else {
            visible_below_root
        };
        let entries = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(keep);

        Self {
            entries,
            filter,
            root: root.to_path_buf(),
        }
    }
}

impl Iterator for Walker<'_> {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            match self.entries.next()? {
                Ok(entry) => {
                    if !is_regular_file(&entry) {
                        continue;
                    }
                    let path = entry.into_path();
                    if self.filter.is_exempt(&path) {
                        debug!("Exempt: {}", path.display());
                        continue;
                    }
                    if !self.filter.matches_file_type(&path) {
                        continue;
                    }
                    return Some(Candidate::File(path));
                }
                Err(err) => {
                    let path = err
                        .path()
                        .map_or_else(|| self.root.clone(), Path::to_path_buf);
                    return Some(Candidate::Unreadable {
                        path,
                        message: err.to_string(),
                    });
                }
            }
        }
    }
}

fn visible_below_root(entry: &DirEntry) -> bool {
    if entry.depth() == 0 {
        return true;
    }
    if is_hidden(entry) {
        debug!("Skipping hidden entry: {}", entry.path().display());
        return false;
    }
    true
}

fn not_a_hidden_file(entry: &DirEntry) -> bool {
    if entry.depth() == 0 || entry.file_type().is_dir() {
        return true;
    }
    if is_hidden(entry) {
        debug!("Skipping hidden file: {}", entry.path().display());
        return false;
    }
    true
}

fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    // A symlink counts when its target is a regular file.
    entry.path_is_symlink() && entry.path().is_file()
}

/// Returns true if the entry is hidden by platform convention.
///
/// Undeterminable status counts as visible, so a metadata failure surfaces
/// later as a read violation instead of silently dropping the file.
#[cfg(not(windows))]
fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

#[cfg(windows)]
fn is_hidden(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;

    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn path_is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

#[cfg(windows)]
fn path_is_hidden(path: &Path) -> bool {
    use std::os::windows::fs::MetadataExt;

    std::fs::metadata(path)
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(windows)]
const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
