//! Regular expressions shared by the TODO rules.

use dirlint_core::ConfigError;
use regex::Regex;

/// Matches any line holding a `//` TODO comment, in any letter case.
pub const TODO_PATTERN: &str = ".*//.*(T|t)(O|o)(D|d)(O|o).*";

/// Matches a TODO comment carrying a date such as `2017/05/20` or `20-May-2017`.
pub const DATED_TODO_PATTERN: &str =
    ".*//.*(T|t)(O|o)(D|d)(O|o).*[0-9]{1,4}[/-]{1}[A-z0-9]{2,3}[/-]{1}[0-9]{1,4}.*";

/// Builds the pattern of a TODO comment mentioning `reference`.
#[must_use]
pub fn todo_referencing(reference: &str) -> String {
    format!(".*//.*(T|t)(O|o)(D|d)(O|o).*{reference}.*")
}

/// The text after the first `//` of a line, or the whole line without one.
#[must_use]
pub fn comment_text(line: &str) -> &str {
    line.find("//").map_or(line, |start| &line[start + 2..])
}

/// Compiles `pattern` so that it must match a whole line.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOption`] naming `rule` and `key` if the
/// pattern does not compile.
pub fn whole_line(rule: &str, key: &str, pattern: &str) -> Result<Regex, ConfigError> {
    compile(rule, key, &format!("^(?:{pattern})$"))
}

/// Compiles `pattern` as-is, for searching within a line.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidOption`] if the pattern does not compile.
pub fn compile(rule: &str, key: &str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidOption {
        rule: rule.to_string(),
        key: key.to_string(),
        message: e.to_string(),
    })
}
