//! Configuration types for dirlint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Top-level configuration for dirlint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration shared by every rule.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations, keyed by rule name.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled.
    ///
    /// A rule with a section is enabled unless it sets `enabled = false`;
    /// a rule without one falls back to `default`.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str, default: bool) -> bool {
        self.rules
            .get(rule_name)
            .map_or(default, |c| c.enabled.unwrap_or(true))
    }

    /// Gets the configuration section of a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }

    /// Ignore entries for a rule: the analyzer-wide list followed by the
    /// rule's own list.
    #[must_use]
    pub fn ignore_for(&self, rule_name: &str) -> Vec<String> {
        let mut ignore = self.analyzer.ignore.clone();
        if let Some(rule) = self.rules.get(rule_name) {
            ignore.extend(rule.ignore.iter().cloned());
        }
        ignore
    }

    /// File-type suffix for a rule, falling back to `default`.
    #[must_use]
    pub fn file_type_for(&self, rule_name: &str, default: &str) -> String {
        self.rules
            .get(rule_name)
            .and_then(|c| c.file_type.clone())
            .unwrap_or_else(|| default.to_string())
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Files exempt from every rule, matched as path suffixes.
    #[serde(default)]
    pub ignore: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            ignore: Vec::new(),
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// File-type suffix override (e.g. `".java"`, `"kt"`, `""` for all files).
    #[serde(default)]
    pub file_type: Option<String>,

    /// Files exempt from this rule.
    #[serde(default)]
    pub ignore: Vec<String>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets an integer option with a default value.
    #[must_use]
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        self.options
            .get(key)
            .and_then(toml::Value::as_integer)
            .unwrap_or(default)
    }

    /// Gets a string option with a default value.
    #[must_use]
    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
    }

    /// Gets a string option that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingOption`] if the key is absent or not a string.
    pub fn require_str(&self, rule: &str, key: &str) -> Result<&str, ConfigError> {
        self.options
            .get(key)
            .and_then(|v| v.as_str())
            .ok_or_else(|| ConfigError::MissingOption {
                rule: rule.to_string(),
                key: key.to_string(),
            })
    }

    /// Gets a string array option.
    #[must_use]
    pub fn get_str_array(&self, key: &str) -> Vec<String> {
        self.options
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule option that must be set is missing.
    #[error("Rule '{rule}' requires option '{key}'")]
    MissingOption {
        /// Rule name.
        rule: String,
        /// Option key.
        key: String,
    },

    /// A rule option has an unusable value.
    #[error("Invalid option '{key}' for rule '{rule}': {message}")]
    InvalidOption {
        /// Rule name.
        rule: String,
        /// Option key.
        key: String,
        /// What is wrong with the value.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.analyzer.root, PathBuf::from("."));
        assert!(config.rules.is_empty());
        assert!(config.is_rule_enabled("todo-structure", true));
        assert!(!config.is_rule_enabled("else-usage", false));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./src"
ignore = ["Generated"]

[rules.todo-structure]
enabled = true
file_type = "kt"
ignore = ["Legacy"]
pattern = ".*TODO.*"

[rules.else-usage]
enabled = false
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./src"));
        assert!(config.is_rule_enabled("todo-structure", false));
        assert!(!config.is_rule_enabled("else-usage", true));

        let rule_config = config.rule("todo-structure").unwrap();
        assert_eq!(rule_config.get_str("pattern", ""), ".*TODO.*");
        assert_eq!(config.file_type_for("todo-structure", ".java"), "kt");
        assert_eq!(config.file_type_for("else-usage", ".java"), ".java");
        assert_eq!(config.ignore_for("todo-structure"), ["Generated", "Legacy"]);
        assert_eq!(config.ignore_for("else-usage"), ["Generated"]);
    }

    #[test]
    fn test_empty_section_enables_an_opt_in_rule() {
        let config = Config::parse("[rules.else-usage]\n").unwrap();
        assert!(config.is_rule_enabled("else-usage", false));
        assert!(!config.is_rule_enabled("git-issue", false));
    }

    #[test]
    fn test_require_str() {
        let config = Config::parse("[rules.git-issue]\nuser = \"octo\"\n").unwrap();
        let rule = config.rule("git-issue").unwrap();

        assert_eq!(rule.require_str("git-issue", "user").unwrap(), "octo");
        let err = rule.require_str("git-issue", "repository").unwrap_err();
        assert!(err.to_string().contains("requires option 'repository'"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = Config::parse("[analyzer\nroot = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
