//! Building the rule set from configuration.

use crate::else_usage::{self, ElseUsage};
use crate::environment_properties::{self, EnvironmentProperties};
use crate::git_issue::{self, GitIssue};
use crate::http::{HttpClient, ReqwestClient};
use crate::import_restriction::{self, ImportRestriction, ImportsRestrictedToPackages};
use crate::issues::{GitHubIssues, IssueError, JiraIssues, GITHUB_API_HOST};
use crate::jira_reference::{self, JiraReference};
use crate::required_content::{self, RequiredContent};
use crate::scope::Scope;
use crate::todo_structure::{self, TodoStructure};

use dirlint_core::{Config, ConfigError, RuleBox, RuleConfig};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Static description of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Rule code.
    pub code: &'static str,
    /// Rule name, also its configuration section.
    pub name: &'static str,
    /// What the rule checks.
    pub description: &'static str,
    /// Whether the rule runs without a configuration section.
    pub enabled_by_default: bool,
}

/// Every built-in rule, in code order.
pub const RULES: &[RuleInfo] = &[
    RuleInfo {
        code: todo_structure::CODE,
        name: todo_structure::NAME,
        description: todo_structure::DESCRIPTION,
        enabled_by_default: true,
    },
    RuleInfo {
        code: import_restriction::CODE,
        name: import_restriction::NAME,
        description: import_restriction::DESCRIPTION,
        enabled_by_default: false,
    },
    RuleInfo {
        code: environment_properties::CODE,
        name: environment_properties::NAME,
        description: environment_properties::DESCRIPTION,
        enabled_by_default: true,
    },
    RuleInfo {
        code: jira_reference::CODE,
        name: jira_reference::NAME,
        description: jira_reference::DESCRIPTION,
        enabled_by_default: false,
    },
    RuleInfo {
        code: git_issue::CODE,
        name: git_issue::NAME,
        description: git_issue::DESCRIPTION,
        enabled_by_default: false,
    },
    RuleInfo {
        code: else_usage::CODE,
        name: else_usage::NAME,
        description: else_usage::DESCRIPTION,
        enabled_by_default: false,
    },
    RuleInfo {
        code: required_content::CODE,
        name: required_content::NAME,
        description: required_content::DESCRIPTION,
        enabled_by_default: false,
    },
];

/// Errors building rules from configuration.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// A rule section is incomplete or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The HTTP client for an issue-tracker rule could not be created.
    #[error(transparent)]
    Http(#[from] IssueError),
}

/// Looks up a built-in rule by name or code.
#[must_use]
pub fn find_rule(name_or_code: &str) -> Option<&'static RuleInfo> {
    RULES
        .iter()
        .find(|r| r.name == name_or_code || r.code.eq_ignore_ascii_case(name_or_code))
}

/// Builds the enabled rules of `config`, using reqwest for issue lookups.
///
/// # Errors
///
/// Returns an error if an enabled rule's section is incomplete or invalid.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, RegistryError> {
    build(config, None)
}

/// Like [`rules_from_config`], with every issue-tracker rule using `client`.
///
/// # Errors
///
/// Returns an error if an enabled rule's section is incomplete or invalid.
pub fn rules_with_client(
    config: &Config,
    client: Arc<dyn HttpClient>,
) -> Result<Vec<RuleBox>, RegistryError> {
    build(config, Some(client))
}

fn build(config: &Config, client: Option<Arc<dyn HttpClient>>) -> Result<Vec<RuleBox>, RegistryError> {
    let empty = RuleConfig::default();
    let mut rules: Vec<RuleBox> = Vec::new();

    for info in RULES {
        if !config.is_rule_enabled(info.name, info.enabled_by_default) {
            debug!("Rule {} is disabled", info.name);
            continue;
        }
        let section = config.rule(info.name).unwrap_or(&empty);
        let scope = |default_file_type: &str| Scope::from_config(config, info.name, default_file_type);

        let rule: RuleBox = match info.name {
            todo_structure::NAME => {
                let rule = match section.options.get("structure").and_then(|v| v.as_str()) {
                    Some(structure) => TodoStructure::new(structure)?,
                    None => TodoStructure::dated()?,
                };
                Box::new(rule.with_scope(scope(".java")))
            }
            import_restriction::NAME => {
                let restrictions = restrictions(section)?;
                Box::new(ImportsRestrictedToPackages::new(&restrictions)?.with_scope(scope(".java")))
            }
            environment_properties::NAME => {
                Box::new(EnvironmentProperties::new().with_scope(scope(".properties")))
            }
            jira_reference::NAME => {
                let allowed = section.get_str_array("allowed_statuses");
                if allowed.is_empty() {
                    return Err(missing(info.name, "allowed_statuses").into());
                }
                let issues = JiraIssues::new(
                    http_client(client.as_ref(), info.name, section)?,
                    section.require_str(info.name, "host")?,
                    section.require_str(info.name, "username")?,
                    password(info.name, section)?,
                    allowed,
                );
                let pattern = section.get_str("issue_pattern", jira_reference::DEFAULT_ISSUE_PATTERN);
                Box::new(JiraReference::new(issues, pattern)?.with_scope(scope(".java")))
            }
            git_issue::NAME => {
                let issues = GitHubIssues::new(
                    http_client(client.as_ref(), info.name, section)?,
                    section.require_str(info.name, "user")?,
                    section.require_str(info.name, "repository")?,
                )
                .with_api_host(section.get_str("api_host", GITHUB_API_HOST));
                let pattern = section.get_str("issue_pattern", git_issue::DEFAULT_ISSUE_PATTERN);
                Box::new(GitIssue::new(issues, pattern)?.with_scope(scope(".java")))
            }
            else_usage::NAME => Box::new(ElseUsage::new().with_scope(scope(".java"))),
            required_content::NAME => {
                let content = section.require_str(info.name, "content")?;
                Box::new(RequiredContent::new(content).with_scope(scope("")))
            }
            _ => continue,
        };
        rules.push(rule);
    }

    debug!("Built {} rule(s)", rules.len());
    Ok(rules)
}

fn missing(rule: &str, key: &str) -> ConfigError {
    ConfigError::MissingOption {
        rule: rule.to_string(),
        key: key.to_string(),
    }
}

fn invalid(rule: &str, key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidOption {
        rule: rule.to_string(),
        key: key.to_string(),
        message: message.into(),
    }
}

fn restrictions(section: &RuleConfig) -> Result<Vec<ImportRestriction>, ConfigError> {
    let name = import_restriction::NAME;
    let value = section
        .options
        .get("restrictions")
        .ok_or_else(|| missing(name, "restrictions"))?;
    value
        .clone()
        .try_into()
        .map_err(|e: toml::de::Error| invalid(name, "restrictions", e.to_string()))
}

fn password(rule: &str, section: &RuleConfig) -> Result<String, ConfigError> {
    if let Some(var) = section.options.get("password_env").and_then(|v| v.as_str()) {
        return std::env::var(var)
            .map_err(|_| invalid(rule, "password_env", format!("environment variable '{var}' is not set")));
    }
    section.require_str(rule, "password").map(String::from)
}

fn http_client(
    client: Option<&Arc<dyn HttpClient>>,
    rule: &str,
    section: &RuleConfig,
) -> Result<Arc<dyn HttpClient>, RegistryError> {
    if let Some(client) = client {
        return Ok(Arc::clone(client));
    }
    let secs = section.get_int("timeout_secs", 10);
    let secs = u64::try_from(secs)
        .ok()
        .filter(|s| *s > 0)
        .ok_or_else(|| invalid(rule, "timeout_secs", "must be a positive number of seconds"))?;
    Ok(Arc::new(ReqwestClient::with_timeout(Duration::from_secs(secs))?))
}
