//! # dirlint-rules
//!
//! Built-in rules for dirlint.
//!
//! Every rule is a thin layer over one of the [`dirlint_core::Analyzer`]
//! modes, so all of them share file discovery, ignore lists and the line
//! cache.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | DL001 | `todo-structure` | TODO comments must match a structure (by default, carry a date) |
//! | DL002 | `import-restriction` | Restricted imports only in their allowed packages |
//! | DL003 | `environment-properties` | Properties files must define the same keys |
//! | DL004 | `jira-reference` | TODOs must reference Jira issues in an allowed status |
//! | DL005 | `git-issue` | TODOs must reference open GitHub issues |
//! | DL006 | `else-usage` | No `else` statements |
//! | DL007 | `required-content` | Files must contain some content |
//!
//! ## Usage
//!
//! ```ignore
//! use dirlint_core::{Analyzer, Config};
//! use dirlint_rules::rules_from_config;
//!
//! let config = Config::from_file("dirlint.toml".as_ref())?;
//! let rules = rules_from_config(&config)?;
//! let report = Analyzer::default().run(&config.analyzer.root, &rules)?;
//! print!("{}", report.format_report());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod else_usage;
pub mod environment_properties;
pub mod git_issue;
pub mod http;
pub mod import_restriction;
pub mod issues;
pub mod jira_reference;
mod patterns;
mod registry;
pub mod required_content;
mod scope;
pub mod todo_structure;

pub use else_usage::ElseUsage;
pub use environment_properties::EnvironmentProperties;
pub use git_issue::GitIssue;
pub use http::{HttpClient, Method, ReqwestClient, Request, Response};
pub use import_restriction::{ImportRestriction, ImportsRestrictedToPackages};
pub use issues::{GitHubIssues, IssueError, JiraIssues};
pub use jira_reference::JiraReference;
pub use patterns::{DATED_TODO_PATTERN, TODO_PATTERN};
pub use registry::{
    find_rule, rules_from_config, rules_with_client, RegistryError, RuleInfo, RULES,
};
pub use required_content::RequiredContent;
pub use scope::Scope;
pub use todo_structure::TodoStructure;

/// Re-export core types for convenience.
pub use dirlint_core::{Rule, RuleBox, Violation};
