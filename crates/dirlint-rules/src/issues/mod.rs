//! Issue-tracker lookups backing the issue-reference rules.
//!
//! Each tracker caches one lookup per issue for its lifetime, so a TODO
//! referenced from many files costs a single request.

mod github;
mod jira;

pub use github::{GitHubIssues, GITHUB_API_HOST};
pub use jira::JiraIssues;

use crate::http::Response;
use thiserror::Error;

/// Errors looking up an issue.
#[derive(Debug, Clone, Error)]
pub enum IssueError {
    /// The HTTP client could not be created.
    #[error("HTTP client error: {0}")]
    Client(String),

    /// No response was received.
    #[error("Request to {url} failed: {message}")]
    Request {
        /// URL without query parameters.
        url: String,
        /// What went wrong.
        message: String,
    },

    /// The tracker answered with a non-success status.
    #[error("Problem fetching issue:\n{0}")]
    Unsuccessful(Response),

    /// The response body is not the expected JSON.
    #[error("Unexpected response for issue '{issue}': {message}")]
    Body {
        /// Issue being looked up.
        issue: String,
        /// Parse error.
        message: String,
    },

    /// No issue reference was found where one was expected.
    #[error("Unable to find issue in '{text}' using regex '{pattern}'")]
    NotFound {
        /// Text searched.
        text: String,
        /// Pattern used.
        pattern: String,
    },
}
