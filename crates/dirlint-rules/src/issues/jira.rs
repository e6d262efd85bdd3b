//! Jira issue status lookups.

use super::IssueError;
use crate::http::{HttpClient, Request};

use dirlint_core::LoadingCache;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

#[derive(Deserialize)]
struct Issue {
    fields: Fields,
}

#[derive(Deserialize)]
struct Fields {
    status: Status,
}

#[derive(Deserialize)]
struct Status {
    name: String,
}

/// Looks up Jira issue statuses over the REST API.
pub struct JiraIssues {
    client: Arc<dyn HttpClient>,
    host: String,
    username: String,
    password: String,
    allowed_statuses: Vec<String>,
    statuses: LoadingCache<String, String>,
}

impl JiraIssues {
    /// Creates a lookup against `host` (e.g. `https://jira.example.com`).
    #[must_use]
    pub fn new(
        client: Arc<dyn HttpClient>,
        host: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        allowed_statuses: Vec<String>,
    ) -> Self {
        Self {
            client,
            host: host.into().trim_end_matches('/').to_string(),
            username: username.into(),
            password: password.into(),
            allowed_statuses,
            statuses: LoadingCache::new(),
        }
    }

    /// The statuses a referenced issue may be in.
    #[must_use]
    pub fn allowed_statuses(&self) -> &[String] {
        &self.allowed_statuses
    }

    /// Returns true if `issue` is in one of the allowed statuses, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the status cannot be fetched.
    pub fn is_in_allowed_status(&self, issue: &str) -> Result<bool, IssueError> {
        let status = self.status(issue)?;
        Ok(self
            .allowed_statuses
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(&status)))
    }

    /// Status name of `issue`, fetched once and then cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the answer is not `2xx`, or the
    /// body has no `fields.status.name`.
    pub fn status(&self, issue: &str) -> Result<String, IssueError> {
        self.statuses
            .get_or_try_load(&issue.to_string(), |issue| self.fetch_status(issue))
    }

    fn fetch_status(&self, issue: &str) -> Result<String, IssueError> {
        debug!("Fetching Jira issue {}", issue);
        let request = Request::get(format!("{}/rest/api/2/issue/{issue}", self.host))
            .query("os_username", &self.username)
            .query("os_password", &self.password);

        let response = self.client.execute(&request)?;
        if !response.is_successful() {
            return Err(IssueError::Unsuccessful(response));
        }

        let parsed: Issue = serde_json::from_str(&response.body).map_err(|e| IssueError::Body {
            issue: issue.to_string(),
            message: e.to_string(),
        })?;
        Ok(parsed.fields.status.name)
    }
}

impl fmt::Debug for JiraIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraIssues")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("allowed_statuses", &self.allowed_statuses)
            .finish_non_exhaustive()
    }
}
