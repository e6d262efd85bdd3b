//! GitHub issue state lookups.

use super::IssueError;
use crate::http::{HttpClient, Request};

use dirlint_core::LoadingCache;
use serde::Deserialize;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Public GitHub API host.
pub const GITHUB_API_HOST: &str = "https://api.github.com";

const OPEN: &str = "open";

#[derive(Deserialize)]
struct Issue {
    state: String,
}

/// Looks up GitHub issue states for one repository.
pub struct GitHubIssues {
    client: Arc<dyn HttpClient>,
    api_host: String,
    user: String,
    repository: String,
    states: LoadingCache<String, String>,
}

impl GitHubIssues {
    /// Creates a lookup for `user/repository` on the public API.
    #[must_use]
    pub fn new(
        client: Arc<dyn HttpClient>,
        user: impl Into<String>,
        repository: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_host: GITHUB_API_HOST.to_string(),
            user: user.into(),
            repository: repository.into(),
            states: LoadingCache::new(),
        }
    }

    /// Uses another API host, such as a GitHub Enterprise instance.
    #[must_use]
    pub fn with_api_host(mut self, api_host: impl Into<String>) -> Self {
        self.api_host = api_host.into().trim_end_matches('/').to_string();
        self
    }

    /// Returns true if the issue referenced by `reference` (e.g. `#42`) is open.
    ///
    /// The issue number is the first run of digits in `reference`.
    ///
    /// # Errors
    ///
    /// Returns an error if `reference` has no number or the state cannot be
    /// fetched.
    pub fn is_open(&self, reference: &str) -> Result<bool, IssueError> {
        let number = issue_number(reference).ok_or_else(|| IssueError::NotFound {
            text: reference.to_string(),
            pattern: "[0-9]+".to_string(),
        })?;
        Ok(self.state(number)? == OPEN)
    }

    /// State of issue `number`, fetched once and then cached.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the answer is not `2xx`, or the
    /// body has no `state`.
    pub fn state(&self, number: &str) -> Result<String, IssueError> {
        self.states
            .get_or_try_load(&number.to_string(), |number| self.fetch_state(number))
    }

    fn fetch_state(&self, number: &str) -> Result<String, IssueError> {
        debug!(
            "Fetching GitHub issue {}/{}#{}",
            self.user, self.repository, number
        );
        let request = Request::get(format!(
            "{}/repos/{}/{}/issues/{number}",
            self.api_host, self.user, self.repository
        ));

        let response = self.client.execute(&request)?;
        if !response.is_successful() {
            return Err(IssueError::Unsuccessful(response));
        }

        let parsed: Issue = serde_json::from_str(&response.body).map_err(|e| IssueError::Body {
            issue: number.to_string(),
            message: e.to_string(),
        })?;
        Ok(parsed.state)
    }
}

impl fmt::Debug for GitHubIssues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitHubIssues")
            .field("api_host", &self.api_host)
            .field("user", &self.user)
            .field("repository", &self.repository)
            .finish_non_exhaustive()
    }
}

fn issue_number(reference: &str) -> Option<&str> {
    let start = reference.find(|c: char| c.is_ascii_digit())?;
    let rest = &reference[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Response;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockClient {
        state: &'static str,
        calls: AtomicUsize,
        last_url: Mutex<String>,
    }

    impl MockClient {
        fn new(state: &'static str) -> Arc<Self> {
            Arc::new(Self {
                state,
                calls: AtomicUsize::new(0),
                last_url: Mutex::new(String::new()),
            })
        }
    }

    impl HttpClient for MockClient {
        fn execute(&self, request: &Request) -> Result<Response, IssueError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_url.lock().unwrap() = request.url().to_string();
            Ok(Response::new(
                "HTTP/1.1",
                200,
                format!(r#"{{"number":1,"state":"{}"}}"#, self.state),
            ))
        }
    }

    #[test]
    fn test_issue_number_extraction() {
        assert_eq!(issue_number("#42"), Some("42"));
        assert_eq!(issue_number("issue 7 and 8"), Some("7"));
        assert_eq!(issue_number("#abc"), None);
    }

    #[test]
    fn test_open_and_closed_states() {
        let issues = GitHubIssues::new(MockClient::new("open"), "octo", "repo");
        assert!(issues.is_open("#1").unwrap());

        let issues = GitHubIssues::new(MockClient::new("closed"), "octo", "repo");
        assert!(!issues.is_open("#1").unwrap());
    }

    #[test]
    fn test_url_uses_api_host_and_repository() {
        let client = MockClient::new("open");
        let issues = GitHubIssues::new(Arc::clone(&client) as Arc<dyn HttpClient>, "octo", "repo")
            .with_api_host("http://localhost:8080/");
        issues.is_open("#12").unwrap();

        assert_eq!(
            *client.last_url.lock().unwrap(),
            "http://localhost:8080/repos/octo/repo/issues/12"
        );
    }

    #[test]
    fn test_state_is_cached_per_number() {
        let client = MockClient::new("open");
        let issues = GitHubIssues::new(Arc::clone(&client) as Arc<dyn HttpClient>, "octo", "repo");

        issues.is_open("#3").unwrap();
        issues.is_open("see #3").unwrap();
        issues.is_open("#4").unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reference_without_number_is_an_error() {
        let issues = GitHubIssues::new(MockClient::new("open"), "octo", "repo");
        assert!(matches!(
            issues.is_open("#none"),
            Err(IssueError::NotFound { .. })
        ));
    }
}
