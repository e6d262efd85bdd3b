//! Minimal HTTP abstraction used by the issue-tracker rules.

use crate::issues::IssueError;

use std::fmt;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// HTTP method of a [`Request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// An outgoing HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    body: Option<String>,
    query: Vec<(String, String)>,
}

impl Request {
    /// Starts a `GET` request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// Starts a `POST` request with a body.
    #[must_use]
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            method: Method::Post,
            url: url.into(),
            body: Some(body.into()),
            query: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// The request method.
    #[must_use]
    pub fn method(&self) -> Method {
        self.method
    }

    /// The URL without query parameters.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The request body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Query parameters in insertion order.
    #[must_use]
    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    /// Value of the first query parameter named `key`.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A received HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Protocol version, e.g. `HTTP/1.1`.
    pub protocol: String,
    /// Status code.
    pub status: u16,
    /// Body as text.
    pub body: String,
}

impl Response {
    /// Creates a response.
    #[must_use]
    pub fn new(protocol: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self {
            protocol: protocol.into(),
            status,
            body: body.into(),
        }
    }

    /// Returns true for a `2xx` status.
    #[must_use]
    pub fn is_successful(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}\n{}", self.protocol, self.status, self.body)
    }
}

/// Executes HTTP requests.
pub trait HttpClient: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::Request`] if no response was received.
    fn execute(&self, request: &Request) -> Result<Response, IssueError>;
}

/// Production HTTP client using blocking reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with the default 10 second timeout.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::Client`] if the TLS backend cannot be initialized.
    pub fn new() -> Result<Self, IssueError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Creates a client with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`IssueError::Client`] if the TLS backend cannot be initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, IssueError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("dirlint/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IssueError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn execute(&self, request: &Request) -> Result<Response, IssueError> {
        let builder = match request.method() {
            Method::Get => self.client.get(request.url()),
            Method::Post => self
                .client
                .post(request.url())
                .body(request.body().unwrap_or_default().to_string()),
        };

        let failed = |e: reqwest::Error| {
            let message = if e.is_timeout() {
                "request timed out".to_string()
            } else if e.is_connect() {
                "failed to connect".to_string()
            } else {
                e.without_url().to_string()
            };
            IssueError::Request {
                url: request.url().to_string(),
                message,
            }
        };

        let response = builder.query(request.query_params()).send().map_err(failed)?;
        let protocol = format!("{:?}", response.version());
        let status = response.status().as_u16();
        let body = response.text().map_err(failed)?;

        Ok(Response::new(protocol, status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = Request::get("https://jira.example.com/rest/api/2/issue/ABC-1")
            .query("os_username", "user")
            .query("os_password", "secret");

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url(), "https://jira.example.com/rest/api/2/issue/ABC-1");
        assert_eq!(request.body(), None);
        assert_eq!(request.query_param("os_username"), Some("user"));
        assert_eq!(request.query_param("os_password"), Some("secret"));
        assert_eq!(request.query_param("missing"), None);
    }

    #[test]
    fn test_post_carries_body() {
        let request = Request::post("http://localhost/issues", "{}");
        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.body(), Some("{}"));
    }

    #[test]
    fn test_success_is_2xx() {
        assert!(Response::new("HTTP/1.1", 200, "").is_successful());
        assert!(Response::new("HTTP/1.1", 204, "").is_successful());
        assert!(!Response::new("HTTP/1.1", 199, "").is_successful());
        assert!(!Response::new("HTTP/1.1", 301, "").is_successful());
        assert!(!Response::new("HTTP/1.1", 404, "").is_successful());
    }

    #[test]
    fn test_response_display() {
        let response = Response::new("HTTP/1.1", 404, "{\"errorMessages\":[]}");
        insta::assert_snapshot!(response.to_string(), @r###"
        HTTP/1.1 404
        {"errorMessages":[]}
        "###);
    }
}
