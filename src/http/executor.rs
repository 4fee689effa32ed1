//! Request execution against the server under test

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::error::Error as _;

use crate::common::config::Timeouts;
use crate::common::{Error, Result};

use super::outcome::{Body, Outcome};
use super::request::RequestSpec;

/// Sends requests and normalizes whatever happens into an [`Outcome`]
///
/// Implementations never fail: network errors become
/// [`Outcome::Transport`].
#[async_trait]
pub trait Executor: Send + Sync {
    async fn execute(&self, spec: &RequestSpec) -> Outcome;
}

/// Executor backed by a pooled `reqwest` client
pub struct HttpExecutor {
    client: reqwest::Client,
    base_url: String,
}

impl HttpExecutor {
    /// Create an executor for `base_url` with the given timeouts
    pub fn new(base_url: &str, timeouts: &Timeouts) -> Result<Self> {
        timeouts.validate()?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("smoke-cli/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(timeouts.connect())
            .timeout(timeouts.request())
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a relative path onto the base URL
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Executor for HttpExecutor {
    async fn execute(&self, spec: &RequestSpec) -> Outcome {
        let url = self.url_for(&spec.path);

        let mut request = self
            .client
            .request(spec.method.to_reqwest(), &url)
            .header(CONTENT_TYPE, "application/json");

        if let Some(token) = &spec.token {
            request = request.bearer_auth(token.as_str());
        }

        if spec.method.sends_body() {
            if let Some(body) = &spec.body {
                request = request.json(body);
            }
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(method = %spec.method, %url, error = %e, "request failed");
                return Outcome::transport(describe(&e));
            }
        };

        let status = response.status().as_u16();
        tracing::debug!(method = %spec.method, %url, status, "response received");

        match response.text().await {
            Ok(text) => Outcome::response(status, Body::parse(text)),
            Err(e) => Outcome::transport(describe(&e)),
        }
    }
}

/// Flatten a reqwest error and its causes into one line
fn describe(e: &reqwest::Error) -> String {
    let kind = if e.is_timeout() {
        "timed out"
    } else if e.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    let mut message = format!("{}: {}", kind, e);
    let mut source = e.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn executor(base: &str) -> HttpExecutor {
        HttpExecutor::new(base, &Timeouts::default()).unwrap()
    }

    #[test]
    fn test_url_join() {
        let exec = executor("http://localhost:8001/api/");
        assert_eq!(exec.base_url(), "http://localhost:8001/api");
        assert_eq!(exec.url_for("companies"), "http://localhost:8001/api/companies");
        assert_eq!(exec.url_for("/auth/login"), "http://localhost:8001/api/auth/login");
        assert_eq!(exec.url_for(""), "http://localhost:8001/api/");
    }

    #[test]
    fn test_zero_request_timeout_is_rejected() {
        let timeouts = Timeouts {
            connect_secs: 5,
            request_secs: 0,
        };
        assert!(matches!(
            HttpExecutor::new("http://localhost:8001/api", &timeouts),
            Err(Error::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_outcome() {
        // Bind then drop to get a port nothing is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let exec = executor(&format!("http://127.0.0.1:{}/api", port));
        let outcome = exec.execute(&RequestSpec::get("companies")).await;

        assert!(outcome.is_transport(), "got {}", outcome);
        assert_eq!(outcome.status(), None);
    }
}
