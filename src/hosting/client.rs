//! HTTP client shared foundation
//!
//! This module provides a shared HTTP client with:
//! - A User-Agent header (the GitHub API rejects requests without one)
//! - A single POST of a JSON payload, returning status, content type and body
//!
//! There is no retry logic and no request timeout: a failed call is terminal.

use crate::error::HostingError;
use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::Serialize;

/// Default User-Agent header
const DEFAULT_USER_AGENT: &str = concat!("depbump/", env!("CARGO_PKG_VERSION"));

/// Raw answer to a request, before any interpretation
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status
    pub status: StatusCode,
    /// Declared content type, if any
    pub content_type: Option<String>,
    /// Body as text
    pub body: String,
}

/// HTTP client wrapper
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self, HostingError> {
        Self::with_user_agent(DEFAULT_USER_AGENT)
    }

    /// Create a new HTTP client with a custom User-Agent
    pub fn with_user_agent(user_agent: &str) -> Result<Self, HostingError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .build()
            .map_err(|e| HostingError::Client {
                message: e.to_string(),
            })?;

        Ok(Self { client })
    }

    /// POST `payload` as JSON with a bearer token
    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        token: &str,
        accept: &'static str,
        payload: &T,
    ) -> Result<RawResponse, HostingError> {
        let response = self
            .client
            .post(url)
            .header(AUTHORIZATION, format!("bearer {}", token))
            .header(ACCEPT, HeaderValue::from_static(accept))
            .json(payload)
            .send()
            .await
            .map_err(|e| HostingError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| HostingError::ReadBody {
            message: e.to_string(),
        })?;

        tracing::debug!(%status, content_type = ?content_type, "pull request response");

        Ok(RawResponse {
            status,
            content_type,
            body,
        })
    }
}
