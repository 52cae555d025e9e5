//! GitHub pull request adapter
//!
//! API endpoint:
//! - Create pull request: POST https://api.github.com/repos/{owner}/{repo}/pulls

use crate::error::HostingError;
use crate::hosting::{HttpClient, NewPullRequest, PullRequestApi, RawResponse, RepoSlug};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

/// GitHub REST API base URL
const GITHUB_API_URL: &str = "https://api.github.com";

/// Media type GitHub recommends for REST calls
const GITHUB_ACCEPT: &str = "application/vnd.github+json";

/// The fields of a created pull request depbump cares about
#[derive(Debug, Deserialize)]
struct PullRequestResponse {
    /// Browser URL of the pull request
    html_url: Option<String>,
}

/// Result of a successful creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestCreated {
    /// Browser URL, when the service returned one
    pub url: Option<String>,
}

/// Whether a content type header declares JSON
fn is_json(content_type: Option<&str>) -> bool {
    content_type
        .and_then(|ct| ct.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Interpret a pull request creation response
///
/// Only `201 Created` counts as success. The body is decoded only when it is
/// declared as JSON; otherwise it is opaque diagnostic text.
pub fn interpret_response(response: &RawResponse) -> Result<PullRequestCreated, HostingError> {
    if response.status != StatusCode::CREATED {
        return Err(HostingError::Rejected {
            status: response.status.to_string(),
            body: response.body.clone(),
        });
    }

    if !is_json(response.content_type.as_deref()) {
        return Ok(PullRequestCreated { url: None });
    }

    let parsed: PullRequestResponse =
        serde_json::from_str(&response.body).map_err(|e| HostingError::UnexpectedShape {
            message: e.to_string(),
        })?;

    Ok(PullRequestCreated {
        url: parsed.html_url,
    })
}

/// GitHub implementation of `PullRequestApi`
pub struct GitHubApi {
    client: HttpClient,
    base_url: String,
}

impl GitHubApi {
    /// Create an adapter talking to api.github.com
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GITHUB_API_URL)
    }

    /// Create an adapter talking to another API root (GitHub Enterprise)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for creating a pull request
    fn build_pulls_url(&self, repo: &RepoSlug) -> String {
        format!("{}/repos/{}/{}/pulls", self.base_url, repo.owner, repo.repo)
    }
}

#[async_trait]
impl PullRequestApi for GitHubApi {
    fn host(&self) -> &'static str {
        "github.com"
    }

    async fn create_pull_request(
        &self,
        repo: &RepoSlug,
        token: &str,
        request: &NewPullRequest,
    ) -> Result<PullRequestCreated, HostingError> {
        let url = self.build_pulls_url(repo);
        tracing::debug!(%url, head = %request.head, base = %request.base, "creating pull request");
        let response = self
            .client
            .post_json(&url, token, GITHUB_ACCEPT, request)
            .await?;
        interpret_response(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: StatusCode, content_type: Option<&str>, body: &str) -> RawResponse {
        RawResponse {
            status,
            content_type: content_type.map(str::to_string),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_build_pulls_url() {
        let api = GitHubApi::new(HttpClient::new().unwrap());
        let repo = RepoSlug {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
        };
        assert_eq!(
            api.build_pulls_url(&repo),
            "https://api.github.com/repos/acme/widgets/pulls"
        );
    }

    #[test]
    fn test_with_base_url_trims_slash() {
        let api = GitHubApi::with_base_url(HttpClient::new().unwrap(), "https://ghe.example/api/v3/");
        let repo = RepoSlug {
            owner: "acme".to_string(),
            repo: "widgets".to_string(),
        };
        assert_eq!(
            api.build_pulls_url(&repo),
            "https://ghe.example/api/v3/repos/acme/widgets/pulls"
        );
    }

    #[test]
    fn test_is_json() {
        assert!(is_json(Some("application/json; charset=utf-8")));
        assert!(is_json(Some("application/vnd.github+json")));
        assert!(!is_json(Some("text/html")));
        assert!(!is_json(None));
    }

    #[test]
    fn test_created_with_url() {
        let created = interpret_response(&response(
            StatusCode::CREATED,
            Some("application/json; charset=utf-8"),
            r#"{"number": 7, "html_url": "https://github.com/acme/widgets/pull/7"}"#,
        ))
        .unwrap();
        assert_eq!(
            created.url.as_deref(),
            Some("https://github.com/acme/widgets/pull/7")
        );
    }

    #[test]
    fn test_created_without_url() {
        let created = interpret_response(&response(
            StatusCode::CREATED,
            Some("application/json"),
            r#"{"number": 7}"#,
        ))
        .unwrap();
        assert_eq!(created.url, None);
    }

    #[test]
    fn test_created_non_json_body_is_opaque() {
        let created =
            interpret_response(&response(StatusCode::CREATED, Some("text/plain"), "ok")).unwrap();
        assert_eq!(created.url, None);
    }

    #[test]
    fn test_created_with_malformed_json() {
        let err = interpret_response(&response(
            StatusCode::CREATED,
            Some("application/json"),
            "<html>",
        ))
        .unwrap_err();
        assert!(matches!(err, HostingError::UnexpectedShape { .. }));
        assert!(err.to_string().contains("pull request status unknown"));
    }

    #[test]
    fn test_created_with_wrong_shape() {
        let err = interpret_response(&response(
            StatusCode::CREATED,
            Some("application/json"),
            r#"{"html_url": 42}"#,
        ))
        .unwrap_err();
        assert!(matches!(err, HostingError::UnexpectedShape { .. }));
    }

    #[test]
    fn test_ok_is_not_created() {
        let err = interpret_response(&response(StatusCode::OK, Some("application/json"), "{}"))
            .unwrap_err();
        assert!(matches!(err, HostingError::Rejected { .. }));
    }

    #[test]
    fn test_rejected_includes_body() {
        let body = r#"{"message":"Validation Failed","errors":[{"message":"A pull request already exists"}]}"#;
        let err = interpret_response(&response(
            StatusCode::UNPROCESSABLE_ENTITY,
            Some("application/json; charset=utf-8"),
            body,
        ))
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("422"));
        assert!(msg.contains("A pull request already exists"));
    }
}
