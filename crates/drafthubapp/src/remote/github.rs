use super::{ContentApi, FileSource, PutFileRequest, RemoteFailure};
use crate::error::{DrafthubError, Result};
use crate::model::PublishCredentials;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const JSON_MEDIA_TYPE: &str = "application/vnd.github+json";
const RAW_MEDIA_TYPE: &str = "application/vnd.github.raw";
const API_VERSION: &str = "2022-11-28";

/// GitHub Contents API client.
pub struct GithubClient {
    api_url: Url,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PutFileBody<'a> {
    message: &'a str,
    content: String,
    branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<String>,
}

#[derive(Deserialize)]
struct ExistingFile {
    sha: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl GithubClient {
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let api_url = Url::parse(api_url)
            .map_err(|e| DrafthubError::Config(format!("invalid api_url {}: {}", api_url, e)))?;
        if api_url.cannot_be_a_base() {
            return Err(DrafthubError::Config(format!(
                "invalid api_url {}: not a base URL",
                api_url
            )));
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("drafthub/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DrafthubError::Config(format!("cannot build http client: {}", e)))?;
        Ok(Self { api_url, client })
    }

    /// `{api}/repos/{owner}/{repo}/contents/{path}` with every segment percent-encoded.
    fn contents_url(&self, owner: &str, repo: &str, path: &str) -> Url {
        let mut url = self.api_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["repos", owner, repo, "contents"])
                .extend(path.split('/').filter(|s| !s.is_empty()));
        }
        url
    }

    fn headers(
        media_type: &'static str,
        token: Option<&str>,
    ) -> std::result::Result<HeaderMap, RemoteFailure> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(media_type));
        headers.insert("x-github-api-version", HeaderValue::from_static(API_VERSION));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|e| RemoteFailure::transport(format!("invalid token: {}", e)))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Blob sha of the file currently at `url`, or None if there is no such file.
    async fn existing_sha(
        &self,
        url: &Url,
        branch: &str,
        headers: &HeaderMap,
    ) -> std::result::Result<Option<String>, RemoteFailure> {
        let response = self
            .client
            .get(url.clone())
            .query(&[("ref", branch)])
            .headers(headers.clone())
            .send()
            .await
            .map_err(transport_failure)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(status_failure(response).await);
        }
        let existing: ExistingFile = response
            .json()
            .await
            .map_err(|e| RemoteFailure::transport(format!("unexpected contents response: {}", e)))?;
        Ok(Some(existing.sha))
    }

    #[instrument(name = "github_put_file", skip_all, fields(owner = %credentials.owner, repo = %credentials.repo, path = %request.path))]
    async fn upsert(
        &self,
        request: &PutFileRequest,
        credentials: &PublishCredentials,
    ) -> std::result::Result<(), RemoteFailure> {
        let url = self.contents_url(&credentials.owner, &credentials.repo, &request.path);
        let headers = Self::headers(JSON_MEDIA_TYPE, Some(&credentials.token))?;

        // Overwriting an existing file requires its current sha.
        let sha = self.existing_sha(&url, &request.branch, &headers).await?;
        debug!(update = sha.is_some(), "writing file");

        let body = PutFileBody {
            message: &request.message,
            content: STANDARD.encode(&request.content),
            branch: &request.branch,
            sha,
        };
        let response = self
            .client
            .put(url)
            .headers(headers)
            .json(&body)
            .send()
            .await
            .map_err(transport_failure)?;

        if response.status().is_success() {
            Ok(())
        } else {
            let failure = status_failure(response).await;
            warn!(status = ?failure.status, message = %failure.message, "file write rejected");
            Err(failure)
        }
    }

    #[instrument(name = "github_fetch_raw", skip_all, fields(owner = %source.owner, repo = %source.repo, path = %source.path))]
    async fn download(
        &self,
        source: &FileSource,
        token: Option<&str>,
    ) -> std::result::Result<String, RemoteFailure> {
        let url = self.contents_url(&source.owner, &source.repo, &source.path);
        let response = self
            .client
            .get(url)
            .headers(Self::headers(RAW_MEDIA_TYPE, token)?)
            .send()
            .await
            .map_err(transport_failure)?;

        if !response.status().is_success() {
            return Err(status_failure(response).await);
        }
        response.text().await.map_err(transport_failure)
    }
}

#[async_trait]
impl ContentApi for GithubClient {
    async fn put_file(
        &self,
        request: &PutFileRequest,
        credentials: &PublishCredentials,
    ) -> std::result::Result<(), RemoteFailure> {
        self.upsert(request, credentials).await
    }

    async fn fetch_raw(
        &self,
        source: &FileSource,
        token: Option<&str>,
    ) -> std::result::Result<String, RemoteFailure> {
        self.download(source, token).await
    }
}

fn transport_failure(e: reqwest::Error) -> RemoteFailure {
    if e.is_timeout() {
        RemoteFailure::transport(format!("request timed out: {}", e))
    } else {
        RemoteFailure::transport(e.to_string())
    }
}

async fn status_failure(response: reqwest::Response) -> RemoteFailure {
    let status = response.status().as_u16();
    let text = response.text().await.unwrap_or_default();
    RemoteFailure::status(status, error_message(&text))
}

/// GitHub errors are `{"message": ..., "documentation_url": ...}`; anything else is passed through.
fn error_message(text: &str) -> String {
    match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => body.message,
        Err(_) => text.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api: &str) -> GithubClient {
        GithubClient::new(api, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn contents_url_joins_segments() {
        let c = client(DEFAULT_API_URL);
        let url = c.contents_url("octo", "blog", "contents/Hello-World.md");
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/blog/contents/contents/Hello-World.md"
        );
    }

    #[test]
    fn contents_url_keeps_enterprise_prefix() {
        let c = client("https://ghe.example.test/api/v3/");
        let url = c.contents_url("octo", "blog", "README.md");
        assert_eq!(
            url.as_str(),
            "https://ghe.example.test/api/v3/repos/octo/blog/contents/README.md"
        );
    }

    #[test]
    fn contents_url_escapes_title_characters() {
        let c = client(DEFAULT_API_URL);
        let url = c.contents_url("octo", "blog", "contents/What?-#1.md");
        assert_eq!(
            url.as_str(),
            "https://api.github.com/repos/octo/blog/contents/contents/What%3F-%231.md"
        );
    }

    #[test]
    fn rejects_non_base_api_url() {
        assert!(GithubClient::new("mailto:me@example.test", Duration::from_secs(1)).is_err());
        assert!(GithubClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    #[test]
    fn error_message_prefers_github_json() {
        assert_eq!(
            error_message(r#"{"message":"Conflict","documentation_url":"x"}"#),
            "Conflict"
        );
        assert_eq!(error_message("  plain failure \n"), "plain failure");
    }

    #[test]
    fn headers_mark_token_sensitive() {
        let headers = GithubClient::headers(JSON_MEDIA_TYPE, Some("tok")).unwrap();
        let auth = headers.get(AUTHORIZATION).unwrap();
        assert!(auth.is_sensitive());
        assert_eq!(auth.to_str().unwrap(), "Bearer tok");

        let anonymous = GithubClient::headers(RAW_MEDIA_TYPE, None).unwrap();
        assert!(anonymous.get(AUTHORIZATION).is_none());
    }
}
