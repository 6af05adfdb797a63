//! # Remote Content API
//!
//! The publish pipeline only needs one write primitive, "create or update the file
//! at this path", plus a raw read used by `drafthub show`. [`ContentApi`] is that
//! seam; [`github::GithubClient`] implements it against the GitHub Contents API.
//!
//! Failures are values, not panics: a non-success HTTP status becomes
//! [`RemoteFailure`] with the status code and the response body, a transport
//! problem (timeout, DNS, TLS) becomes a [`RemoteFailure`] without a status.

use crate::model::PublishCredentials;
use async_trait::async_trait;
use std::fmt;

pub mod github;

/// One file write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutFileRequest {
    /// Repository-relative path, e.g. `contents/Hello-World.md`.
    pub path: String,
    /// Raw UTF-8 content. Encoding for the wire is the client's job.
    pub content: Vec<u8>,
    pub message: String,
    pub branch: String,
}

/// Where to read a Markdown file from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    pub owner: String,
    pub repo: String,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFailure {
    pub status: Option<u16>,
    pub message: String,
}

impl RemoteFailure {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(code) => write!(f, "{} - {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

#[async_trait]
pub trait ContentApi: Send + Sync {
    /// Create the file at `request.path`, or overwrite it if it exists.
    async fn put_file(
        &self,
        request: &PutFileRequest,
        credentials: &PublishCredentials,
    ) -> Result<(), RemoteFailure>;

    /// Fetch the raw text of a file. `token` is optional for public repositories.
    async fn fetch_raw(
        &self,
        source: &FileSource,
        token: Option<&str>,
    ) -> Result<String, RemoteFailure>;
}
