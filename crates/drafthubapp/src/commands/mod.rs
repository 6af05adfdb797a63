//! # Command Layer
//!
//! Each user-facing operation lives in its own submodule as a plain async
//! function over a [`DraftStore`](crate::store::DraftStore) and/or a
//! [`ContentApi`](crate::remote::ContentApi).
//!
//! Commands do the work and describe the outcome; they never print. They return
//! a [`CmdResult`] carrying:
//! - `affected_drafts`: drafts created or changed by the operation
//! - `listed_drafts`: drafts to display
//! - `published_paths`: repository paths written by `publish`
//! - `markdown`: raw Markdown fetched by `show`
//! - `messages`: leveled messages (info, success, warning, error)
//! - `failure`: a hard failure that still produced output worth showing
//!
//! A validation skip (empty title, unknown id) is a warning message, not an
//! `Err`. `Err` is for things the user has to fix: missing credentials, a store
//! that cannot be written, a remote that cannot be read.
//!
//! ## Testing Strategy
//!
//! Command tests run against `MemBackend` and `FakeContentApi`; nothing here
//! touches the filesystem or the network.

use crate::error::DrafthubError;
use crate::model::Draft;
use serde::Serialize;

pub mod add;
pub mod delete;
pub mod list;
pub mod publish;
pub mod show;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_drafts: Vec<Draft>,
    pub listed_drafts: Vec<Draft>,
    pub published_paths: Vec<String>,
    pub markdown: Option<String>,
    pub messages: Vec<CmdMessage>,
    /// Set when the command produced partial output and then failed.
    pub failure: Option<DrafthubError>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_drafts(mut self, drafts: Vec<Draft>) -> Self {
        self.listed_drafts = drafts;
        self
    }

    pub fn with_markdown(mut self, markdown: String) -> Self {
        self.markdown = Some(markdown);
        self
    }

    /// Converts a recorded failure into `Err`, after the caller has rendered the rest.
    pub fn take_failure(&mut self) -> crate::error::Result<()> {
        match self.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_failure_is_one_shot() {
        let mut result = CmdResult {
            failure: Some(DrafthubError::Api("boom".into())),
            ..Default::default()
        };
        assert!(result.take_failure().is_err());
        assert!(result.take_failure().is_ok());
    }

    #[test]
    fn message_level_serializes_lowercase() {
        let json = serde_json::to_string(&CmdMessage::warning("careful")).unwrap();
        assert_eq!(json, r#"{"level":"warning","content":"careful"}"#);
    }
}
