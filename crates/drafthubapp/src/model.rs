//! # Data Model
//!
//! A [`Draft`] is one unpublished title/body record. The persisted collection is a
//! single JSON array in insertion order:
//!
//! ```json
//! [{"id": 1718000000000, "title": "Hello World", "body": "content"}]
//! ```
//!
//! ## Identity
//!
//! Ids come from the creation time in milliseconds. Two drafts created in the same
//! millisecond (or after a clock step backwards) would collide, so [`next_id`]
//! bumps past the largest id already present, falling back to the lowest unused
//! id when the largest is `u64::MAX`. Ids are never reused while the draft they
//! name is alive and never change once assigned.
//!
//! ## Validation
//!
//! Title and body are stored sanitized (see [`crate::sanitize`]). A field that is
//! empty or only whitespace after sanitization is rejected; rejection is not an
//! error but a [`MutationStatus::Skipped`] outcome.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub type DraftId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub id: DraftId,
    pub title: String,
    pub body: String,
}

impl Draft {
    pub fn new(id: DraftId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Picks the id for a new draft: `now_millis`, unless some existing draft already
/// holds an id at or above it.
///
/// If the largest id is `DraftId::MAX` there is nothing above it, so the lowest
/// free id is used instead.
pub fn next_id(existing: &[Draft], now_millis: DraftId) -> DraftId {
    match existing.iter().map(|d| d.id).max() {
        Some(max) if max >= now_millis => {
            max.checked_add(1).unwrap_or_else(|| lowest_free_id(existing))
        }
        _ => now_millis,
    }
}

fn lowest_free_id(existing: &[Draft]) -> DraftId {
    let used: BTreeSet<DraftId> = existing.iter().map(|d| d.id).collect();
    let mut candidate = 0;
    for id in used {
        if id != candidate {
            break;
        }
        candidate += 1;
    }
    candidate
}

/// Why a mutation left the collection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyTitle,
    EmptyBody,
    UnknownId(DraftId),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::EmptyTitle => write!(f, "title is empty"),
            SkipReason::EmptyBody => write!(f, "body is empty"),
            SkipReason::UnknownId(id) => write!(f, "no draft with id {}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationStatus {
    Applied(Draft),
    Skipped(SkipReason),
}

impl MutationStatus {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationStatus::Applied(_))
    }
}

/// Owner, repository and token for remote writes.
///
/// The token is opaque; `Debug` never prints it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PublishCredentials {
    pub owner: String,
    pub repo: String,
    pub token: String,
}

impl PublishCredentials {
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        }
    }

    /// Names of the parts that are empty, in owner/repository/token order.
    pub fn missing_parts(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.owner.trim().is_empty() {
            missing.push("owner");
        }
        if self.repo.trim().is_empty() {
            missing.push("repository");
        }
        if self.token.trim().is_empty() {
            missing.push("token");
        }
        missing
    }
}

impl fmt::Debug for PublishCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublishCredentials")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &"<redacted>")
            .finish()
    }
}
