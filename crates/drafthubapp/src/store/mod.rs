//! # Storage Layer
//!
//! [`DraftStore`] owns the canonical, ordered list of pending drafts. Raw I/O is
//! delegated to a [`backend::BackingStore`], so the same store logic runs against a
//! JSON file, memory, or any other medium that can hold one document.
//!
//! ## Whole-Collection Rewrites
//!
//! Every mutation is a read-modify-write of the entire collection:
//!
//! 1. **Load**: read the document and parse it as `Vec<Draft>`.
//! 2. **Modify**: push, replace in place, or filter.
//! 3. **Write**: serialize the full list and hand it to the backend.
//!
//! There are no field-level updates and no in-memory lock. Two processes
//! mutating the same backend concurrently resolve as last-writer-wins at
//! collection granularity.
//!
//! ## Failure Policy
//!
//! - **Reads fail open**: a missing, unreadable or unparsable document is an
//!   empty collection. Problems other than "missing" are logged at `warn`.
//! - **Writes fail closed**: a backend write error is returned to the caller as
//!   [`DrafthubError::BackingStoreUnavailable`](crate::error::DrafthubError).
//! - **Validation skips**: empty title/body or an unknown id leaves the backend
//!   untouched and returns [`MutationStatus::Skipped`].
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! └── drafts.json    # [{"id": .., "title": .., "body": ..}, ...]
//! ```
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: production, atomic temp-file + rename.
//! - [`mem_backend::MemBackend`]: for tests, with error simulation.

use crate::error::Result;
use crate::model::{next_id, Draft, DraftId, MutationStatus, SkipReason};
use crate::sanitize::{is_blank, strip_markup};
use backend::BackingStore;
use chrono::Utc;
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub struct DraftStore<B: BackingStore> {
    backend: B,
}

impl<B: BackingStore> DraftStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All drafts in insertion order. Never fails.
    pub async fn list(&self) -> Vec<Draft> {
        self.load().await
    }

    /// Append a new draft. Skipped if either field is blank after sanitizing.
    pub async fn add(&self, title: &str, body: &str) -> Result<MutationStatus> {
        let (title, body) = match clean_fields(title, body) {
            Ok(fields) => fields,
            Err(reason) => return Ok(MutationStatus::Skipped(reason)),
        };

        let mut drafts = self.load().await;
        let draft = Draft::new(next_id(&drafts, now_millis()), title, body);
        drafts.push(draft.clone());
        self.save(&drafts).await?;

        debug!(id = draft.id, "draft added");
        Ok(MutationStatus::Applied(draft))
    }

    /// Replace title and body of draft `id`, keeping its id and position.
    ///
    /// Older documents can hold several records with one id; all of them are
    /// rewritten, and `remove` drops all of them.
    pub async fn update(&self, id: DraftId, title: &str, body: &str) -> Result<MutationStatus> {
        let (title, body) = match clean_fields(title, body) {
            Ok(fields) => fields,
            Err(reason) => return Ok(MutationStatus::Skipped(reason)),
        };

        let mut drafts = self.load().await;
        let mut updated = None;
        for draft in drafts.iter_mut().filter(|d| d.id == id) {
            draft.title = title.clone();
            draft.body = body.clone();
            updated.get_or_insert_with(|| draft.clone());
        }
        let Some(updated) = updated else {
            return Ok(MutationStatus::Skipped(SkipReason::UnknownId(id)));
        };
        self.save(&drafts).await?;

        debug!(id, "draft updated");
        Ok(MutationStatus::Applied(updated))
    }

    /// Remove draft `id` if present.
    pub async fn remove(&self, id: DraftId) -> Result<MutationStatus> {
        let mut drafts = self.load().await;
        let Some(removed) = drafts.iter().find(|d| d.id == id).cloned() else {
            return Ok(MutationStatus::Skipped(SkipReason::UnknownId(id)));
        };
        drafts.retain(|d| d.id != id);
        self.save(&drafts).await?;

        debug!(id, "draft removed");
        Ok(MutationStatus::Applied(removed))
    }

    /// Empty the collection.
    pub async fn clear(&self) -> Result<()> {
        self.save(&[]).await?;
        debug!("drafts cleared");
        Ok(())
    }

    async fn load(&self) -> Vec<Draft> {
        let bytes = match self.backend.read().await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(location = %self.backend.location(), error = %e, "drafts unreadable, treating as empty");
                return Vec::new();
            }
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }
        match serde_json::from_slice(&bytes) {
            Ok(drafts) => drafts,
            Err(e) => {
                warn!(location = %self.backend.location(), error = %e, "drafts document malformed, treating as empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, drafts: &[Draft]) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(drafts)?;
        self.backend.write(&bytes).await
    }
}

fn clean_fields(title: &str, body: &str) -> std::result::Result<(String, String), SkipReason> {
    let title = strip_markup(title);
    if is_blank(&title) {
        return Err(SkipReason::EmptyTitle);
    }
    let body = strip_markup(body);
    if is_blank(&body) {
        return Err(SkipReason::EmptyBody);
    }
    Ok((title, body))
}

fn now_millis() -> DraftId {
    DraftId::try_from(Utc::now().timestamp_millis()).unwrap_or_default()
}
