//! # Bulk Publishing
//!
//! [`PublishCoordinator`] turns the current draft collection into a sequence of
//! remote file writes.
//!
//! ## Pipeline
//!
//! 1. **Precondition**: owner, repository and token must all be present. If not,
//!    the run stops with `MissingCredentials` before any network call and
//!    without reading the store.
//! 2. **Snapshot**: the drafts are listed once; later edits do not affect this run.
//! 3. **Write, in order**: each draft becomes `{base_dir}/{Title-With-Hyphens}.md`
//!    containing the body verbatim. Write `i + 1` starts only after write `i`
//!    finished.
//! 4. **Fail fast**: the first failed write stops the run. Everything after it is
//!    `NotAttempted`; files already written stay written, and the store is left
//!    as it was so the user can retry.
//! 5. **Commit**: when every write succeeded, the store is cleared and the
//!    one-shot success flag is raised.
//!
//! ## Path Collisions
//!
//! Only spaces are rewritten. `"My Post"` and `"My-Post"` both land on
//! `contents/My-Post.md`; the later draft in the batch overwrites the earlier one.

use crate::error::{DrafthubError, Result};
use crate::model::{Draft, PublishCredentials};
use crate::remote::{ContentApi, PutFileRequest, RemoteFailure};
use crate::store::backend::BackingStore;
use crate::store::DraftStore;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

pub const DEFAULT_BASE_DIR: &str = "contents";
pub const DEFAULT_BRANCH: &str = "main";

/// Where published files go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub base_dir: String,
    pub branch: String,
}

impl Default for PublishTarget {
    fn default() -> Self {
        Self {
            base_dir: DEFAULT_BASE_DIR.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl PublishTarget {
    /// `{base_dir}/{title with spaces as hyphens}.md`
    pub fn path_for(&self, title: &str) -> String {
        let file = format!("{}.md", title.replace(' ', "-"));
        let base = self.base_dir.trim_matches('/');
        if base.is_empty() {
            file
        } else {
            format!("{}/{}", base, file)
        }
    }
}

pub fn commit_message(title: &str) -> String {
    format!("Add {}", title)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    Published { path: String },
    Failed(RemoteFailure),
    NotAttempted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishItem {
    pub draft: Draft,
    pub outcome: ItemOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishReport {
    pub items: Vec<PublishItem>,
}

impl PublishReport {
    /// The draft whose write failed, with the remote's answer.
    pub fn failure(&self) -> Option<(&Draft, &RemoteFailure)> {
        self.items.iter().find_map(|item| match &item.outcome {
            ItemOutcome::Failed(failure) => Some((&item.draft, failure)),
            _ => None,
        })
    }

    pub fn is_complete(&self) -> bool {
        self.failure().is_none()
    }

    pub fn published(&self) -> impl Iterator<Item = (&Draft, &str)> {
        self.items.iter().filter_map(|item| match &item.outcome {
            ItemOutcome::Published { path } => Some((&item.draft, path.as_str())),
            _ => None,
        })
    }

    pub fn not_attempted(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.outcome == ItemOutcome::NotAttempted)
            .count()
    }
}

pub struct PublishCoordinator<R: ContentApi> {
    remote: R,
    target: PublishTarget,
    succeeded: AtomicBool,
}

impl<R: ContentApi> PublishCoordinator<R> {
    pub fn new(remote: R, target: PublishTarget) -> Self {
        Self {
            remote,
            target,
            succeeded: AtomicBool::new(false),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn target(&self) -> &PublishTarget {
        &self.target
    }

    /// Publish every draft in `store`, in order, stopping at the first failure.
    ///
    /// `Err` is reserved for problems outside the per-draft pipeline: missing
    /// credentials, or a store that cannot be cleared afterwards. A rejected
    /// write is reported through [`PublishReport::failure`].
    pub async fn publish_all<B: BackingStore>(
        &self,
        store: &DraftStore<B>,
        credentials: &PublishCredentials,
    ) -> Result<PublishReport> {
        let missing = credentials.missing_parts();
        if !missing.is_empty() {
            return Err(DrafthubError::MissingCredentials(missing));
        }

        let drafts = store.list().await;
        let report = self.write_all(drafts, credentials).await;

        if report.is_complete() {
            store.clear().await?;
            self.succeeded.store(true, Ordering::SeqCst);
            info!(count = report.items.len(), "all drafts published");
        }
        Ok(report)
    }

    /// Returns true once after a fully successful publish, then resets.
    pub fn take_success(&self) -> bool {
        self.succeeded.swap(false, Ordering::SeqCst)
    }

    async fn write_all(
        &self,
        drafts: Vec<Draft>,
        credentials: &PublishCredentials,
    ) -> PublishReport {
        let mut report = PublishReport::default();
        let mut halted = false;

        for draft in drafts {
            let outcome = if halted {
                ItemOutcome::NotAttempted
            } else {
                self.write_one(&draft, credentials).await
            };
            if matches!(outcome, ItemOutcome::Failed(_)) {
                halted = true;
            }
            report.items.push(PublishItem { draft, outcome });
        }
        report
    }

    async fn write_one(&self, draft: &Draft, credentials: &PublishCredentials) -> ItemOutcome {
        let request = PutFileRequest {
            path: self.target.path_for(&draft.title),
            content: draft.body.as_bytes().to_vec(),
            message: commit_message(&draft.title),
            branch: self.target.branch.clone(),
        };

        match self.remote.put_file(&request, credentials).await {
            Ok(()) => {
                info!(id = draft.id, path = %request.path, "draft published");
                ItemOutcome::Published { path: request.path }
            }
            Err(failure) => {
                warn!(id = draft.id, title = %draft.title, status = ?failure.status, "publish halted");
                ItemOutcome::Failed(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MutationStatus;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::FakeContentApi;

    fn creds() -> PublishCredentials {
        PublishCredentials::new("octo", "blog", "tok")
    }

    fn store() -> DraftStore<MemBackend> {
        DraftStore::with_backend(MemBackend::new())
    }

    fn coordinator(remote: FakeContentApi) -> PublishCoordinator<FakeContentApi> {
        PublishCoordinator::new(remote, PublishTarget::default())
    }

    #[test]
    fn path_replaces_spaces_only() {
        let target = PublishTarget::default();
        assert_eq!(target.path_for("Hello World"), "contents/Hello-World.md");
        assert_eq!(target.path_for("My  Post!"), "contents/My--Post!.md");
        assert_eq!(target.path_for("Case"), "contents/Case.md");
    }

    #[test]
    fn path_respects_base_dir() {
        let target = PublishTarget {
            base_dir: "/posts/2024/".into(),
            branch: "main".into(),
        };
        assert_eq!(target.path_for("A B"), "posts/2024/A-B.md");

        let root = PublishTarget {
            base_dir: "".into(),
            branch: "main".into(),
        };
        assert_eq!(root.path_for("A B"), "A-B.md");
    }

    #[tokio::test]
    async fn publishes_body_to_derived_path_and_clears() {
        let store = store();
        store.add("Hello World", "content").await.unwrap();
        let coordinator = coordinator(FakeContentApi::new());

        let report = coordinator.publish_all(&store, &creds()).await.unwrap();
        assert!(report.is_complete());

        let calls = coordinator.remote().put_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].path, "contents/Hello-World.md");
        assert_eq!(calls[0].branch, "main");
        assert_eq!(calls[0].message, "Add Hello World");
        assert_eq!(calls[0].content, b"content");

        assert!(store.list().await.is_empty());
        assert!(coordinator.take_success());
        assert!(!coordinator.take_success());
    }

    #[tokio::test]
    async fn stops_at_first_failure_and_keeps_drafts() {
        let store = store();
        store.add("First", "one").await.unwrap();
        store.add("Second", "two").await.unwrap();
        store.add("Third", "three").await.unwrap();
        let remote = FakeContentApi::new();
        remote.fail_path("contents/Second.md", 409, "is at abc but expected def");
        let coordinator = coordinator(remote);

        let report = coordinator.publish_all(&store, &creds()).await.unwrap();

        let (draft, failure) = report.failure().unwrap();
        assert_eq!(draft.title, "Second");
        assert_eq!(failure.status, Some(409));
        assert_eq!(report.published().count(), 1);
        assert_eq!(report.not_attempted(), 1);

        // Third was never sent
        let paths: Vec<_> = coordinator
            .remote()
            .put_calls()
            .into_iter()
            .map(|c| c.path)
            .collect();
        assert_eq!(paths, vec!["contents/First.md", "contents/Second.md"]);

        assert_eq!(store.list().await.len(), 3);
        assert!(!coordinator.take_success());
    }

    #[tokio::test]
    async fn missing_token_makes_no_calls() {
        let store = store();
        store.add("Hello World", "content").await.unwrap();
        let coordinator = coordinator(FakeContentApi::new());

        let err = coordinator
            .publish_all(&store, &PublishCredentials::new("octo", "blog", ""))
            .await
            .unwrap_err();

        assert!(matches!(err, DrafthubError::MissingCredentials(ref parts) if parts == &vec!["token"]));
        assert_eq!(coordinator.remote().put_count(), 0);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn colliding_titles_overwrite_in_order() {
        let store = store();
        store.add("My Post", "first").await.unwrap();
        store.add("My-Post", "second").await.unwrap();
        let coordinator = coordinator(FakeContentApi::new());

        let report = coordinator.publish_all(&store, &creds()).await.unwrap();
        assert!(report.is_complete());

        let remote = coordinator.remote();
        assert_eq!(remote.put_count(), 2);
        assert_eq!(
            remote.file("contents/My-Post.md").unwrap(),
            b"second".to_vec()
        );
    }

    #[tokio::test]
    async fn empty_collection_publishes_nothing() {
        let store = store();
        let coordinator = coordinator(FakeContentApi::new());
        let report = coordinator.publish_all(&store, &creds()).await.unwrap();
        assert!(report.items.is_empty());
        assert!(report.is_complete());
        assert_eq!(coordinator.remote().put_count(), 0);
    }

    #[tokio::test]
    async fn transport_failure_halts_like_status_failure() {
        let store = store();
        store.add("Only", "one").await.unwrap();
        let remote = FakeContentApi::new();
        remote.fail_path_with("contents/Only.md", RemoteFailure::transport("timed out"));
        let coordinator = coordinator(remote);

        let report = coordinator.publish_all(&store, &creds()).await.unwrap();
        let (_, failure) = report.failure().unwrap();
        assert_eq!(failure.status, None);
        assert_eq!(store.list().await.len(), 1);
    }

    #[tokio::test]
    async fn clear_failure_after_full_publish_is_an_error() {
        let store = store();
        let added = store.add("A", "a").await.unwrap();
        assert!(matches!(added, MutationStatus::Applied(_)));
        store.backend().set_simulate_write_error(true);
        let coordinator = coordinator(FakeContentApi::new());

        let err = coordinator.publish_all(&store, &creds()).await.unwrap_err();
        assert!(matches!(err, DrafthubError::BackingStoreUnavailable(_)));
        assert!(!coordinator.take_success());
    }
}
