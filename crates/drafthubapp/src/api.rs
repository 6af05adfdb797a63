//! # API Facade
//!
//! [`DraftsApi`] is the single entry point for UI clients. It owns the draft
//! store and the publish coordinator and forwards each call to the matching
//! command in [`crate::commands`].
//!
//! The facade does no business logic and no presentation. It returns
//! `Result<CmdResult>` and lets the caller decide how to render it.
//!
//! ## Generic Over Backends
//!
//! `DraftsApi<B: BackingStore, R: ContentApi>`:
//! - Production: `DraftsApi<FsBackend, GithubClient>`
//! - Testing: `DraftsApi<MemBackend, FakeContentApi>`
//!
//! ## Testing Strategy
//!
//! API tests check wiring: the right command runs and state flows between
//! calls. Command behaviour is tested in the command modules.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{DraftId, PublishCredentials};
use crate::publish::PublishCoordinator;
use crate::remote::{ContentApi, FileSource};
use crate::store::backend::BackingStore;
use crate::store::DraftStore;

pub struct DraftsApi<B: BackingStore, R: ContentApi> {
    store: DraftStore<B>,
    publisher: PublishCoordinator<R>,
}

impl<B: BackingStore, R: ContentApi> DraftsApi<B, R> {
    pub fn new(store: DraftStore<B>, publisher: PublishCoordinator<R>) -> Self {
        Self { store, publisher }
    }

    pub fn store(&self) -> &DraftStore<B> {
        &self.store
    }

    pub fn publisher(&self) -> &PublishCoordinator<R> {
        &self.publisher
    }

    pub async fn list_drafts(&self) -> Result<CmdResult> {
        commands::list::run(&self.store).await
    }

    pub async fn add_draft(&self, title: &str, body: &str) -> Result<CmdResult> {
        commands::add::run(&self.store, title, body).await
    }

    pub async fn update_draft(&self, id: DraftId, title: &str, body: &str) -> Result<CmdResult> {
        commands::update::run(&self.store, id, title, body).await
    }

    pub async fn delete_draft(&self, id: DraftId) -> Result<CmdResult> {
        commands::delete::run(&self.store, id).await
    }

    pub async fn publish_all(&self, credentials: &PublishCredentials) -> Result<CmdResult> {
        commands::publish::run(&self.store, &self.publisher, credentials).await
    }

    /// True exactly once after a fully successful publish.
    pub fn take_publish_success(&self) -> bool {
        self.publisher.take_success()
    }

    pub async fn fetch_markdown(
        &self,
        source: &FileSource,
        token: Option<&str>,
    ) -> Result<CmdResult> {
        commands::show::run(self.publisher.remote(), source, token).await
    }
}
