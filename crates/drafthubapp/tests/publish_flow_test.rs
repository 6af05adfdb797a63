//! End-to-end publish against a file-backed store and a scripted remote.

use async_trait::async_trait;
use drafthubapp::api::DraftsApi;
use drafthubapp::error::DrafthubError;
use drafthubapp::model::PublishCredentials;
use drafthubapp::publish::{PublishCoordinator, PublishTarget};
use drafthubapp::remote::{ContentApi, FileSource, PutFileRequest, RemoteFailure};
use drafthubapp::store::fs_backend::FsBackend;
use drafthubapp::store::DraftStore;
use std::sync::Mutex;
use tempfile::TempDir;

/// Accepts writes until `reject_after` successes, then answers 422.
struct ScriptedRemote {
    reject_after: Option<usize>,
    written: Mutex<Vec<String>>,
}

impl ScriptedRemote {
    fn new(reject_after: Option<usize>) -> Self {
        Self {
            reject_after,
            written: Mutex::new(Vec::new()),
        }
    }

    fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentApi for ScriptedRemote {
    async fn put_file(
        &self,
        request: &PutFileRequest,
        _credentials: &PublishCredentials,
    ) -> Result<(), RemoteFailure> {
        let mut written = self.written.lock().unwrap();
        if Some(written.len()) == self.reject_after {
            return Err(RemoteFailure::status(422, "Invalid request"));
        }
        written.push(request.path.clone());
        Ok(())
    }

    async fn fetch_raw(
        &self,
        _source: &FileSource,
        _token: Option<&str>,
    ) -> Result<String, RemoteFailure> {
        Err(RemoteFailure::status(404, "Not Found"))
    }
}

fn api(dir: &TempDir, remote: ScriptedRemote) -> DraftsApi<FsBackend, ScriptedRemote> {
    DraftsApi::new(
        DraftStore::with_backend(FsBackend::in_dir(dir.path())),
        PublishCoordinator::new(remote, PublishTarget::default()),
    )
}

fn creds() -> PublishCredentials {
    PublishCredentials::new("octo", "blog", "tok")
}

#[tokio::test]
async fn full_publish_clears_the_file() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, ScriptedRemote::new(None));
    api.add_draft("Hello World", "content").await.unwrap();
    api.add_draft("Second Post", "more").await.unwrap();

    let mut result = api.publish_all(&creds()).await.unwrap();
    assert!(result.take_failure().is_ok());
    assert_eq!(
        api.publisher().remote().written(),
        vec!["contents/Hello-World.md", "contents/Second-Post.md"]
    );

    // A fresh store over the same file sees the cleared collection.
    let reopened = DraftStore::with_backend(FsBackend::in_dir(dir.path()));
    assert!(reopened.list().await.is_empty());
    assert!(api.take_publish_success());
}

#[tokio::test]
async fn partial_publish_keeps_the_file_intact() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, ScriptedRemote::new(Some(1)));
    api.add_draft("First", "1").await.unwrap();
    api.add_draft("Second", "2").await.unwrap();
    api.add_draft("Third", "3").await.unwrap();

    let mut result = api.publish_all(&creds()).await.unwrap();
    let err = result.take_failure().unwrap_err();
    assert_eq!(err.to_string(), "Failed to publish Second: 422 - Invalid request");

    assert_eq!(api.publisher().remote().written(), vec!["contents/First.md"]);
    assert_eq!(api.list_drafts().await.unwrap().listed_drafts.len(), 3);
    assert!(!api.take_publish_success());
}

#[tokio::test]
async fn missing_owner_never_reaches_the_remote() {
    let dir = TempDir::new().unwrap();
    let api = api(&dir, ScriptedRemote::new(None));
    api.add_draft("Hello", "world").await.unwrap();

    let err = api
        .publish_all(&PublishCredentials::new("", "blog", "tok"))
        .await
        .unwrap_err();
    assert!(matches!(err, DrafthubError::MissingCredentials(ref parts) if parts == &vec!["owner"]));
    assert!(api.publisher().remote().written().is_empty());
}
