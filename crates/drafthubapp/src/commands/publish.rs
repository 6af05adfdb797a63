use crate::commands::{CmdMessage, CmdResult};
use crate::error::{DrafthubError, Result};
use crate::model::PublishCredentials;
use crate::publish::{ItemOutcome, PublishCoordinator};
use crate::remote::ContentApi;
use crate::store::backend::BackingStore;
use crate::store::DraftStore;

/// Publish every draft, then describe what happened.
///
/// A rejected write does not discard the progress made before it: the result
/// lists the paths already written and carries the rejection in `failure`.
pub async fn run<B: BackingStore, R: ContentApi>(
    store: &DraftStore<B>,
    coordinator: &PublishCoordinator<R>,
    credentials: &PublishCredentials,
) -> Result<CmdResult> {
    let report = coordinator.publish_all(store, credentials).await?;
    let mut result = CmdResult::default();

    if report.items.is_empty() {
        result.add_message(CmdMessage::info("No drafts to publish."));
        return Ok(result);
    }

    for item in &report.items {
        match &item.outcome {
            ItemOutcome::Published { path } => {
                result.add_message(CmdMessage::success(format!(
                    "Published {} -> {}",
                    item.draft.title, path
                )));
                result.published_paths.push(path.clone());
            }
            ItemOutcome::Failed(failure) => {
                result.add_message(CmdMessage::error(format!(
                    "Failed {}: {}",
                    item.draft.title, failure
                )));
                result.failure = Some(DrafthubError::RemoteWriteFailure {
                    title: item.draft.title.clone(),
                    status: failure.status,
                    message: failure.message.clone(),
                });
            }
            ItemOutcome::NotAttempted => {}
        }
    }

    if result.failure.is_some() {
        let skipped = report.not_attempted();
        let mut note = format!(
            "{} of {} drafts published; drafts were kept",
            result.published_paths.len(),
            report.items.len()
        );
        if skipped > 0 {
            note.push_str(&format!(", {} not attempted", skipped));
        }
        result.add_message(CmdMessage::warning(note));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::publish::PublishTarget;
    use crate::store::mem_backend::MemBackend;
    use crate::test_utils::FakeContentApi;

    fn setup() -> (DraftStore<MemBackend>, PublishCoordinator<FakeContentApi>) {
        (
            DraftStore::with_backend(MemBackend::new()),
            PublishCoordinator::new(FakeContentApi::new(), PublishTarget::default()),
        )
    }

    fn creds() -> PublishCredentials {
        PublishCredentials::new("octo", "blog", "tok")
    }

    #[tokio::test]
    async fn reports_every_published_path() {
        let (store, coordinator) = setup();
        store.add("Hello World", "content").await.unwrap();
        store.add("Second", "two").await.unwrap();

        let mut result = run(&store, &coordinator, &creds()).await.unwrap();
        assert_eq!(
            result.published_paths,
            vec!["contents/Hello-World.md", "contents/Second.md"]
        );
        assert!(result.take_failure().is_ok());
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn conflict_on_second_draft_is_carried_as_failure() {
        let (store, coordinator) = setup();
        store.add("First", "one").await.unwrap();
        store.add("Second", "two").await.unwrap();
        coordinator
            .remote()
            .fail_path("contents/Second.md", 409, "sha mismatch");

        let mut result = run(&store, &coordinator, &creds()).await.unwrap();
        assert_eq!(result.published_paths, vec!["contents/First.md"]);
        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Error && m.content.contains("Second")));

        match result.take_failure() {
            Err(DrafthubError::RemoteWriteFailure { title, status, .. }) => {
                assert_eq!(title, "Second");
                assert_eq!(status, Some(409));
            }
            other => panic!("expected RemoteWriteFailure, got {:?}", other),
        }
        assert_eq!(store.list().await.len(), 2);
    }

    #[tokio::test]
    async fn missing_credentials_is_an_error() {
        let (store, coordinator) = setup();
        store.add("A", "a").await.unwrap();

        let err = run(&store, &coordinator, &PublishCredentials::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DrafthubError::MissingCredentials(_)));
        assert_eq!(coordinator.remote().put_count(), 0);
    }

    #[tokio::test]
    async fn empty_collection_says_so() {
        let (store, coordinator) = setup();
        let result = run(&store, &coordinator, &creds()).await.unwrap();
        assert_eq!(result.messages[0].content, "No drafts to publish.");
        assert!(result.failure.is_none());
    }
}
