use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{DraftId, MutationStatus};
use crate::store::backend::BackingStore;
use crate::store::DraftStore;

pub async fn run<B: BackingStore>(
    store: &DraftStore<B>,
    id: DraftId,
    title: &str,
    body: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.update(id, title, body).await? {
        MutationStatus::Applied(draft) => {
            result.add_message(CmdMessage::success(format!(
                "Draft updated ({}): {}",
                draft.id, draft.title
            )));
            result.affected_drafts.push(draft);
        }
        MutationStatus::Skipped(reason) => {
            result.add_message(CmdMessage::warning(format!("Nothing updated: {}", reason)));
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    async fn seeded() -> (DraftStore<MemBackend>, DraftId) {
        let store = DraftStore::with_backend(MemBackend::new());
        let id = match store.add("Old", "old body").await.unwrap() {
            MutationStatus::Applied(draft) => draft.id,
            other => panic!("seed skipped: {:?}", other),
        };
        (store, id)
    }

    #[tokio::test]
    async fn replaces_title_and_body() {
        let (store, id) = seeded().await;
        let result = run(&store, id, "New", "new body").await.unwrap();

        assert_eq!(result.affected_drafts[0].id, id);
        let drafts = store.list().await;
        assert_eq!(drafts[0].title, "New");
        assert_eq!(drafts[0].body, "new body");
    }

    #[tokio::test]
    async fn empty_title_leaves_record_unchanged() {
        let (store, id) = seeded().await;
        let result = run(&store, id, "", "body").await.unwrap();

        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(store.list().await[0].title, "Old");
    }

    #[tokio::test]
    async fn unknown_id_names_the_id() {
        let (store, id) = seeded().await;
        let result = run(&store, id + 1, "T", "B").await.unwrap();
        assert_eq!(
            result.messages[0].content,
            format!("Nothing updated: no draft with id {}", id + 1)
        );
    }
}
