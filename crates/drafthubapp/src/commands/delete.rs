use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{DraftId, MutationStatus};
use crate::store::backend::BackingStore;
use crate::store::DraftStore;

/// Removing an id that does not exist is a warning, never an error.
pub async fn run<B: BackingStore>(store: &DraftStore<B>, id: DraftId) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.remove(id).await? {
        MutationStatus::Applied(draft) => {
            result.add_message(CmdMessage::success(format!(
                "Draft deleted ({}): {}",
                draft.id, draft.title
            )));
            result.affected_drafts.push(draft);
        }
        MutationStatus::Skipped(reason) => {
            result.add_message(CmdMessage::warning(format!("Nothing deleted: {}", reason)));
        }
    }
    Ok(result)
}
