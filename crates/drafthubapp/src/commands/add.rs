use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::MutationStatus;
use crate::store::backend::BackingStore;
use crate::store::DraftStore;

pub async fn run<B: BackingStore>(
    store: &DraftStore<B>,
    title: &str,
    body: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    match store.add(title, body).await? {
        MutationStatus::Applied(draft) => {
            result.add_message(CmdMessage::success(format!(
                "Draft added ({}): {}",
                draft.id, draft.title
            )));
            result.affected_drafts.push(draft);
        }
        MutationStatus::Skipped(reason) => {
            result.add_message(CmdMessage::warning(format!("Nothing added: {}", reason)));
        }
    }
    Ok(result)
}
