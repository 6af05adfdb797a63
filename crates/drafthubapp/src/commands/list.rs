use crate::commands::CmdResult;
use crate::error::Result;
use crate::store::backend::BackingStore;
use crate::store::DraftStore;

pub async fn run<B: BackingStore>(store: &DraftStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listed_drafts(store.list().await))
}
