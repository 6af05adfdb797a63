use crate::commands::CmdResult;
use crate::error::{DrafthubError, Result};
use crate::remote::{ContentApi, FileSource};

/// Fetch a Markdown file as raw text. Rendering is left to the caller.
pub async fn run<R: ContentApi>(
    remote: &R,
    source: &FileSource,
    token: Option<&str>,
) -> Result<CmdResult> {
    let markdown = remote
        .fetch_raw(source, token)
        .await
        .map_err(|failure| DrafthubError::RemoteReadFailure {
            path: format!("{}/{}/{}", source.owner, source.repo, source.path),
            status: failure.status,
            message: failure.message,
        })?;
    Ok(CmdResult::default().with_markdown(markdown))
}
