use super::backend::BackingStore;
use crate::error::{DrafthubError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

pub const DRAFTS_FILENAME: &str = "drafts.json";

/// Keeps the collection in a single JSON file.
pub struct FsBackend {
    path: PathBuf,
}

impl FsBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Backend for `<dir>/drafts.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DRAFTS_FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn ensure_parent(&self) -> Result<PathBuf> {
        let parent = self
            .path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(&parent).await.map_err(|e| {
                DrafthubError::BackingStoreUnavailable(format!(
                    "cannot create {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(parent)
    }
}

#[async_trait]
impl BackingStore for FsBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => {
                debug!(path = %self.path.display(), len = bytes.len(), "read drafts file");
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(DrafthubError::Io(e)),
        }
    }

    async fn write(&self, bytes: &[u8]) -> Result<()> {
        let dir = self.ensure_parent().await?;

        // Atomic write
        let tmp_path = dir.join(format!(".drafts-{}.tmp", Uuid::new_v4()));
        let unavailable = |e: std::io::Error| {
            DrafthubError::BackingStoreUnavailable(format!(
                "cannot write {}: {}",
                self.path.display(),
                e
            ))
        };
        fs::write(&tmp_path, bytes).await.map_err(unavailable)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(unavailable(e));
        }
        debug!(path = %self.path.display(), len = bytes.len(), "wrote drafts file");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}
