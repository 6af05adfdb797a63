use crate::error::Result;
use async_trait::async_trait;

/// Abstract interface for raw draft-collection I/O.
/// This trait handles the "where" of storage (file, memory, remote blob),
/// while [`super::DraftStore`] handles the "what" (validation, ids, ordering).
///
/// The collection is always read and written as one document; there are no
/// partial updates.
#[async_trait]
pub trait BackingStore: Send + Sync {
    /// Read the serialized collection.
    /// Returns Ok(None) if nothing has been written yet.
    /// Returns Err only on actual I/O failures (permissions, unreachable service).
    async fn read(&self) -> Result<Option<Vec<u8>>>;

    /// Replace the serialized collection.
    /// MUST be atomic (e.g. write to tmp then rename) so readers never see a torn document.
    async fn write(&self, bytes: &[u8]) -> Result<()>;

    /// Human readable location, used in logs and `drafthub config`.
    fn location(&self) -> String;
}
