use super::backend::BackingStore;
use crate::error::{DrafthubError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// In-memory backing store for testing.
///
/// Holds the serialized document exactly as a real store would, so tests also
/// exercise the JSON round trip.
#[derive(Default)]
pub struct MemBackend {
    document: Mutex<Option<Vec<u8>>>,
    simulate_write_error: AtomicBool,
    simulate_read_error: AtomicBool,
    writes: AtomicUsize,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend pre-loaded with raw document bytes.
    pub fn with_document(bytes: impl Into<Vec<u8>>) -> Self {
        let backend = Self::default();
        *backend.lock() = Some(bytes.into());
        backend
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }

    /// Enable read error simulation for testing fail-open reads.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.store(simulate, Ordering::SeqCst);
    }

    /// Raw bytes currently stored.
    pub fn document(&self) -> Option<Vec<u8>> {
        self.lock().clone()
    }

    /// Number of successful writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Vec<u8>>> {
        // A poisoned lock only means a test panicked mid-write; the bytes are still usable.
        self.document.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl BackingStore for MemBackend {
    async fn read(&self) -> Result<Option<Vec<u8>>> {
        if self.simulate_read_error.load(Ordering::SeqCst) {
            return Err(DrafthubError::BackingStoreUnavailable(
                "Simulated read error".to_string(),
            ));
        }
        Ok(self.lock().clone())
    }

    async fn write(&self, bytes: &[u8]) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(DrafthubError::BackingStoreUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        *self.lock() = Some(bytes.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn location(&self) -> String {
        "memory://drafts".to_string()
    }
}
