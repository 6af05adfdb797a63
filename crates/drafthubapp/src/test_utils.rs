use crate::model::PublishCredentials;
use crate::remote::{ContentApi, FileSource, PutFileRequest, RemoteFailure};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct FakeState {
    puts: Vec<PutFileRequest>,
    files: HashMap<String, Vec<u8>>,
    failures: HashMap<String, RemoteFailure>,
    fetches: Vec<FileSource>,
}

/// Recording stand-in for the GitHub Contents API.
///
/// Successful writes land in an in-memory "repository" keyed by path, so
/// overwrite behaviour can be asserted. Paths registered with [`fail_path`]
/// answer with the given failure instead.
///
/// [`fail_path`]: FakeContentApi::fail_path
#[derive(Default)]
pub struct FakeContentApi {
    state: Mutex<FakeState>,
}

impl FakeContentApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make writes to `path` fail with an HTTP status.
    pub fn fail_path(&self, path: &str, status: u16, message: &str) {
        self.fail_path_with(path, RemoteFailure::status(status, message));
    }

    pub fn fail_path_with(&self, path: &str, failure: RemoteFailure) {
        self.lock().failures.insert(path.to_string(), failure);
    }

    /// Seed a file for `fetch_raw`.
    pub fn put_existing(&self, path: &str, content: &str) {
        self.lock()
            .files
            .insert(path.to_string(), content.as_bytes().to_vec());
    }

    pub fn put_calls(&self) -> Vec<PutFileRequest> {
        self.lock().puts.clone()
    }

    pub fn put_count(&self) -> usize {
        self.lock().puts.len()
    }

    pub fn fetch_calls(&self) -> Vec<FileSource> {
        self.lock().fetches.clone()
    }

    pub fn file(&self, path: &str) -> Option<Vec<u8>> {
        self.lock().files.get(path).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ContentApi for FakeContentApi {
    async fn put_file(
        &self,
        request: &PutFileRequest,
        _credentials: &PublishCredentials,
    ) -> Result<(), RemoteFailure> {
        let mut state = self.lock();
        state.puts.push(request.clone());
        if let Some(failure) = state.failures.get(&request.path) {
            return Err(failure.clone());
        }
        state
            .files
            .insert(request.path.clone(), request.content.clone());
        Ok(())
    }

    async fn fetch_raw(
        &self,
        source: &FileSource,
        _token: Option<&str>,
    ) -> Result<String, RemoteFailure> {
        let mut state = self.lock();
        state.fetches.push(source.clone());
        match state.files.get(&source.path) {
            Some(bytes) => Ok(String::from_utf8_lossy(bytes).into_owned()),
            None => Err(RemoteFailure::status(404, "Not Found")),
        }
    }
}
