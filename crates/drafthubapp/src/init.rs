//! # Context Setup
//!
//! [`initialize`] turns command-line overrides and saved configuration into a
//! ready [`DrafthubContext`]: a [`DraftsApi`] over the JSON file backend and the
//! GitHub client.
//!
//! ## Data Directory Resolution
//!
//! 1. `data_override` (the CLI's `--data`), used as-is.
//! 2. `DRAFTHUB_DATA` environment variable, mainly for isolating tests.
//! 3. The OS data directory for `drafthub` (via the `directories` crate).
//!
//! The drafts document is `<data dir>/drafts.json`; the directory is created on
//! first write.
//!
//! ## Config File Resolution
//!
//! `config_override` (the CLI's `--config`) or
//! [`default_config_path`](crate::config::default_config_path). A missing file is
//! not an error; defaults and environment variables still apply.

use crate::api::DraftsApi;
use crate::config::{default_config_path, DrafthubConfig};
use crate::error::Result;
use crate::publish::PublishCoordinator;
use crate::remote::github::GithubClient;
use crate::store::fs_backend::FsBackend;
use crate::store::DraftStore;
use directories::ProjectDirs;
use std::path::PathBuf;
use tracing::debug;

pub const DATA_ENV: &str = "DRAFTHUB_DATA";

pub struct DrafthubContext {
    pub api: DraftsApi<FsBackend, GithubClient>,
    pub config: DrafthubConfig,
    pub config_path: PathBuf,
    pub data_dir: PathBuf,
}

/// Where drafts live when nothing overrides it.
pub fn default_data_dir() -> PathBuf {
    std::env::var_os(DATA_ENV)
        .map(PathBuf::from)
        .or_else(|| ProjectDirs::from("", "", "drafthub").map(|d| d.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(".drafthub"))
}

pub fn initialize(
    data_override: Option<PathBuf>,
    config_override: Option<PathBuf>,
) -> Result<DrafthubContext> {
    let data_dir = data_override.unwrap_or_else(default_data_dir);
    let config_path = config_override.unwrap_or_else(default_config_path);
    let config = DrafthubConfig::load(&config_path)?;
    debug!(data_dir = %data_dir.display(), config = %config_path.display(), "initializing");

    let store = DraftStore::with_backend(FsBackend::in_dir(&data_dir));
    let client = GithubClient::new(&config.api_url, config.request_timeout())?;
    let publisher = PublishCoordinator::new(client, config.publish_target());

    Ok(DrafthubContext {
        api: DraftsApi::new(store, publisher),
        config,
        config_path,
        data_dir,
    })
}
