//! # Configuration
//!
//! drafthub configuration is a [`confique`] struct loaded in layers:
//!
//! 1. **Environment variables**: `DRAFTHUB_OWNER`, `DRAFTHUB_REPO`, `GITHUB_TOKEN`, ...
//! 2. **Config file**: `drafthub.toml` in the OS config directory (via the
//!    `directories` crate), or the file passed with `--config`.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! Command-line flags sit above all of these; the CLI applies them after loading.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `owner` | (none) | Account or organization that owns the target repository |
//! | `repo` | (none) | Target repository name |
//! | `token` | (none) | GitHub token with contents write access |
//! | `base_dir` | `contents` | Directory published files are placed in |
//! | `branch` | `main` | Branch commits are made on |
//! | `api_url` | `https://api.github.com` | API root (GitHub Enterprise: `https://host/api/v3`) |
//! | `request_timeout_secs` | `30` | Per-request HTTP timeout |
//! | `source_owner` | `owner` | Owner of the repository `drafthub show` reads from |
//! | `source_repo` | `repo` | Repository `drafthub show` reads from |
//! | `source_path` | `README.md` | File `drafthub show` renders |
//!
//! ## Saved Configuration
//!
//! `drafthub config set/unset` edit the TOML file directly, touching only the
//! key given, so values that came from defaults are never frozen into the file.

use crate::error::{DrafthubError, Result};
use crate::model::PublishCredentials;
use crate::publish::PublishTarget;
use crate::remote::FileSource;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "drafthub.toml";

/// Every key `config get/set/unset` accepts, in display order.
pub const KEYS: &[&str] = &[
    "owner",
    "repo",
    "token",
    "base_dir",
    "branch",
    "api_url",
    "request_timeout_secs",
    "source_owner",
    "source_repo",
    "source_path",
];

/// Configuration for drafthub, stored in `drafthub.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DrafthubConfig {
    /// Account or organization owning the publish repository.
    #[config(env = "DRAFTHUB_OWNER")]
    pub owner: Option<String>,

    /// Repository drafts are published to.
    #[config(env = "DRAFTHUB_REPO")]
    pub repo: Option<String>,

    /// GitHub token used for writes.
    #[config(env = "GITHUB_TOKEN")]
    pub token: Option<String>,

    /// Directory inside the repository that receives the Markdown files.
    #[config(default = "contents", env = "DRAFTHUB_BASE_DIR")]
    pub base_dir: String,

    /// Branch the commits go to.
    #[config(default = "main", env = "DRAFTHUB_BRANCH")]
    pub branch: String,

    /// GitHub API root.
    #[config(default = "https://api.github.com", env = "DRAFTHUB_API_URL")]
    pub api_url: String,

    /// Timeout for each HTTP request, in seconds.
    #[config(default = 30, env = "DRAFTHUB_TIMEOUT_SECS")]
    pub request_timeout_secs: u64,

    /// Owner of the repository `show` reads from. Falls back to `owner`.
    #[config(env = "DRAFTHUB_SOURCE_OWNER")]
    pub source_owner: Option<String>,

    /// Repository `show` reads from. Falls back to `repo`.
    #[config(env = "DRAFTHUB_SOURCE_REPO")]
    pub source_repo: Option<String>,

    /// File `show` renders.
    #[config(default = "README.md", env = "DRAFTHUB_SOURCE_PATH")]
    pub source_path: String,
}

impl DrafthubConfig {
    /// Load from environment, then `file` (if it exists), then defaults.
    pub fn load(file: &Path) -> Result<Self> {
        Self::builder()
            .env()
            .file(file)
            .load()
            .map_err(|e| DrafthubError::Config(e.to_string()))
    }

    /// The compiled defaults alone, ignoring the environment and any file.
    pub fn defaults() -> Result<Self> {
        Self::builder()
            .load()
            .map_err(|e| DrafthubError::Config(e.to_string()))
    }

    /// Credentials from saved settings; empty strings where nothing is set.
    pub fn credentials(&self) -> PublishCredentials {
        PublishCredentials::new(
            self.owner.clone().unwrap_or_default(),
            self.repo.clone().unwrap_or_default(),
            self.token.clone().unwrap_or_default(),
        )
    }

    pub fn publish_target(&self) -> PublishTarget {
        PublishTarget {
            base_dir: self.base_dir.clone(),
            branch: self.branch.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    /// The file `show` renders, falling back to the publish repository.
    pub fn markdown_source(&self) -> Option<FileSource> {
        let owner = self.source_owner.clone().or_else(|| self.owner.clone())?;
        let repo = self.source_repo.clone().or_else(|| self.repo.clone())?;
        Some(FileSource {
            owner,
            repo,
            path: self.source_path.clone(),
        })
    }

    /// Value of `key` for display. The token is masked.
    pub fn display_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "owner" => self.owner.clone(),
            "repo" => self.repo.clone(),
            "token" => self.token.as_ref().map(|t| mask_token(t)),
            "base_dir" => Some(self.base_dir.clone()),
            "branch" => Some(self.branch.clone()),
            "api_url" => Some(self.api_url.clone()),
            "request_timeout_secs" => Some(self.request_timeout_secs.to_string()),
            "source_owner" => self.source_owner.clone(),
            "source_repo" => self.source_repo.clone(),
            "source_path" => Some(self.source_path.clone()),
            other => return Err(unknown_key(other)),
        };
        Ok(value.unwrap_or_else(|| "(unset)".to_string()))
    }
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "drafthub")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME))
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

fn unknown_key(key: &str) -> DrafthubError {
    DrafthubError::Config(format!(
        "unknown key '{}' (expected one of: {})",
        key,
        KEYS.join(", ")
    ))
}

fn read_table(file: &Path) -> Result<toml::Table> {
    if !file.exists() {
        return Ok(toml::Table::new());
    }
    let content = fs::read_to_string(file)?;
    content
        .parse::<toml::Table>()
        .map_err(|e| DrafthubError::Config(format!("{}: {}", file.display(), e)))
}

fn write_table(file: &Path, table: &toml::Table) -> Result<()> {
    if let Some(dir) = file.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let content =
        toml::to_string_pretty(table).map_err(|e| DrafthubError::Config(e.to_string()))?;
    fs::write(file, content)?;
    Ok(())
}

/// Persist `key = value` in `file`, keeping every other entry.
pub fn set_value(file: &Path, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    let value = if key == "request_timeout_secs" {
        let secs: i64 = value.parse().map_err(|_| {
            DrafthubError::Config(format!("request_timeout_secs must be a number, got '{}'", value))
        })?;
        if secs <= 0 {
            return Err(DrafthubError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        toml::Value::Integer(secs)
    } else {
        toml::Value::String(value.to_string())
    };

    let mut table = read_table(file)?;
    table.insert(key.to_string(), value);
    write_table(file, &table)
}

/// Remove `key` from `file`. Returns whether it was present.
pub fn unset_value(file: &Path, key: &str) -> Result<bool> {
    if !KEYS.contains(&key) {
        return Err(unknown_key(key));
    }
    let mut table = read_table(file)?;
    let removed = table.remove(key).is_some();
    if removed {
        write_table(file, &table)?;
    }
    Ok(removed)
}
