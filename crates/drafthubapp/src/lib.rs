//! # Drafthub Architecture
//!
//! Drafthub keeps short text drafts locally and publishes them in bulk as
//! Markdown files committed through the GitHub Contents API. This crate is the
//! UI-agnostic core; the `drafthub` binary is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (drafthub crate)                                       │
//! │  - Parses arguments, renders CmdResult, owns exit codes     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - DraftsApi: one method per user operation                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - Business logic, returns CmdResult, no I/O assumptions    │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                               │
//!                 ▼                               ▼
//! ┌───────────────────────────────┐ ┌───────────────────────────┐
//! │  store/ + publish.rs          │ │  remote/                  │
//! │  DraftStore over BackingStore │ │  ContentApi, GithubClient │
//! │  PublishCoordinator           │ │                           │
//! └───────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! add / edit / delete → `DraftStore` rewrites the whole collection → the UI
//! lists it again → `publish` hands the snapshot to `PublishCoordinator`, which
//! writes one file per draft, in order, and clears the store only if every
//! write succeeded.
//!
//! ## No I/O Assumptions in Core
//!
//! Nothing in this crate prints or exits. Diagnostics go through `tracing`;
//! the subscriber is the binary's business.
//!
//! ## Module Overview
//!
//! - [`api`]: facade used by clients
//! - [`commands`]: one module per operation
//! - [`config`]: settings file, environment and defaults
//! - [`error`]: error type
//! - [`init`]: builds a ready-to-use context
//! - [`model`]: `Draft`, ids, credentials
//! - [`publish`]: bulk publish pipeline
//! - [`remote`]: Contents API seam and GitHub client
//! - [`sanitize`]: markup stripping
//! - [`store`]: draft persistence

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod publish;
pub mod remote;
pub mod sanitize;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
