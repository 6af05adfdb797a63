//! # CLI Behavior
//!
//! This is one UI client for drafthub. It is the only place that knows about
//! terminal I/O, exit codes, and output formatting.
//!
//! ## Naked Execution
//!
//! Running `drafthub` with no arguments is `drafthub list`.
//!
//! ## Revalidate After Mutations
//!
//! `add`, `edit`, `delete` and `publish` print their own messages and then the
//! current draft list, read back from the store. What you see is what is
//! persisted, not what the command believes it wrote.
//!
//! ## Credentials
//!
//! `publish` takes owner, repository and token from flags first, then from the
//! environment (`DRAFTHUB_OWNER`, `DRAFTHUB_REPO`, `GITHUB_TOKEN`), then from the
//! config file. Nothing is sent unless all three are present.
//!
//! ## Module Structure
//!
//! - `commands`: per-command handlers that call the API and print
//! - `logging`: tracing subscriber setup
//! - `render`: draft list, messages and Markdown for the terminal
//! - `setup`: argument parsing via clap
//! - `styles`: terminal styles

mod commands;
mod logging;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
