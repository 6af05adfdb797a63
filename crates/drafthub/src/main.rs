//! # Drafthub CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, and this file
//! only starts the runtime, invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/drafthubapp/`: core library, UI agnostic
//! - `crates/drafthub/`: this CLI, a client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/drafthub/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring and dispatch (commands.rs)                │
//! │  - Terminal rendering (render.rs, styles.rs)                │
//! │  - Log subscriber (logging.rs)                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/drafthubapp/src/api.rs)                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from `api.rs` inward returns plain Rust values. The CLI owns
//! argument parsing, rendering, stdout/stderr and the exit code.
//!
//! ## Testing Approach
//!
//! - Rendering is tested with canned drafts and messages (`render.rs`).
//! - Argument parsing is tested with `Cli::try_parse_from` (`setup.rs`).
//! - `tests/cli_e2e.rs` drives the real binary against a temp data directory.

mod cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
