//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: shell arguments become [`Commands`] via clap
//! 2. **Context Setup**: data directory, config and API via [`initialize`]
//! 3. **Dispatch**: one `handle_*` function per command
//! 4. **Output Formatting**: `render.rs`
//! 5. **Error Handling**: errors bubble up to `main`, which prints them and exits 1

use super::logging;
use super::render::{
    print_messages, render_banner, render_config, render_draft_list, render_markdown,
};
use super::setup::{Cli, Commands, ConfigCommands, RepoArgs};
use clap::Parser;
use drafthubapp::config::{default_config_path, set_value, unset_value, DrafthubConfig, KEYS};
use drafthubapp::error::{DrafthubError, Result};
use drafthubapp::init::{initialize, DrafthubContext};
use drafthubapp::model::{DraftId, PublishCredentials};
use drafthubapp::remote::FileSource;
use std::path::Path;

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_json);

    let Cli {
        command,
        data,
        config,
        ..
    } = cli;
    let context = || initialize(data.clone(), config.clone());

    match command.unwrap_or(Commands::List) {
        Commands::List => handle_list(&context()?).await,
        Commands::Add { title, body } => handle_add(&context()?, &title, &body).await,
        Commands::Edit { id, title, body } => handle_edit(&context()?, id, &title, &body).await,
        Commands::Delete { id } => handle_delete(&context()?, id).await,
        Commands::Publish { repo, token } => handle_publish(&context()?, repo, token).await,
        Commands::Show { repo, path } => handle_show(&context()?, repo, path).await,
        // Does not build the context, so a broken setting can still be fixed.
        Commands::Config { action } => {
            let path = config.clone().unwrap_or_else(default_config_path);
            handle_config(&path, action)
        }
    }
}

async fn handle_list(ctx: &DrafthubContext) -> Result<()> {
    let result = ctx.api.list_drafts().await?;
    print!("{}", render_draft_list(&result.listed_drafts));
    print_messages(&result.messages);
    Ok(())
}

async fn handle_add(ctx: &DrafthubContext, title: &str, body: &str) -> Result<()> {
    let result = ctx.api.add_draft(title, body).await?;
    print_messages(&result.messages);
    handle_list(ctx).await
}

async fn handle_edit(ctx: &DrafthubContext, id: DraftId, title: &str, body: &str) -> Result<()> {
    let result = ctx.api.update_draft(id, title, body).await?;
    print_messages(&result.messages);
    handle_list(ctx).await
}

async fn handle_delete(ctx: &DrafthubContext, id: DraftId) -> Result<()> {
    let result = ctx.api.delete_draft(id).await?;
    print_messages(&result.messages);
    handle_list(ctx).await
}

async fn handle_publish(
    ctx: &DrafthubContext,
    repo: RepoArgs,
    token: Option<String>,
) -> Result<()> {
    let credentials = publish_credentials(&ctx.config, repo, token);
    let mut result = ctx.api.publish_all(&credentials).await?;
    print_messages(&result.messages);

    let succeeded = ctx.api.take_publish_success();
    if succeeded && !result.published_paths.is_empty() {
        print!(
            "{}",
            render_banner("All drafts published. Draft list cleared.")
        );
    }
    handle_list(ctx).await?;
    result.take_failure()
}

async fn handle_show(ctx: &DrafthubContext, repo: RepoArgs, path: Option<String>) -> Result<()> {
    let source = markdown_source(&ctx.config, repo, path)?;
    let result = ctx
        .api
        .fetch_markdown(&source, ctx.config.token.as_deref())
        .await?;
    if let Some(markdown) = &result.markdown {
        print!("{}", render_markdown(markdown));
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(path: &Path, action: Option<ConfigCommands>) -> Result<()> {
    match action {
        None => {
            let config = DrafthubConfig::load(path)?;
            let mut entries = Vec::with_capacity(KEYS.len());
            for key in KEYS {
                entries.push((*key, config.display_value(key)?));
            }
            print!("{}", render_config(&entries));
            println!("# {}", path.display());
        }
        Some(ConfigCommands::Get { key }) => {
            let config = DrafthubConfig::load(path)?;
            println!("{}", config.display_value(&key)?);
        }
        Some(ConfigCommands::Set { key, value }) => {
            set_value(path, &key, &value)?;
            println!("Set {} in {}", key, path.display());
        }
        Some(ConfigCommands::Unset { key }) => {
            if unset_value(path, &key)? {
                println!("Removed {} from {}", key, path.display());
            } else {
                println!("{} was not set in {}", key, path.display());
            }
        }
    }
    Ok(())
}

/// Flags win over environment and config file.
fn publish_credentials(
    config: &DrafthubConfig,
    repo: RepoArgs,
    token: Option<String>,
) -> PublishCredentials {
    let mut config = config.clone();
    if repo.owner.is_some() {
        config.owner = repo.owner;
    }
    if repo.repo.is_some() {
        config.repo = repo.repo;
    }
    if token.is_some() {
        config.token = token;
    }
    config.credentials()
}

fn markdown_source(
    config: &DrafthubConfig,
    repo: RepoArgs,
    path: Option<String>,
) -> Result<FileSource> {
    let mut config = config.clone();
    if repo.owner.is_some() {
        config.source_owner = repo.owner;
    }
    if repo.repo.is_some() {
        config.source_repo = repo.repo;
    }
    if let Some(path) = path {
        config.source_path = path;
    }
    config.markdown_source().ok_or_else(|| {
        DrafthubError::Config(
            "no repository to read from: pass --owner and --repo, or set source_owner and source_repo"
                .to_string(),
        )
    })
}
