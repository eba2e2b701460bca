//! meilisearch-cli - manage a Meilisearch server from the terminal
//!
//! The binary in `main.rs` only sets up the runtime and maps errors to exit
//! codes; everything else lives here so integration tests can reach it.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

pub mod args;
pub mod cli;
mod commands;
pub mod context;
pub mod error;
pub mod output;
mod utils;

use cli::{Cli, Commands, DumpCommands};
use context::Context;
use utils::initialize_logging;

/// Parse the command line and run the requested command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or the command
/// fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    debug!(command = ?cli.command, "Starting");

    let mut ctx = Context::from_cli(&cli)?;
    execute_command(&mut ctx, cli.command).await
}

async fn execute_command(ctx: &mut Context, command: Commands) -> Result<()> {
    match command {
        Commands::Health => commands::server::health(ctx).await,
        Commands::GetVersion => commands::server::version(ctx).await,
        Commands::GetStats => commands::server::stats(ctx).await,
        Commands::GetKeys => commands::keys::list(ctx).await,
        Commands::GetKey { key } => commands::keys::get(ctx, &key).await,
        Commands::CreateKey(args) => commands::keys::create(ctx, args).await,
        Commands::UpdateKey {
            key,
            name,
            description,
        } => commands::keys::update(ctx, &key, name, description).await,
        Commands::DeleteKey { key } => commands::keys::delete(ctx, &key).await,
        Commands::Search(args) => commands::search::execute(ctx, args).await,
        Commands::GetTask { uid } => commands::tasks::get(ctx, uid).await,
        Commands::GetTasks(args) => commands::tasks::list(ctx, args).await,
        Commands::Docs { sitemap_url, links } => {
            commands::docs::execute(ctx, &sitemap_url, links).await
        },
        Commands::Index(command) => commands::index::execute(ctx, command).await,
        Commands::Documents(command) => commands::documents::execute(ctx, command).await,
        Commands::Dump(DumpCommands::Create { wait }) => commands::dump::create(ctx, &wait).await,
        Commands::Dump(DumpCommands::GetStatus { uid }) => commands::dump::status(ctx, uid).await,
    }
}
