//! Shared argument groups.
//!
//! These are flattened into the commands that need them so every command
//! spells the common flags the same way.

use clap::Args;
use meili_core::config::{CONFIG_ENV, MASTER_KEY_ENV, URL_ENV};
use std::path::PathBuf;
use std::time::Duration;

/// Server connection flags, accepted before or after the sub-command.
#[derive(Args, Clone, Debug, Default)]
pub struct ConnectionArgs {
    /// The url to the Meilisearch instance
    #[arg(long, global = true, value_name = "URL", env = URL_ENV)]
    pub url: Option<String>,

    /// The master key for the Meilisearch instance
    #[arg(
        long = "master-key",
        global = true,
        value_name = "KEY",
        env = MASTER_KEY_ENV,
        hide_env_values = true
    )]
    pub master_key: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true, value_name = "FILE", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

/// Flags of commands that enqueue a task.
#[derive(Args, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WaitArgs {
    /// Wait for Meilisearch to finish processing and show the result instead
    /// of the enqueued task
    #[arg(short = 'w', long)]
    pub wait: bool,

    /// Give up waiting after this many seconds
    #[arg(long = "wait-timeout", value_name = "SECS", requires = "wait")]
    pub wait_timeout: Option<u64>,
}

impl WaitArgs {
    /// Timeout given on the command line, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.wait_timeout.map(Duration::from_secs)
    }
}

/// Flags shared by document write commands.
#[derive(Args, Clone, Debug, Default)]
pub struct DocumentWriteArgs {
    /// The primary key for the documents. Ignored if the index already has one
    #[arg(long = "primary-key", value_name = "FIELD")]
    pub primary_key: Option<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}
