//! # meili-core
//!
//! Core functionality for meilisearch-cli, a command-line client for a
//! remote Meilisearch server.
//!
//! All searching, indexing and ranking happens on the server. This crate
//! holds the client-side pieces:
//!
//! - **Configuration**: resolving the server URL and master key
//! - **Client**: a thin wrapper over the REST API with error decoding
//! - **Tasks**: polling asynchronous write tasks until they finish
//! - **Docs**: turning the documentation sitemap into a navigable tree
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meili_core::{ConnectionConfig, FileConfig, MeiliClient, WaitOptions, wait_for_task};
//!
//! # async fn example() -> meili_core::Result<()> {
//! let file = FileConfig::load(None)?;
//! let connection = ConnectionConfig::resolve(
//!     Some("http://localhost:7700"),
//!     Some("masterKey"),
//!     &file,
//! )?;
//! let client = MeiliClient::new(&connection)?;
//!
//! let task = client.create_index("movies", Some("id")).await?;
//! let outcome = wait_for_task(&client, task.task_uid, WaitOptions::default()).await?;
//! println!("{}", outcome.task().status);
//! # Ok(())
//! # }
//! ```

/// HTTP client for the Meilisearch REST API
pub mod client;
/// Connection settings and configuration file
pub mod config;
/// Documentation tree builder
pub mod docs;
/// Error types and result aliases
pub mod error;
/// Document file reading
pub mod files;
/// Sitemap fetching and parsing
pub mod sitemap;
/// Task polling
pub mod tasks;
/// Wire types
pub mod types;

pub use client::MeiliClient;
pub use config::{ConnectionConfig, FileConfig};
pub use docs::{DocNode, build_tree};
pub use error::{Error, Result};
pub use files::{DocumentFile, FileEncoding, read_document_file};
pub use tasks::{TaskOutcome, WaitOptions, wait_for_task, wait_for_tasks};
pub use types::*;
