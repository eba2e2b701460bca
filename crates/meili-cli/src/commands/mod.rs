//! Command implementations for the meilisearch CLI
//!
//! One module per area of the API. Every command receives the shared
//! [`Context`](crate::context::Context) and prints through its output sink.

pub mod docs;
pub mod documents;
pub mod dump;
pub mod index;
pub mod keys;
pub mod search;
pub mod server;
pub mod tasks;
