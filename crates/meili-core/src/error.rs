//! Error types and handling for meili-core operations.
//!
//! Every fallible function in this crate returns [`Result<T>`], backed by the
//! [`Error`] enum below. Errors fall into a handful of groups:
//!
//! - **Configuration**: missing server URL or master key, unreadable config files
//! - **Input validation**: payloads that are not JSON, unsupported document files
//! - **Server errors**: structured error bodies returned by Meilisearch
//! - **Transport**: connection failures, timeouts, undecodable responses
//! - **Docs tree**: sitemap parsing and tree construction
//!
//! Server errors keep the machine-readable `code` sent by Meilisearch so the
//! CLI can branch on well-known failures without string matching:
//!
//! ```rust
//! use meili_core::Error;
//!
//! let err = Error::Api {
//!     status: 404,
//!     code: Some("index_not_found".into()),
//!     message: "Index `movies` not found.".into(),
//!     link: None,
//! };
//! assert!(err.is_index_not_found());
//! assert_eq!(err.category(), "api");
//! ```

use thiserror::Error;

/// Meilisearch error code for a missing index.
pub const INDEX_NOT_FOUND: &str = "index_not_found";
/// Meilisearch error code for an index uid that is already taken.
pub const INDEX_ALREADY_EXISTS: &str = "index_already_exists";
/// Meilisearch error code for changing a primary key that is already set.
pub const PRIMARY_KEY_ALREADY_PRESENT: &str = "index_primary_key_already_exists";

/// The main error type for meili-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading document files and configuration files.
    #[error("IO error")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// The underlying `reqwest::Error` is preserved so connection and
    /// timeout failures can be told apart. Its message is part of the error
    /// chain, not of this variant's own message.
    #[error("Network error")]
    Network(#[from] reqwest::Error),

    /// The server URL and/or master key could not be resolved.
    ///
    /// Raised before any request is sent. The flags record which of the two
    /// values is missing so the message names only those.
    #[error("{}", missing_connection_message(*url, *master_key))]
    MissingConnection {
        /// `true` when no server URL was found.
        url: bool,
        /// `true` when no master key was found.
        master_key: bool,
    },

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A user-supplied payload could not be parsed as JSON.
    #[error("Unable to parse {input} as JSON")]
    InvalidJson {
        /// The offending input, as given on the command line.
        input: String,
    },

    /// A document file has an extension the server cannot ingest.
    #[error(
        "File type not supported for {path}. Accepted file types are .json, .csv, and .ndjson"
    )]
    UnsupportedFileType {
        /// Path of the rejected file.
        path: String,
    },

    /// The server answered with an error body.
    ///
    /// `code` carries Meilisearch's machine readable error code
    /// (`index_not_found`, `invalid_api_key`, ...).
    #[error("{message}{}", code.as_deref().map(|c| format!(" ({c})")).unwrap_or_default())]
    Api {
        /// HTTP status code.
        status: u16,
        /// Meilisearch error code, when the body could be decoded.
        code: Option<String>,
        /// Human readable message from the server.
        message: String,
        /// Documentation link sent by the server.
        link: Option<String>,
    },

    /// Operation timed out.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Content could not be parsed (sitemaps, server responses).
    #[error("Parse error: {0}")]
    Parse(String),

    /// The documentation tree could not be built.
    #[error("Error building tree: {0}")]
    TreeBuild(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

fn missing_connection_message(url: bool, master_key: bool) -> String {
    match (url, master_key) {
        (true, true) => "No values were provided for MEILI_HTTP_ADDR or MEILI_MASTER_KEY. \
             Pass --url and --master-key or set the environment variables"
            .to_string(),
        (true, false) => "No value was provided for MEILI_HTTP_ADDR. \
             Pass --url or set the environment variable"
            .to_string(),
        (false, true) => "No value was provided for MEILI_MASTER_KEY. \
             Pass --master-key or set the environment variable"
            .to_string(),
        (false, false) => "Connection settings are incomplete".to_string(),
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// The Meilisearch error code, if this is a server error.
    #[must_use]
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// `true` when the server reported that the index does not exist.
    #[must_use]
    pub fn is_index_not_found(&self) -> bool {
        self.api_code() == Some(INDEX_NOT_FOUND)
    }

    /// `true` when the server reported that the index uid is taken.
    #[must_use]
    pub fn is_index_already_exists(&self) -> bool {
        self.api_code() == Some(INDEX_ALREADY_EXISTS)
    }

    /// `true` when the server refused to change an existing primary key.
    #[must_use]
    pub fn is_primary_key_already_set(&self) -> bool {
        self.api_code() == Some(PRIMARY_KEY_ALREADY_PRESENT)
    }

    /// Get the error category as a string identifier.
    ///
    /// Useful for structured logging.
    ///
    /// - `"io"`, `"network"`, `"config"`, `"input"`, `"api"`, `"timeout"`,
    ///   `"parse"`, `"tree"`, `"serialization"`
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::MissingConnection { .. } | Self::Config(_) => "config",
            Self::InvalidJson { .. } | Self::UnsupportedFileType { .. } => "input",
            Self::Api { .. } => "api",
            Self::Timeout(_) => "timeout",
            Self::Parse(_) => "parse",
            Self::TreeBuild(_) => "tree",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Convenience type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
