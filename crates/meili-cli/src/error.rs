//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so that scripts can branch on the exit status:
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected server or client error |
//! | 2 | `Usage` | Missing connection settings, invalid input, conflicting index state |
//! | 3 | `NotFound` | Index, document, task or key not found |
//! | 5 | `Network` | The server could not be reached |
//! | 6 | `Timeout` | A request or `--wait-timeout` elapsed |
//! | 8 | `TaskFailed` | A waited-for task finished with status `failed` |
//!
//! ```bash
//! meilisearch-cli index delete movies --wait
//! case $? in
//!     0) echo "deleted" ;;
//!     3) echo "no such index" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use anyhow::anyhow;
use meili_core::Error as CoreError;
use meili_core::Task;
use meili_core::error::{INDEX_ALREADY_EXISTS, INDEX_NOT_FOUND, PRIMARY_KEY_ALREADY_PRESENT};
use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments, input or configuration (exit code 2).
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// Network failure (exit code 5).
    Network = 5,

    /// Operation timed out (exit code 6).
    Timeout = 6,

    /// A task the CLI waited for failed on the server (exit code 8).
    TaskFailed = 8,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::TaskFailed => "task failed",
        }
    }

    /// Categorize a core library error.
    #[must_use]
    pub fn from_core(err: &CoreError) -> Self {
        match err {
            CoreError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => Self::NotFound,
            CoreError::Network(e) if e.is_timeout() => Self::Timeout,
            CoreError::Network(_) => Self::Network,
            CoreError::MissingConnection { .. }
            | CoreError::Config(_)
            | CoreError::InvalidJson { .. }
            | CoreError::UnsupportedFileType { .. } => Self::Usage,
            CoreError::Api { .. } if err.is_index_not_found() => Self::NotFound,
            CoreError::Api { .. }
                if err.is_index_already_exists() || err.is_primary_key_already_set() =>
            {
                Self::Usage
            },
            CoreError::Api { status: 404, .. } => Self::NotFound,
            CoreError::Timeout(_) => Self::Timeout,
            CoreError::Io(_)
            | CoreError::Api { .. }
            | CoreError::Parse(_)
            | CoreError::TreeBuild(_)
            | CoreError::Serialization(_) => Self::Internal,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// A CLI error with a semantic category for exit code mapping.
///
/// Wraps an `anyhow::Error` so the full error chain is preserved.
#[derive(Debug)]
pub struct CliError {
    /// The semantic category of this error.
    pub category: ErrorCategory,
    /// The underlying error with full context.
    pub source: anyhow::Error,
}

impl CliError {
    /// Create a new CLI error with explicit category.
    pub fn new(category: ErrorCategory, source: impl Into<anyhow::Error>) -> Self {
        Self {
            category,
            source: source.into(),
        }
    }

    /// Create a usage error.
    pub fn usage(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::Usage, source)
    }

    /// Create a not-found error.
    pub fn not_found(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::NotFound, source)
    }

    /// Create a task-failed error.
    pub fn task_failed(source: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCategory::TaskFailed, source)
    }

    /// Get the exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.category.exit_code()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        // Display already shows the wrapped error, so skip it in the chain.
        AsRef::<dyn std::error::Error + Send + Sync>::as_ref(&self.source).source()
    }
}

/// Reword well-known index errors so they name the index.
///
/// Anything else is passed through unchanged.
pub fn index_error(err: CoreError, index: &str) -> anyhow::Error {
    let reworded = err.api_code().and_then(|code| index_code_error(code, index));
    reworded.map_or_else(|| err.into(), Into::into)
}

/// Error for a task the CLI waited for that ended as `failed`.
///
/// Index errors reported by the task get the same wording as synchronous
/// ones; everything else is a [`ErrorCategory::TaskFailed`].
pub fn task_error(task: &Task) -> anyhow::Error {
    let error = task.error.clone().unwrap_or_default();
    let reworded = error
        .code
        .as_deref()
        .zip(task.index_uid.as_deref())
        .and_then(|(code, index)| index_code_error(code, index));

    reworded.map_or_else(
        || {
            let message = if error.message.is_empty() {
                task.status.to_string()
            } else {
                error.message
            };
            CliError::task_failed(anyhow!("Task {} failed: {message}", task.uid)).into()
        },
        Into::into,
    )
}

fn index_code_error(code: &str, index: &str) -> Option<CliError> {
    match code {
        INDEX_NOT_FOUND => Some(CliError::not_found(anyhow!("Index {index} not found"))),
        INDEX_ALREADY_EXISTS => Some(CliError::usage(anyhow!("Index {index} already exists"))),
        PRIMARY_KEY_ALREADY_PRESENT => Some(CliError::usage(anyhow!(
            "Index {index} already has a primary key"
        ))),
        _ => None,
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// A [`CliError`] carries its own category; core errors are categorized by
/// kind. Anything else is internal.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(cli_err) = err.downcast_ref::<CliError>() {
        return cli_err.exit_code();
    }
    if let Some(core_err) = err.downcast_ref::<CoreError>() {
        return ErrorCategory::from_core(core_err).exit_code();
    }
    ErrorCategory::Internal.exit_code()
}
