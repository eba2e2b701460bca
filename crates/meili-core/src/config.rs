//! Connection settings and the optional TOML configuration file.
//!
//! The server URL and master key are resolved in this order:
//!
//! 1. Command-line flags (`--url`, `--master-key`)
//! 2. Environment variables (`MEILI_HTTP_ADDR`, `MEILI_MASTER_KEY`)
//! 3. The configuration file
//!
//! Steps 1 and 2 are merged by the CLI parser before values reach this
//! module, so [`ConnectionConfig::resolve`] only has to fall back to the
//! file.
//!
//! ## File Location
//!
//! - `--config <FILE>` or `MEILI_CLI_CONFIG`
//! - otherwise `config.toml` in the platform config directory
//!   (`~/.config/meilisearch-cli/config.toml` on Linux)
//!
//! ```toml
//! url = "http://localhost:7700"
//! master_key = "masterKey"
//! poll_interval_ms = 50
//! wait_timeout_secs = 600
//! request_timeout_secs = 30
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Environment variable holding the server URL.
pub const URL_ENV: &str = "MEILI_HTTP_ADDR";
/// Environment variable holding the master key.
pub const MASTER_KEY_ENV: &str = "MEILI_MASTER_KEY";
/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "MEILI_CLI_CONFIG";

/// Default interval between two task status requests.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Default per-request HTTP timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Contents of the configuration file. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// Server URL used when neither the flag nor the env var is set.
    pub url: Option<String>,
    /// Master key used when neither the flag nor the env var is set.
    pub master_key: Option<String>,
    /// Interval between task status polls, in milliseconds.
    pub poll_interval_ms: Option<u64>,
    /// Upper bound for `--wait`, in seconds. Unset means wait forever.
    pub wait_timeout_secs: Option<u64>,
    /// Per-request HTTP timeout, in seconds.
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load the configuration file.
    ///
    /// `explicit` is the path given with `--config`/`MEILI_CLI_CONFIG`. An
    /// explicit path must exist; the default location may be absent, in
    /// which case an empty configuration is returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and parse a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "Loading configuration file");
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {e}", path.display())))
    }

    /// The platform specific default location of `config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "meilisearch", "meilisearch-cli")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Poll interval, falling back to [`DEFAULT_POLL_INTERVAL`].
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval_ms
            .map_or(DEFAULT_POLL_INTERVAL, Duration::from_millis)
    }

    /// Wait timeout, if one is configured.
    pub fn wait_timeout(&self) -> Option<Duration> {
        self.wait_timeout_secs.map(Duration::from_secs)
    }

    /// Request timeout, falling back to [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs)
    }
}

/// A fully resolved server connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Base URL of the server, without a trailing slash.
    pub url: String,
    /// Key sent as a bearer token. `None` only for endpoints that do not
    /// require authentication.
    pub master_key: Option<String>,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
}

impl ConnectionConfig {
    /// Resolve the URL and master key, requiring both.
    ///
    /// `url` and `master_key` are the values from flags or the environment.
    /// Blank strings count as missing.
    pub fn resolve(
        url: Option<&str>,
        master_key: Option<&str>,
        file: &FileConfig,
    ) -> Result<Self> {
        let url = pick(url, file.url.as_deref());
        let master_key = pick(master_key, file.master_key.as_deref());

        match (url, master_key) {
            (Some(url), Some(master_key)) => Ok(Self::new(url, Some(master_key), file)),
            (url, master_key) => Err(Error::MissingConnection {
                url: url.is_none(),
                master_key: master_key.is_none(),
            }),
        }
    }

    /// Resolve only the URL; the key is attached when available.
    ///
    /// Used by endpoints such as `/health` that are reachable without
    /// credentials.
    pub fn resolve_url_only(
        url: Option<&str>,
        master_key: Option<&str>,
        file: &FileConfig,
    ) -> Result<Self> {
        let master_key = pick(master_key, file.master_key.as_deref());
        pick(url, file.url.as_deref())
            .map(|url| Self::new(url, master_key, file))
            .ok_or(Error::MissingConnection {
                url: true,
                master_key: false,
            })
    }

    fn new(url: String, master_key: Option<String>, file: &FileConfig) -> Self {
        Self {
            url: url.trim_end_matches('/').to_string(),
            master_key,
            request_timeout: file.request_timeout(),
        }
    }
}

fn pick(primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    primary
        .filter(|v| !v.trim().is_empty())
        .or_else(|| fallback.filter(|v| !v.trim().is_empty()))
        .map(str::to_string)
}
