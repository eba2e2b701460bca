#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);

#[allow(dead_code)]
pub const MASTER_KEY: &str = "masterKey";

fn home_dir() -> &'static Path {
    static HOME_DIR: OnceLock<TempDir> = OnceLock::new();
    HOME_DIR
        .get_or_init(|| tempfile::tempdir().expect("failed to create home dir for tests"))
        .path()
}

/// Create a `meilisearch-cli` command isolated from the developer's
/// environment: no connection variables and an empty config location.
#[allow(dead_code)]
pub fn meili_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("meilisearch-cli"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("MEILI_HTTP_ADDR");
    cmd.env_remove("MEILI_MASTER_KEY");
    cmd.env_remove("MEILI_CLI_CONFIG");
    let home = home_dir();
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// A command pointed at `url` with the test master key.
#[allow(dead_code)]
pub fn meili_cmd_for(url: &str) -> Command {
    let mut cmd = meili_cmd();
    cmd.env("MEILI_HTTP_ADDR", url);
    cmd.env("MEILI_MASTER_KEY", MASTER_KEY);
    cmd
}
