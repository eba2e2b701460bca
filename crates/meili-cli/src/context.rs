//! State shared by every command: where to print and how to connect.

use anyhow::Result;
use meili_core::{
    ConnectionConfig, FileConfig, MeiliClient, Task, TaskInfo, TaskOutcome, WaitOptions,
    wait_for_task,
};
use serde_json::Value;
use tracing::debug;

use crate::args::{ConnectionArgs, WaitArgs};
use crate::cli::Cli;
use crate::error::task_error;
use crate::output::Output;

/// Title of the panel showing a task that ended as `failed`.
const FAILED_TASK_TITLE: &str = "Task Failed";

/// Per-invocation state handed to every command.
pub struct Context {
    /// Where results are printed.
    pub output: Output,
    connection: ConnectionArgs,
    file: FileConfig,
}

impl Context {
    /// Load the configuration file and set up stdout output.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = FileConfig::load(cli.connection.config.as_deref())?;
        Ok(Self::new(Output::stdout(cli.raw), cli.connection.clone(), file))
    }

    /// Build a context from already loaded parts.
    pub fn new(output: Output, connection: ConnectionArgs, file: FileConfig) -> Self {
        Self {
            output,
            connection,
            file,
        }
    }

    /// Client for endpoints that require the master key.
    pub fn client(&self) -> Result<MeiliClient> {
        let config = ConnectionConfig::resolve(
            self.connection.url.as_deref(),
            self.connection.master_key.as_deref(),
            &self.file,
        )?;
        Ok(MeiliClient::new(&config)?)
    }

    /// Client that only needs a URL, for endpoints open to everyone.
    pub fn public_client(&self) -> Result<MeiliClient> {
        let config = ConnectionConfig::resolve_url_only(
            self.connection.url.as_deref(),
            self.connection.master_key.as_deref(),
            &self.file,
        )?;
        Ok(MeiliClient::new(&config)?)
    }

    /// Polling settings: the flag's timeout wins over the configured one.
    pub fn wait_options(&self, wait: &WaitArgs) -> WaitOptions {
        WaitOptions {
            interval: self.file.poll_interval(),
            timeout: wait.timeout().or_else(|| self.file.wait_timeout()),
        }
    }

    /// Follow up on an enqueued task.
    ///
    /// Without `--wait` the task summary is printed under `title` and
    /// `None` is returned. With `--wait` the task is polled: the final record
    /// means it succeeded and the caller should print the resulting state,
    /// while a failed task is printed and turned into an error.
    pub async fn settle(
        &mut self,
        client: &MeiliClient,
        task: &TaskInfo,
        wait: &WaitArgs,
        title: &str,
    ) -> Result<Option<Task>> {
        if !wait.wait {
            self.output.value(title, &serde_json::to_value(task)?)?;
            return Ok(None);
        }

        let options = self.wait_options(wait);
        let outcome = self
            .output
            .spin(
                "Waiting for the task to finish",
                wait_for_task(client, task.task_uid, options),
            )
            .await?;
        self.check_outcome(&outcome)?;
        Ok(Some(outcome.task().clone()))
    }

    /// Print a failed task record and return the matching error.
    pub fn check_outcome(&mut self, outcome: &TaskOutcome) -> Result<()> {
        match outcome {
            TaskOutcome::Succeeded(task) => {
                debug!(task_uid = task.uid, status = %task.status, "Task settled");
                Ok(())
            },
            TaskOutcome::Failed(task) => {
                self.output.value(FAILED_TASK_TITLE, &task.raw)?;
                Err(task_error(task))
            },
        }
    }

    /// Print `value` under `title`.
    pub fn print(&mut self, title: &str, value: &Value) -> Result<()> {
        self.output.value(title, value)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn context(file: FileConfig, connection: ConnectionArgs) -> Context {
        Context::new(
            Output::new(Box::new(std::io::sink()), true),
            connection,
            file,
        )
    }

    #[test]
    fn test_wait_options_precedence() {
        let file = FileConfig {
            poll_interval_ms: Some(10),
            wait_timeout_secs: Some(30),
            ..FileConfig::default()
        };
        let ctx = context(file, ConnectionArgs::default());

        let flag = WaitArgs {
            wait: true,
            wait_timeout: Some(5),
        };
        let options = ctx.wait_options(&flag);
        assert_eq!(options.interval, Duration::from_millis(10));
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));

        let no_flag = WaitArgs {
            wait: true,
            wait_timeout: None,
        };
        assert_eq!(
            ctx.wait_options(&no_flag).timeout,
            Some(Duration::from_secs(30))
        );
    }

    #[test]
    fn test_wait_options_defaults() {
        let ctx = context(FileConfig::default(), ConnectionArgs::default());
        let options = ctx.wait_options(&WaitArgs::default());
        assert_eq!(options, WaitOptions::default());
    }

    #[test]
    fn test_client_requires_key_but_public_client_does_not() {
        let connection = ConnectionArgs {
            url: Some("http://localhost:7700".to_string()),
            master_key: None,
            config: None,
        };
        let ctx = context(FileConfig::default(), connection);

        let err = ctx.client().err().unwrap();
        assert!(err.to_string().contains("MEILI_MASTER_KEY"));
        assert!(!err.to_string().contains("MEILI_HTTP_ADDR"));
        assert!(ctx.public_client().is_ok());
    }

    #[test]
    fn test_file_config_fills_connection() {
        let file = FileConfig {
            url: Some("http://localhost:7700".to_string()),
            master_key: Some("masterKey".to_string()),
            ..FileConfig::default()
        };
        let ctx = context(file, ConnectionArgs::default());
        assert_eq!(
            ctx.client().unwrap().base_url().as_str(),
            "http://localhost:7700/"
        );
    }
}
