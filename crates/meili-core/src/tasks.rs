//! Waiting for asynchronous server tasks.
//!
//! Every write on a Meilisearch server is enqueued and reported back as a
//! [`TaskInfo`](crate::TaskInfo). [`wait_for_task`] polls `GET /tasks/{uid}`
//! at a fixed interval until the task leaves the pending states.
//!
//! The poller only reports; rendering a failed task is left to the caller.

use crate::client::MeiliClient;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::types::{Task, TaskStatus, TaskUid};
use crate::{Error, Result};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

/// How to poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitOptions {
    /// Pause between two status requests.
    pub interval: Duration,
    /// Give up after this long. `None` waits until the task finishes.
    pub timeout: Option<Duration>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            timeout: None,
        }
    }
}

/// Terminal state of a waited-for task.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    /// The task reached a terminal state other than `failed`.
    Succeeded(Task),
    /// The task failed. The record carries the server's error block.
    Failed(Task),
}

impl TaskOutcome {
    /// The final task record.
    pub const fn task(&self) -> &Task {
        match self {
            Self::Succeeded(task) | Self::Failed(task) => task,
        }
    }

    /// `true` for [`TaskOutcome::Failed`].
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Poll a task until it is no longer enqueued or processing.
pub async fn wait_for_task(
    client: &MeiliClient,
    task_uid: TaskUid,
    options: WaitOptions,
) -> Result<TaskOutcome> {
    let deadline = options.timeout.map(|timeout| Instant::now() + timeout);
    let mut polls = 0_u32;

    loop {
        let task = client.get_task(task_uid).await?;
        polls += 1;
        debug!(task_uid, status = %task.status, polls, "Polled task");

        if !task.status.is_pending() {
            info!(task_uid, status = %task.status, "Task finished");
            return Ok(if task.status == TaskStatus::Failed {
                TaskOutcome::Failed(task)
            } else {
                TaskOutcome::Succeeded(task)
            });
        }

        if let Some(deadline) = deadline {
            if Instant::now() + options.interval > deadline {
                return Err(Error::Timeout(format!(
                    "Task {task_uid} did not finish within {:.1}s",
                    options.timeout.unwrap_or_default().as_secs_f64()
                )));
            }
        }

        tokio::time::sleep(options.interval).await;
    }
}

/// Wait for several tasks, one after the other.
///
/// Returns the outcomes in order and stops right after the first failure, so
/// the last element is the failed task when one failed.
pub async fn wait_for_tasks(
    client: &MeiliClient,
    task_uids: &[TaskUid],
    options: WaitOptions,
) -> Result<Vec<TaskOutcome>> {
    let mut outcomes = Vec::with_capacity(task_uids.len());
    for &task_uid in task_uids {
        let outcome = wait_for_task(client, task_uid, options).await?;
        let failed = outcome.is_failed();
        outcomes.push(outcome);
        if failed {
            break;
        }
    }
    Ok(outcomes)
}
