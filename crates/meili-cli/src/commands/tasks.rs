//! Task inspection.

use anyhow::Result;
use meili_core::{TaskFilter, TaskUid};

use crate::cli::TasksArgs;
use crate::context::Context;

pub async fn get(ctx: &mut Context, uid: TaskUid) -> Result<()> {
    let client = ctx.client()?;
    let task = ctx.output.spin("Fetching task", client.get_task(uid)).await?;
    ctx.print("Task", &task.raw)
}

pub async fn list(ctx: &mut Context, args: TasksArgs) -> Result<()> {
    let client = ctx.client()?;
    let filter = TaskFilter {
        index_uid: args.index,
        statuses: args.status.into_iter().map(Into::into).collect(),
        types: args.types,
        limit: args.limit,
        from: args.from,
    };
    let tasks = ctx
        .output
        .spin("Fetching tasks", client.get_tasks(&filter))
        .await?;
    ctx.print("Tasks", &tasks)
}
