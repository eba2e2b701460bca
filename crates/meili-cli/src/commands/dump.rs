//! Dump commands.

use anyhow::Result;
use meili_core::TaskUid;

use crate::args::WaitArgs;
use crate::context::Context;

/// `POST /dumps`; with `--wait` the finished task is shown.
pub async fn create(ctx: &mut Context, wait: &WaitArgs) -> Result<()> {
    let client = ctx.client()?;
    let task = ctx
        .output
        .spin("Creating dump", client.create_dump())
        .await?;
    if let Some(finished) = ctx.settle(&client, &task, wait, "Dump").await? {
        ctx.print("Dump", &finished.raw)?;
    }
    Ok(())
}

/// Dump creation is an ordinary task, so its status is the task record.
pub async fn status(ctx: &mut Context, uid: TaskUid) -> Result<()> {
    let client = ctx.client()?;
    let task = ctx
        .output
        .spin("Fetching dump status", client.get_task(uid))
        .await?;
    ctx.print("Dump Status", &task.raw)
}
