//! Document commands.
//!
//! Add replaces documents that share an id, update merges the given fields
//! into them. With `--wait` the documents of the index are read back once
//! the task has finished.

use anyhow::Result;
use meili_core::{MeiliClient, TaskInfo, parse_documents, read_document_file, wait_for_tasks};

use crate::args::WaitArgs;
use crate::cli::{BatchDocumentsArgs, DocumentCommands, FileDocumentsArgs, JsonDocumentsArgs};
use crate::context::Context;
use crate::error::index_error;

/// Which write endpoint to use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum WriteKind {
    Add,
    Update,
}

impl WriteKind {
    const fn replace(self) -> bool {
        matches!(self, Self::Add)
    }

    const fn title(self) -> &'static str {
        match self {
            Self::Add => "Add Documents Result",
            Self::Update => "Update Documents",
        }
    }

    const fn progress(self) -> &'static str {
        match self {
            Self::Add => "Adding documents",
            Self::Update => "Updating documents",
        }
    }
}

/// Run a `documents` sub-command.
pub async fn execute(ctx: &mut Context, command: DocumentCommands) -> Result<()> {
    let client = ctx.client()?;
    let client = &client;

    match command {
        DocumentCommands::Add(args) => from_json(ctx, client, args, WriteKind::Add).await,
        DocumentCommands::AddFromFile(args) => from_file(ctx, client, args, WriteKind::Add).await,
        DocumentCommands::AddInBatches(args) => in_batches(ctx, client, args, WriteKind::Add).await,
        DocumentCommands::Update(args) => from_json(ctx, client, args, WriteKind::Update).await,
        DocumentCommands::UpdateFromFile(args) => {
            from_file(ctx, client, args, WriteKind::Update).await
        },
        DocumentCommands::UpdateInBatches(args) => {
            in_batches(ctx, client, args, WriteKind::Update).await
        },
        DocumentCommands::Delete {
            index,
            document_id,
            wait,
        } => {
            let task = ctx
                .output
                .spin("Deleting document", client.delete_document(&index, &document_id))
                .await
                .map_err(|e| index_error(e, &index))?;
            settle(ctx, client, &index, &task, &wait, "Delete Document Result").await
        },
        DocumentCommands::DeleteMultiple {
            index,
            document_ids,
            wait,
        } => {
            let task = ctx
                .output
                .spin("Deleting documents", client.delete_documents(&index, &document_ids))
                .await
                .map_err(|e| index_error(e, &index))?;
            settle(ctx, client, &index, &task, &wait, "Delete Documents Result").await
        },
        DocumentCommands::DeleteAll(args) => {
            let index = args.index.as_str();
            let task = ctx
                .output
                .spin("Deleting documents", client.delete_all_documents(index))
                .await
                .map_err(|e| index_error(e, index))?;
            settle(ctx, client, index, &task, &args.wait, "Delete Documents Result").await
        },
        DocumentCommands::Get { index, document_id } => {
            let document = ctx
                .output
                .spin("Fetching document", client.get_document(&index, &document_id))
                .await
                .map_err(|e| index_error(e, &index))?;
            ctx.print("Document", &document)
        },
        DocumentCommands::GetAll {
            index,
            offset,
            limit,
        } => print_documents(ctx, client, &index, offset, limit).await,
    }
}

async fn from_json(
    ctx: &mut Context,
    client: &MeiliClient,
    args: JsonDocumentsArgs,
    write: WriteKind,
) -> Result<()> {
    let documents = parse_documents(&args.documents)?;
    let index = args.index.as_str();
    let primary_key = args.write.primary_key.as_deref();

    let request = async {
        match write {
            WriteKind::Add => client.add_documents(index, &documents, primary_key).await,
            WriteKind::Update => client.update_documents(index, &documents, primary_key).await,
        }
    };
    let task = ctx
        .output
        .spin(write.progress(), request)
        .await
        .map_err(|e| index_error(e, index))?;
    settle(ctx, client, index, &task, &args.write.wait, write.title()).await
}

async fn from_file(
    ctx: &mut Context,
    client: &MeiliClient,
    args: FileDocumentsArgs,
    write: WriteKind,
) -> Result<()> {
    let file = read_document_file(&args.path, args.encoding)?;
    let index = args.index.as_str();

    let task = ctx
        .output
        .spin(
            write.progress(),
            client.upload_documents(
                index,
                file.body,
                file.format,
                args.write.primary_key.as_deref(),
                write.replace(),
            ),
        )
        .await
        .map_err(|e| index_error(e, index))?;
    settle(ctx, client, index, &task, &args.write.wait, write.title()).await
}

async fn in_batches(
    ctx: &mut Context,
    client: &MeiliClient,
    args: BatchDocumentsArgs,
    write: WriteKind,
) -> Result<()> {
    let documents = parse_documents(&args.documents)?;
    let index = args.index.as_str();
    let batch_size = usize::try_from(args.batch_size).unwrap_or(usize::MAX);

    let tasks = ctx
        .output
        .spin(
            write.progress(),
            client.send_documents_in_batches(
                index,
                &documents,
                batch_size,
                args.write.primary_key.as_deref(),
                write.replace(),
            ),
        )
        .await
        .map_err(|e| index_error(e, index))?;

    let wait = &args.write.wait;
    if !wait.wait {
        return ctx.print(write.title(), &serde_json::to_value(&tasks)?);
    }

    let uids: Vec<_> = tasks.iter().map(|task| task.task_uid).collect();
    let options = ctx.wait_options(wait);
    let outcomes = ctx
        .output
        .spin("Waiting for the batches to finish", wait_for_tasks(client, &uids, options))
        .await?;
    if let Some(last) = outcomes.last() {
        ctx.check_outcome(last)?;
    }
    print_documents(ctx, client, index, None, None).await
}

async fn settle(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    task: &TaskInfo,
    wait: &WaitArgs,
    title: &str,
) -> Result<()> {
    if ctx.settle(client, task, wait, title).await?.is_some() {
        print_documents(ctx, client, index, None, None).await?;
    }
    Ok(())
}

async fn print_documents(
    ctx: &mut Context,
    client: &MeiliClient,
    index: &str,
    offset: Option<usize>,
    limit: Option<usize>,
) -> Result<()> {
    let documents = ctx
        .output
        .spin("Fetching documents", client.get_documents(index, offset, limit))
        .await
        .map_err(|e| index_error(e, index))?;
    ctx.print("Documents", &documents)
}
