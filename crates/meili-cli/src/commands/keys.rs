//! API key management.

use anyhow::{Result, anyhow};
use meili_core::{KeyRequest, KeyUpdate};

use crate::cli::CreateKeyArgs;
use crate::context::Context;
use crate::error::CliError;

pub async fn list(ctx: &mut Context) -> Result<()> {
    let client = ctx.client()?;
    let keys = ctx.output.spin("Fetching keys", client.get_keys()).await?;
    ctx.print("Keys", &keys)
}

pub async fn get(ctx: &mut Context, key: &str) -> Result<()> {
    let client = ctx.client()?;
    let found = ctx.output.spin("Fetching key", client.get_key(key)).await?;
    ctx.print("Key", &found)
}

pub async fn create(ctx: &mut Context, args: CreateKeyArgs) -> Result<()> {
    let client = ctx.client()?;
    let request = KeyRequest {
        name: args.name,
        description: args.description,
        actions: args.actions,
        indexes: args.indexes,
        expires_at: args.expires_at,
    };
    let created = ctx
        .output
        .spin("Creating key", client.create_key(&request))
        .await?;
    ctx.print("Create Key", &created)
}

pub async fn update(
    ctx: &mut Context,
    key: &str,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    if name.is_none() && description.is_none() {
        return Err(CliError::usage(anyhow!(
            "Nothing to update. Pass --name and/or --description"
        ))
        .into());
    }
    let client = ctx.client()?;
    let update = KeyUpdate { name, description };
    let updated = ctx
        .output
        .spin("Updating key", client.update_key(key, &update))
        .await?;
    ctx.print("Update Key", &updated)
}

pub async fn delete(ctx: &mut Context, key: &str) -> Result<()> {
    let client = ctx.client()?;
    ctx.output
        .spin("Deleting key", client.delete_key(key))
        .await?;
    ctx.output
        .message("Delete Key", &format!("Key {key} successfully deleted"))
}
