//! Server-wide commands: health, version and stats.

use anyhow::Result;

use crate::context::Context;

/// `GET /health`. Works without a master key.
pub async fn health(ctx: &mut Context) -> Result<()> {
    let client = ctx.public_client()?;
    let health = ctx.output.spin("Checking health", client.health()).await?;
    ctx.print("Health", &health)
}

pub async fn version(ctx: &mut Context) -> Result<()> {
    let client = ctx.client()?;
    let version = ctx.output.spin("Fetching version", client.version()).await?;
    ctx.print("Version", &version)
}

pub async fn stats(ctx: &mut Context) -> Result<()> {
    let client = ctx.client()?;
    let stats = ctx.output.spin("Fetching stats", client.stats()).await?;
    ctx.print("Stats", &stats)
}
