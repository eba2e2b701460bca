//! Documentation tree command.

use anyhow::Result;
use meili_core::build_tree;
use meili_core::docs::is_excluded;
use meili_core::sitemap::fetch_sitemap;
use tracing::debug;

use crate::context::Context;

/// Fetch the docs sitemap and print it as a tree.
///
/// Needs no server connection.
pub async fn execute(ctx: &mut Context, sitemap_url: &str, links: bool) -> Result<()> {
    let mut urls = ctx
        .output
        .spin("Fetching documentation map", fetch_sitemap(sitemap_url))
        .await?;
    urls.retain(|url| !is_excluded(url));
    debug!(pages = urls.len(), "Building documentation tree");

    let root = build_tree(&urls)?;
    ctx.output.tree(&root, links)
}
