//! Search command.

use anyhow::Result;
use meili_core::SearchQuery;

use crate::cli::SearchArgs;
use crate::context::Context;
use crate::error::index_error;

impl From<SearchArgs> for SearchQuery {
    fn from(args: SearchArgs) -> Self {
        Self {
            q: args.query,
            offset: args.offset,
            limit: args.limit,
            filter: args.filter,
            facets: args.facets,
            attributes_to_retrieve: args.attributes_to_retrieve,
            attributes_to_crop: args.attributes_to_crop,
            crop_length: args.crop_length,
            attributes_to_highlight: args.attributes_to_highlight,
            show_matches_position: args.show_matches_position.then_some(true),
            sort: args.sort,
        }
    }
}

/// Search `args.index` and print the hits.
pub async fn execute(ctx: &mut Context, args: SearchArgs) -> Result<()> {
    let client = ctx.client()?;
    let index = args.index.clone();
    let query = SearchQuery::from(args);
    let results = ctx
        .output
        .spin("Searching", client.search(&index, &query))
        .await
        .map_err(|e| index_error(e, &index))?;
    ctx.print("Search Results", &results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_from_args() {
        let args = SearchArgs {
            index: "movies".to_string(),
            query: Some("carol".to_string()),
            offset: None,
            limit: Some(5),
            filter: Some("genre = drama".to_string()),
            facets: None,
            attributes_to_retrieve: None,
            attributes_to_crop: None,
            crop_length: None,
            attributes_to_highlight: None,
            show_matches_position: false,
            sort: Some(vec!["year:desc".to_string()]),
        };
        let query = SearchQuery::from(args);
        assert_eq!(query.q.as_deref(), Some("carol"));
        assert_eq!(query.limit, Some(5));
        assert_eq!(query.show_matches_position, None);
        assert_eq!(query.sort, Some(vec!["year:desc".to_string()]));
    }
}
