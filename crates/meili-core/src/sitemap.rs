//! Sitemap XML fetching and parsing.
//!
//! Used to discover the pages of the Meilisearch documentation site. Both
//! standard sitemaps (`<urlset>`) and sitemap indexes (`<sitemapindex>`) are
//! supported; child sitemaps are fetched one after the other.
//!
//! ```
//! use meili_core::sitemap::parse_sitemap;
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//!   <url><loc>https://www.meilisearch.com/docs/learn/getting_started</loc></url>
//! </urlset>"#;
//!
//! let urls = parse_sitemap(xml).unwrap();
//! assert_eq!(urls[0], "https://www.meilisearch.com/docs/learn/getting_started");
//! ```

use crate::{Error, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default location of the documentation sitemap.
pub const DEFAULT_SITEMAP_URL: &str = "https://www.meilisearch.com/docs/sitemap.xml";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum nesting of sitemap indexes.
const MAX_INDEX_DEPTH: u8 = 2;

/// Maximum number of child sitemaps read from one index.
const MAX_CHILD_SITEMAPS: usize = 50;

#[derive(Debug)]
enum SitemapContent {
    Pages(Vec<String>),
    Index(Vec<String>),
}

/// Parse a standard sitemap into its page URLs.
///
/// Entries without `<loc>` are skipped. A sitemap index is rejected; use
/// [`fetch_sitemap`] to follow indexes.
#[instrument(level = "debug", skip(xml), fields(xml_len = xml.len()))]
pub fn parse_sitemap(xml: &str) -> Result<Vec<String>> {
    match parse_sitemap_content(xml)? {
        SitemapContent::Pages(pages) => Ok(pages),
        SitemapContent::Index(_) => Err(Error::Parse(
            "XML is a sitemap index, not a standard sitemap".to_string(),
        )),
    }
}

/// Fetch a sitemap and return every page URL it lists.
///
/// Sitemap indexes are followed up to two levels deep. A child sitemap that
/// cannot be fetched is logged and skipped; a failure on the root sitemap is
/// returned as an error.
#[instrument(skip_all, fields(url = %url))]
pub async fn fetch_sitemap(url: &str) -> Result<Vec<String>> {
    let client = build_sitemap_client()?;
    let mut pages = Vec::new();
    let mut pending = vec![(url.to_string(), 0_u8)];

    while let Some((current, depth)) = pending.pop() {
        let content = match fetch_content(&client, &current).await {
            Ok(content) => content,
            Err(e) if depth > 0 => {
                warn!(url = %current, error = ?e, "Skipping child sitemap");
                continue;
            },
            Err(e) => return Err(e),
        };

        match content {
            SitemapContent::Pages(found) => pages.extend(found),
            SitemapContent::Index(children) if depth < MAX_INDEX_DEPTH => {
                debug!(child_count = children.len(), depth, "Following sitemap index");
                // Reversed so that children are visited in document order.
                pending.extend(
                    children
                        .into_iter()
                        .take(MAX_CHILD_SITEMAPS)
                        .rev()
                        .map(|child| (child, depth + 1)),
                );
            },
            SitemapContent::Index(_) => {
                warn!(url = %current, "Sitemap index nested too deeply, skipping");
            },
        }
    }

    Ok(pages)
}

async fn fetch_content(client: &Client, url: &str) -> Result<SitemapContent> {
    debug!(url, "Fetching sitemap");
    let xml = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    parse_sitemap_content(&xml)
}

fn parse_sitemap_content(xml: &str) -> Result<SitemapContent> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut is_index = false;
    let mut in_entry = false;
    let mut in_loc = false;
    let mut current_loc: Option<String> = None;
    let mut locations = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                b"sitemapindex" => is_index = true,
                b"url" | b"sitemap" => {
                    in_entry = true;
                    current_loc = None;
                },
                b"loc" if in_entry => in_loc = true,
                _ => {},
            },
            Ok(Event::End(e)) => {
                if matches!(e.local_name().as_ref(), b"url" | b"sitemap") && in_entry {
                    locations.extend(current_loc.take());
                    in_entry = false;
                }
                in_loc = false;
            },
            Ok(Event::Text(e)) if in_loc => {
                let text = e.unescape().map_err(|e| Error::Parse(e.to_string()))?;
                current_loc = Some(text.trim().to_string());
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Parse(format!("XML parse error: {e}"))),
            _ => {},
        }
        buf.clear();
    }

    Ok(if is_index {
        SitemapContent::Index(locations)
    } else {
        SitemapContent::Pages(locations)
    })
}

fn build_sitemap_client() -> Result<Client> {
    Client::builder()
        .timeout(FETCH_TIMEOUT)
        .user_agent(concat!("meilisearch-cli/", env!("CARGO_PKG_VERSION")))
        .redirect(reqwest::redirect::Policy::limited(5))
        .gzip(true)
        .build()
        .map_err(Error::Network)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn urlset(urls: &[&str]) -> String {
        let body: String = urls
            .iter()
            .map(|u| format!("<url><loc>{u}</loc></url>"))
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{body}</urlset>"#
        )
    }

    #[test]
    fn test_parses_urls_in_order() {
        let xml = urlset(&[
            "https://example.com/docs/a",
            "https://example.com/docs/b",
            "https://example.com/docs/c",
        ]);
        assert_eq!(
            parse_sitemap(&xml).unwrap(),
            vec![
                "https://example.com/docs/a",
                "https://example.com/docs/b",
                "https://example.com/docs/c"
            ]
        );
    }

    #[test]
    fn test_ignores_other_entry_fields() {
        let xml = "<urlset><url><loc>https://example.com/a</loc><lastmod>2024-01-15</lastmod><priority>0.8</priority></url></urlset>";
        assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_skips_entries_without_loc() {
        let xml = "<urlset><url><lastmod>2024-01-15</lastmod></url><url><loc>https://example.com/a</loc></url></urlset>";
        assert_eq!(parse_sitemap(xml).unwrap(), vec!["https://example.com/a"]);
    }

    #[test]
    fn test_unescapes_entities() {
        let xml = "<urlset><url><loc>https://example.com/a?x=1&amp;y=2</loc></url></urlset>";
        assert_eq!(
            parse_sitemap(xml).unwrap(),
            vec!["https://example.com/a?x=1&y=2"]
        );
    }

    #[test]
    fn test_rejects_index_in_parse() {
        let xml = "<sitemapindex><sitemap><loc>https://example.com/s1.xml</loc></sitemap></sitemapindex>";
        assert!(parse_sitemap(xml).is_err());
    }

    #[test]
    fn test_malformed_xml() {
        let xml = "<urlset><url><loc>https://example.com/a</url></urlset>";
        assert!(parse_sitemap(xml).is_err());
    }

    #[test]
    fn test_empty_sitemap() {
        assert!(parse_sitemap("<urlset></urlset>").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_follows_index_in_order() {
        let server = MockServer::start().await;
        let index = format!(
            "<sitemapindex><sitemap><loc>{0}/one.xml</loc></sitemap><sitemap><loc>{0}/two.xml</loc></sitemap></sitemapindex>",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/one.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&["https://example.com/1"])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/two.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&["https://example.com/2"])))
            .mount(&server)
            .await;

        let urls = fetch_sitemap(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(urls, vec!["https://example.com/1", "https://example.com/2"]);
    }

    #[tokio::test]
    async fn test_fetch_skips_failing_child() {
        let server = MockServer::start().await;
        let index = format!(
            "<sitemapindex><sitemap><loc>{0}/missing.xml</loc></sitemap><sitemap><loc>{0}/ok.xml</loc></sitemap></sitemapindex>",
            server.uri()
        );
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(index))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/ok.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(urlset(&["https://example.com/ok"])))
            .mount(&server)
            .await;

        let urls = fetch_sitemap(&format!("{}/sitemap.xml", server.uri()))
            .await
            .unwrap();
        assert_eq!(urls, vec!["https://example.com/ok"]);
    }

    #[tokio::test]
    async fn test_fetch_root_failure_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = fetch_sitemap(&format!("{}/sitemap.xml", server.uri())).await;
        assert!(result.is_err());
    }
}
