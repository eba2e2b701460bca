#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::meili_cmd;
use predicates::prelude::*;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SITEMAP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  <url><loc>https://www.meilisearch.com/docs/learn/getting_started.html</loc></url>
  <url><loc>https://www.meilisearch.com/docs/learn/indexing.html</loc></url>
  <url><loc>https://www.meilisearch.com/docs/404.html</loc></url>
  <url><loc>https://www.meilisearch.com/docs/fr/404/</loc></url>
  <url><loc>https://www.meilisearch.com/docs/reference/api/search</loc></url>
</urlset>"#;

async fn sitemap_server(body: &str) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn docs_prints_the_tree() -> anyhow::Result<()> {
    let server = sitemap_server(SITEMAP).await;
    let url = format!("{}/sitemap.xml", server.uri());

    meili_cmd()
        .args(["docs", "--sitemap-url", url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Meilisearch Documentation"))
        .stdout(predicate::str::contains("├── Getting Started"))
        .stdout(predicate::str::contains("└── Search"))
        .stdout(predicate::str::contains("404").not());
    Ok(())
}

#[tokio::test]
async fn docs_with_links_and_raw() -> anyhow::Result<()> {
    let server = sitemap_server(SITEMAP).await;
    let url = format!("{}/sitemap.xml", server.uri());

    meili_cmd()
        .args(["docs", "--links", "--sitemap-url", url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Indexing https://www.meilisearch.com/docs/learn/indexing.html",
        ));

    let stdout = meili_cmd()
        .args(["docs", "--raw", "--sitemap-url", url.as_str()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let tree: Value = serde_json::from_slice(&stdout)?;
    assert_eq!(tree["label"], "Meilisearch Documentation");
    assert_eq!(tree["children"][0]["label"], "Docs");
    Ok(())
}

#[tokio::test]
async fn empty_sitemap_is_a_tree_error() -> anyhow::Result<()> {
    let server = sitemap_server(
        r#"<?xml version="1.0"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9"></urlset>"#,
    )
    .await;
    let url = format!("{}/sitemap.xml", server.uri());

    meili_cmd()
        .args(["docs", "--sitemap-url", url.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error building tree"));
    Ok(())
}
