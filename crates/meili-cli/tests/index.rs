#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::meili_cmd_for;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn index_not_found(uid: &str) -> ResponseTemplate {
    ResponseTemplate::new(404).set_body_json(json!({
        "message": format!("Index `{uid}` not found."),
        "code": "index_not_found",
        "type": "invalid_request",
        "link": "https://docs.meilisearch.com/errors#index_not_found"
    }))
}

fn enqueued(task_uid: u64, kind: &str) -> ResponseTemplate {
    ResponseTemplate::new(202).set_body_json(json!({
        "taskUid": task_uid,
        "indexUid": "movies",
        "status": "enqueued",
        "type": kind,
        "enqueuedAt": "2024-01-02T10:00:00Z"
    }))
}

async fn mount_succeeded(server: &MockServer, task_uid: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/tasks/{task_uid}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": task_uid,
            "indexUid": "movies",
            "status": "succeeded"
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_index_exits_with_not_found() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes/missing"))
        .respond_with(index_not_found("missing"))
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["index", "get", "missing"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Index missing not found"));
    Ok(())
}

#[tokio::test]
async fn raw_output_is_json() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    let index = json!({
        "uid": "movies",
        "primaryKey": "id",
        "createdAt": "2024-01-02T10:00:00Z",
        "updatedAt": "2024-01-02T10:00:00Z"
    });
    Mock::given(method("GET"))
        .and(path("/indexes/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(index.clone()))
        .mount(&server)
        .await;

    let stdout = meili_cmd_for(&server.uri())
        .args(["--raw", "index", "get", "movies"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&stdout)?;
    assert_eq!(payload, index);

    meili_cmd_for(&server.uri())
        .args(["index", "get-primary-key", "movies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Primary Key"))
        .stdout(predicate::str::contains("│ id"));
    Ok(())
}

#[tokio::test]
async fn create_with_wait_prints_the_index() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .and(body_json(json!({"uid": "movies", "primaryKey": "id"})))
        .respond_with(enqueued(1, "indexCreation"))
        .expect(1)
        .mount(&server)
        .await;
    mount_succeeded(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/indexes/movies"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"uid": "movies", "primaryKey": "id"})),
        )
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["index", "create", "movies", "--primary-key", "id", "--wait"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uid: movies"))
        .stdout(predicate::str::contains("primaryKey: id"));
    Ok(())
}

#[tokio::test]
async fn delete_with_wait_confirms() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/indexes/movies"))
        .respond_with(enqueued(2, "indexDeletion"))
        .mount(&server)
        .await;
    mount_succeeded(&server, 2).await;

    meili_cmd_for(&server.uri())
        .args(["index", "delete", "movies", "-w"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Index movies successfully deleted"));
    Ok(())
}

#[tokio::test]
async fn failed_creation_reports_existing_index() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .respond_with(enqueued(3, "indexCreation"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "uid": 3,
            "indexUid": "movies",
            "status": "failed",
            "error": {"message": "Index `movies` already exists.", "code": "index_already_exists"}
        })))
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["index", "create", "movies", "--wait"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Index movies already exists"));
    Ok(())
}

#[tokio::test]
async fn setting_update_with_wait_prints_values_read_back() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/indexes/movies/settings/stop-words"))
        .and(body_json(json!(["the", "a"])))
        .respond_with(enqueued(4, "settingsUpdate"))
        .expect(1)
        .mount(&server)
        .await;
    mount_succeeded(&server, 4).await;
    Mock::given(method("GET"))
        .and(path("/indexes/movies/settings/stop-words"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["a", "the"])))
        .mount(&server)
        .await;

    let stdout = meili_cmd_for(&server.uri())
        .args(["index", "update-stop-words", "movies", "the", "a", "--wait", "--raw"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&stdout)?;
    assert_eq!(payload, json!(["a", "the"]));
    Ok(())
}

#[tokio::test]
async fn settings_bundle_is_patched() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/indexes/movies/settings"))
        .and(body_json(json!({
            "stopWords": ["the"],
            "synonyms": {"logan": ["wolverine"]},
            "distinctAttribute": "title"
        })))
        .respond_with(enqueued(5, "settingsUpdate"))
        .expect(1)
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args([
            "index",
            "update-settings",
            "movies",
            "--stop-words",
            "the",
            "--synonyms",
            r#"{"logan": ["wolverine"]}"#,
            "--distinct-attribute",
            "title",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Update Settings"))
        .stdout(predicate::str::contains("taskUid: 5"));
    Ok(())
}

#[test]
fn empty_settings_update_is_a_usage_error() {
    meili_cmd_for("http://127.0.0.1:1")
        .args(["index", "update-settings", "movies"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No settings to update"));
}

#[test]
fn invalid_synonyms_are_a_usage_error() {
    meili_cmd_for("http://127.0.0.1:1")
        .args(["index", "update-synonyms", "movies", "[1, 2]"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Unable to parse [1, 2] as JSON"));
}
