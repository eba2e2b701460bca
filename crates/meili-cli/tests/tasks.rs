#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::meili_cmd_for;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn task(uid: u64, index: &str, status: &str) -> Value {
    json!({
        "uid": uid,
        "indexUid": index,
        "status": status,
        "type": "documentAdditionOrUpdate",
        "enqueuedAt": "2024-01-02T10:00:00Z"
    })
}

#[tokio::test]
async fn get_tasks_sends_the_filters() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("indexUids", "movies"))
        .and(query_param("statuses", "failed,succeeded"))
        .and(query_param("types", "documentAdditionOrUpdate,indexCreation"))
        .and(query_param("limit", "2"))
        .and(query_param("from", "9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [task(9, "movies", "failed"), task(8, "movies", "succeeded")],
            "limit": 2,
            "from": 9,
            "next": 7
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stdout = meili_cmd_for(&server.uri())
        .args([
            "get-tasks",
            "--index",
            "movies",
            "--status",
            "failed,succeeded",
            "--type",
            "documentAdditionOrUpdate,indexCreation",
            "--limit",
            "2",
            "--from",
            "9",
            "--raw",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let payload: Value = serde_json::from_slice(&stdout)?;
    assert_eq!(payload["results"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["next"], 7);
    Ok(())
}

#[test]
fn unknown_status_is_rejected() {
    meili_cmd_for("http://127.0.0.1:1")
        .args(["get-tasks", "--status", "done"])
        .assert()
        .code(2);
}

#[tokio::test]
async fn get_task_prints_the_record() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task(4, "movies", "succeeded")))
        .expect(1)
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["get-task", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Task"))
        .stdout(predicate::str::contains("indexUid: movies"))
        .stdout(predicate::str::contains("status: succeeded"));
    Ok(())
}

#[tokio::test]
async fn update_status_of_another_index_is_not_found() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task(4, "books", "succeeded")))
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["index", "get-update-status", "movies", "4"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Update 4 does not belong to index movies"));
    Ok(())
}

#[tokio::test]
async fn all_update_status_filters_by_index() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tasks"))
        .and(query_param("indexUids", "movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [task(4, "movies", "succeeded")],
            "limit": 20,
            "from": 4,
            "next": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["index", "get-all-update-status", "movies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("All Update Status"));
    Ok(())
}

#[tokio::test]
async fn task_that_never_finishes_times_out() -> anyhow::Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/indexes"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "taskUid": 11,
            "indexUid": "movies",
            "status": "enqueued",
            "type": "indexCreation",
            "enqueuedAt": "2024-01-02T10:00:00Z"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/tasks/11"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task(11, "movies", "enqueued")))
        .mount(&server)
        .await;

    meili_cmd_for(&server.uri())
        .args(["index", "create", "movies", "--wait", "--wait-timeout", "1"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains("Task 11 did not finish within 1.0s"));
    Ok(())
}
