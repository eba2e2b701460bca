//! HTTP client for the Meilisearch REST API.
//!
//! Each method maps to one endpoint and returns either the decoded
//! [`TaskInfo`] for write operations or the raw JSON body for reads. Errors
//! returned by the server are decoded into [`Error::Api`] so callers can
//! react to specific error codes.
//!
//! Requests are sent one at a time; the client never fans out.

use crate::config::ConnectionConfig;
use crate::types::{
    DocumentFormat, KeyRequest, KeyUpdate, SearchQuery, Setting, Settings, Task, TaskFilter,
    TaskInfo, TaskUid,
};
use crate::{Error, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, instrument};
use url::Url;

/// Error body sent by Meilisearch on failure.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Client for a single Meilisearch server.
#[derive(Debug, Clone)]
pub struct MeiliClient {
    client: Client,
    base: Url,
}

impl MeiliClient {
    /// Build a client from a resolved connection.
    ///
    /// The master key, when present, is sent as a bearer token on every
    /// request.
    pub fn new(connection: &ConnectionConfig) -> Result<Self> {
        let base = Url::parse(&connection.url).map_err(|e| {
            Error::Config(format!("Invalid server URL '{}': {e}", connection.url))
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "Invalid server URL '{}'",
                connection.url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(key) = &connection.master_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {key}"))
                .map_err(|_| Error::Config("Master key contains invalid characters".into()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(connection.request_timeout)
            .user_agent(concat!("meilisearch-cli/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .gzip(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self { client, base })
    }

    /// Base URL the client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("Invalid server URL '{}'", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!(%method, %url, "Sending request");
        Ok(self.client.request(method, url))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        if status == StatusCode::NO_CONTENT || body.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Parse(format!("Server returned invalid JSON: {e}")))
    }

    async fn send_task(&self, request: RequestBuilder) -> Result<TaskInfo> {
        let value = self.send(request).await?;
        serde_json::from_value(value)
            .map_err(|e| Error::Parse(format!("Unexpected task summary: {e}")))
    }

    // -- server -----------------------------------------------------------

    /// `GET /health`
    pub async fn health(&self) -> Result<Value> {
        self.send(self.request(Method::GET, &["health"])?).await
    }

    /// `GET /version`
    pub async fn version(&self) -> Result<Value> {
        self.send(self.request(Method::GET, &["version"])?).await
    }

    /// `GET /stats`
    pub async fn stats(&self) -> Result<Value> {
        self.send(self.request(Method::GET, &["stats"])?).await
    }

    // -- indexes ----------------------------------------------------------

    /// `GET /indexes`
    pub async fn list_indexes(&self) -> Result<Value> {
        self.send(self.request(Method::GET, &["indexes"])?).await
    }

    /// `GET /indexes/{uid}`
    #[instrument(level = "debug", skip(self))]
    pub async fn get_index(&self, uid: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &["indexes", uid])?).await
    }

    /// `POST /indexes`
    #[instrument(level = "debug", skip(self))]
    pub async fn create_index(&self, uid: &str, primary_key: Option<&str>) -> Result<TaskInfo> {
        let mut body = json!({ "uid": uid });
        if let Some(primary_key) = primary_key {
            body["primaryKey"] = json!(primary_key);
        }
        self.send_task(self.request(Method::POST, &["indexes"])?.json(&body)).await
    }

    /// `PATCH /indexes/{uid}` to set the primary key.
    #[instrument(level = "debug", skip(self))]
    pub async fn update_index(&self, uid: &str, primary_key: &str) -> Result<TaskInfo> {
        let body = json!({ "primaryKey": primary_key });
        self.send_task(self.request(Method::PATCH, &["indexes", uid])?.json(&body)).await
    }

    /// `DELETE /indexes/{uid}`
    #[instrument(level = "debug", skip(self))]
    pub async fn delete_index(&self, uid: &str) -> Result<TaskInfo> {
        self.send_task(self.request(Method::DELETE, &["indexes", uid])?).await
    }

    /// `GET /indexes/{uid}/stats`
    pub async fn index_stats(&self, uid: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &["indexes", uid, "stats"])?).await
    }

    // -- settings ---------------------------------------------------------

    /// `GET /indexes/{uid}/settings`
    pub async fn get_settings(&self, uid: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &["indexes", uid, "settings"])?).await
    }

    /// `PATCH /indexes/{uid}/settings` with the fields that are set.
    #[instrument(level = "debug", skip(self, settings))]
    pub async fn update_settings(&self, uid: &str, settings: &Settings) -> Result<TaskInfo> {
        self.send_task(
            self.request(Method::PATCH, &["indexes", uid, "settings"])?
                .json(settings),
        )
        .await
    }

    /// `DELETE /indexes/{uid}/settings`
    pub async fn reset_settings(&self, uid: &str) -> Result<TaskInfo> {
        self.send_task(self.request(Method::DELETE, &["indexes", uid, "settings"])?).await
    }

    /// `GET /indexes/{uid}/settings/{setting}`
    pub async fn get_setting(&self, uid: &str, setting: Setting) -> Result<Value> {
        self.send(self.request(Method::GET, &["indexes", uid, "settings", setting.path()])?).await
    }

    /// `PUT /indexes/{uid}/settings/{setting}`
    #[instrument(level = "debug", skip(self, value), fields(setting = setting.path()))]
    pub async fn update_setting(
        &self,
        uid: &str,
        setting: Setting,
        value: &Value,
    ) -> Result<TaskInfo> {
        self.send_task(
            self.request(Method::PUT, &["indexes", uid, "settings", setting.path()])?
                .json(value),
        )
        .await
    }

    /// `DELETE /indexes/{uid}/settings/{setting}`
    #[instrument(level = "debug", skip(self), fields(setting = setting.path()))]
    pub async fn reset_setting(&self, uid: &str, setting: Setting) -> Result<TaskInfo> {
        self.send_task(self.request(
            Method::DELETE,
            &["indexes", uid, "settings", setting.path()],
        )?)
        .await
    }

    // -- documents --------------------------------------------------------

    fn documents_request(
        &self,
        uid: &str,
        replace: bool,
        primary_key: Option<&str>,
    ) -> Result<RequestBuilder> {
        // POST replaces whole documents, PUT merges fields into existing ones.
        let method = if replace { Method::POST } else { Method::PUT };
        let mut request = self.request(method, &["indexes", uid, "documents"])?;
        if let Some(primary_key) = primary_key {
            request = request.query(&[("primaryKey", primary_key)]);
        }
        Ok(request)
    }

    /// `POST /indexes/{uid}/documents`
    #[instrument(level = "debug", skip(self, documents), fields(count = documents.len()))]
    pub async fn add_documents(
        &self,
        uid: &str,
        documents: &[Value],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        self.send_task(self.documents_request(uid, true, primary_key)?.json(documents)).await
    }

    /// `PUT /indexes/{uid}/documents`
    #[instrument(level = "debug", skip(self, documents), fields(count = documents.len()))]
    pub async fn update_documents(
        &self,
        uid: &str,
        documents: &[Value],
        primary_key: Option<&str>,
    ) -> Result<TaskInfo> {
        self.send_task(self.documents_request(uid, false, primary_key)?.json(documents)).await
    }

    /// Upload a document file body as-is with the matching content type.
    ///
    /// `replace` selects add (`true`) or update (`false`) semantics.
    #[instrument(level = "debug", skip(self, body), fields(bytes = body.len()))]
    pub async fn upload_documents(
        &self,
        uid: &str,
        body: Vec<u8>,
        format: DocumentFormat,
        primary_key: Option<&str>,
        replace: bool,
    ) -> Result<TaskInfo> {
        let request = self
            .documents_request(uid, replace, primary_key)?
            .header(CONTENT_TYPE, format.content_type())
            .body(body);
        self.send_task(request).await
    }

    /// Send documents in chunks of `batch_size`, one request per chunk.
    ///
    /// Stops at the first failing request. A `batch_size` of zero is treated
    /// as one.
    pub async fn send_documents_in_batches(
        &self,
        uid: &str,
        documents: &[Value],
        batch_size: usize,
        primary_key: Option<&str>,
        replace: bool,
    ) -> Result<Vec<TaskInfo>> {
        let mut tasks = Vec::new();
        for batch in documents.chunks(batch_size.max(1)) {
            let task = if replace {
                self.add_documents(uid, batch, primary_key).await?
            } else {
                self.update_documents(uid, batch, primary_key).await?
            };
            tasks.push(task);
        }
        debug!(batches = tasks.len(), "Sent document batches");
        Ok(tasks)
    }

    /// `GET /indexes/{uid}/documents/{id}`
    pub async fn get_document(&self, uid: &str, document_id: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &["indexes", uid, "documents", document_id])?).await
    }

    /// `GET /indexes/{uid}/documents`
    pub async fn get_documents(
        &self,
        uid: &str,
        offset: Option<usize>,
        limit: Option<usize>,
    ) -> Result<Value> {
        let mut query = Vec::new();
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        self.send(
            self.request(Method::GET, &["indexes", uid, "documents"])?
                .query(&query),
        )
        .await
    }

    /// `DELETE /indexes/{uid}/documents/{id}`
    pub async fn delete_document(&self, uid: &str, document_id: &str) -> Result<TaskInfo> {
        self.send_task(self.request(
            Method::DELETE,
            &["indexes", uid, "documents", document_id],
        )?)
        .await
    }

    /// `POST /indexes/{uid}/documents/delete-batch`
    pub async fn delete_documents(&self, uid: &str, document_ids: &[String]) -> Result<TaskInfo> {
        self.send_task(
            self.request(Method::POST, &["indexes", uid, "documents", "delete-batch"])?
                .json(document_ids),
        )
        .await
    }

    /// `DELETE /indexes/{uid}/documents`
    pub async fn delete_all_documents(&self, uid: &str) -> Result<TaskInfo> {
        self.send_task(self.request(Method::DELETE, &["indexes", uid, "documents"])?).await
    }

    // -- search -----------------------------------------------------------

    /// `POST /indexes/{uid}/search`
    #[instrument(level = "debug", skip(self, query))]
    pub async fn search(&self, uid: &str, query: &SearchQuery) -> Result<Value> {
        self.send(
            self.request(Method::POST, &["indexes", uid, "search"])?
                .json(query),
        )
        .await
    }

    // -- tasks ------------------------------------------------------------

    /// `GET /tasks/{uid}`
    pub async fn get_task(&self, task_uid: TaskUid) -> Result<Task> {
        let uid = task_uid.to_string();
        let value = self
            .send(self.request(Method::GET, &["tasks", &uid])?)
            .await?;
        Task::from_value(value)
    }

    /// `GET /tasks` with optional filters.
    pub async fn get_tasks(&self, filter: &TaskFilter) -> Result<Value> {
        self.send(
            self.request(Method::GET, &["tasks"])?
                .query(&filter.query_pairs()),
        )
        .await
    }

    // -- dumps ------------------------------------------------------------

    /// `POST /dumps`
    pub async fn create_dump(&self) -> Result<TaskInfo> {
        self.send_task(self.request(Method::POST, &["dumps"])?).await
    }

    // -- keys -------------------------------------------------------------

    /// `GET /keys`
    pub async fn get_keys(&self) -> Result<Value> {
        self.send(self.request(Method::GET, &["keys"])?).await
    }

    /// `GET /keys/{key}`
    pub async fn get_key(&self, key: &str) -> Result<Value> {
        self.send(self.request(Method::GET, &["keys", key])?).await
    }

    /// `POST /keys`
    pub async fn create_key(&self, request: &KeyRequest) -> Result<Value> {
        self.send(self.request(Method::POST, &["keys"])?.json(request)).await
    }

    /// `PATCH /keys/{key}`
    pub async fn update_key(&self, key: &str, update: &KeyUpdate) -> Result<Value> {
        self.send(self.request(Method::PATCH, &["keys", key])?.json(update)).await
    }

    /// `DELETE /keys/{key}`. Returns [`Value::Null`] on success.
    pub async fn delete_key(&self, key: &str) -> Result<Value> {
        self.send(self.request(Method::DELETE, &["keys", key])?).await
    }
}

fn api_error(status: StatusCode, body: &str) -> Error {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(decoded) => Error::Api {
            status: status.as_u16(),
            code: decoded.code,
            message: decoded.message,
            link: decoded.link,
        },
        Err(_) => {
            let message = if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            } else {
                body.trim().to_string()
            };
            Error::Api {
                status: status.as_u16(),
                code: None,
                message,
                link: None,
            }
        },
    }
}
