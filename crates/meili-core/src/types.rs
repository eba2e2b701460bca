//! Wire types exchanged with the Meilisearch server.
//!
//! Only the fields the CLI reasons about are typed. Responses that are merely
//! displayed stay as [`serde_json::Value`] so nothing the server sends is
//! lost in the output.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Identifier of a server-side task.
pub type TaskUid = u64;

/// Processing state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    /// Accepted, waiting in the queue.
    Enqueued,
    /// Currently being processed.
    Processing,
    /// Finished successfully.
    Succeeded,
    /// Finished with an error.
    Failed,
    /// Canceled before completion.
    Canceled,
    /// A status this client does not know about. Treated as terminal.
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// `true` while the server is still working on the task.
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Enqueued | Self::Processing)
    }

    /// Lowercase name, as sent by the server.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enqueued => "enqueued",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary returned by every write endpoint.
///
/// Recent servers name the id `taskUid`; older ones used `uid` or `updateId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInfo {
    /// The id to poll.
    #[serde(alias = "uid", alias = "updateId")]
    pub task_uid: TaskUid,
    /// Index the task belongs to, if any.
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Status at enqueue time.
    #[serde(default = "enqueued")]
    pub status: TaskStatus,
}

const fn enqueued() -> TaskStatus {
    TaskStatus::Enqueued
}

/// Error block attached to a failed task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskError {
    /// Human readable message.
    #[serde(default)]
    pub message: String,
    /// Machine readable code.
    #[serde(default)]
    pub code: Option<String>,
}

/// A task as reported by `GET /tasks/{uid}`.
///
/// `raw` keeps the complete server payload for display.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task id.
    #[serde(alias = "updateId")]
    pub uid: TaskUid,
    /// Current status.
    pub status: TaskStatus,
    /// Index the task belongs to, if any.
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Failure details for failed tasks.
    #[serde(default)]
    pub error: Option<TaskError>,
    /// The full JSON payload.
    #[serde(skip)]
    pub raw: Value,
}

impl Task {
    /// Decode a task from a server payload, keeping the payload around.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut task: Self = serde_json::from_value(value.clone())
            .map_err(|e| Error::Parse(format!("Unexpected task payload: {e}")))?;
        task.raw = value;
        Ok(task)
    }
}

/// The settings bundle of an index.
///
/// Unset fields are omitted when serializing, which makes the same type
/// usable for partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Ranking rules, in order of importance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking_rules: Option<Vec<String>>,
    /// Words ignored by the search engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_words: Option<Vec<String>>,
    /// Word to synonym list mapping.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,
    /// Fields searched for query words, ordered by importance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    /// Fields returned in documents.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub displayed_attributes: Option<Vec<String>>,
    /// Fields usable in filters and facets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filterable_attributes: Option<Vec<String>>,
    /// Fields usable for sorting.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortable_attributes: Option<Vec<String>>,
    /// Field used for de-duplicating results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct_attribute: Option<String>,
}

impl Settings {
    /// `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// An individually addressable index setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Setting {
    /// `rankingRules`
    RankingRules,
    /// `stopWords`
    StopWords,
    /// `synonyms`
    Synonyms,
    /// `searchableAttributes`
    SearchableAttributes,
    /// `displayedAttributes`
    DisplayedAttributes,
    /// `filterableAttributes`
    FilterableAttributes,
    /// `sortableAttributes`
    SortableAttributes,
    /// `distinctAttribute`
    DistinctAttribute,
}

impl Setting {
    /// Every setting, in display order.
    pub const ALL: [Self; 8] = [
        Self::DisplayedAttributes,
        Self::DistinctAttribute,
        Self::FilterableAttributes,
        Self::RankingRules,
        Self::SearchableAttributes,
        Self::SortableAttributes,
        Self::StopWords,
        Self::Synonyms,
    ];

    /// Path segment under `/indexes/{uid}/settings/`.
    pub const fn path(self) -> &'static str {
        match self {
            Self::RankingRules => "ranking-rules",
            Self::StopWords => "stop-words",
            Self::Synonyms => "synonyms",
            Self::SearchableAttributes => "searchable-attributes",
            Self::DisplayedAttributes => "displayed-attributes",
            Self::FilterableAttributes => "filterable-attributes",
            Self::SortableAttributes => "sortable-attributes",
            Self::DistinctAttribute => "distinct-attribute",
        }
    }

    /// Title-cased name used in panel headers.
    pub const fn title(self) -> &'static str {
        match self {
            Self::RankingRules => "Ranking Rules",
            Self::StopWords => "Stop Words",
            Self::Synonyms => "Synonyms",
            Self::SearchableAttributes => "Searchable Attributes",
            Self::DisplayedAttributes => "Displayed Attributes",
            Self::FilterableAttributes => "Filterable Attributes",
            Self::SortableAttributes => "Sortable Attributes",
            Self::DistinctAttribute => "Distinct Attribute",
        }
    }
}

/// Body of `POST /indexes/{uid}/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    /// Query string. `None` performs a placeholder search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    /// Number of hits to skip.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    /// Maximum number of hits.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Filter expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    /// Attributes to compute a facet distribution for.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    /// Attributes returned in each hit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    /// Attributes to crop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_crop: Option<Vec<String>>,
    /// Crop window length, in words.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop_length: Option<usize>,
    /// Attributes to highlight.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    /// Return match positions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_matches_position: Option<bool>,
    /// Sort expressions, e.g. `release_date:desc`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
}

/// Body of `POST /keys`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyRequest {
    /// Optional name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allowed actions, e.g. `search` or `*`.
    pub actions: Vec<String>,
    /// Allowed indexes, e.g. `movies` or `*`.
    pub indexes: Vec<String>,
    /// RFC 3339 expiry date. `None` never expires; always sent.
    pub expires_at: Option<String>,
}

/// Body of `PATCH /keys/{key}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyUpdate {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Filters for `GET /tasks`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict to one index.
    pub index_uid: Option<String>,
    /// Restrict to some statuses.
    pub statuses: Vec<TaskStatus>,
    /// Restrict to some task types, such as `documentAdditionOrUpdate`.
    pub types: Vec<String>,
    /// Page size.
    pub limit: Option<usize>,
    /// First task uid of the page.
    pub from: Option<TaskUid>,
}

impl TaskFilter {
    /// Query-string pairs for the request.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(index) = &self.index_uid {
            pairs.push(("indexUids", index.clone()));
        }
        if !self.statuses.is_empty() {
            let statuses: Vec<&str> = self.statuses.iter().map(|s| s.as_str()).collect();
            pairs.push(("statuses", statuses.join(",")));
        }
        if !self.types.is_empty() {
            pairs.push(("types", self.types.join(",")));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        pairs
    }
}

/// File formats accepted for bulk document imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// A JSON array of objects.
    Json,
    /// CSV with a header row.
    Csv,
    /// One JSON object per line.
    Ndjson,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    ///
    /// Only looks at the path, never at the file, so unsupported files are
    /// rejected before any I/O happens.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            Some("ndjson") => Ok(Self::Ndjson),
            _ => Err(Error::UnsupportedFileType {
                path: path.display().to_string(),
            }),
        }
    }

    /// `Content-Type` header for uploads.
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Csv => "text/csv",
            Self::Ndjson => "application/x-ndjson",
        }
    }
}

/// Parse a JSON document payload given on the command line.
///
/// A single object is accepted as shorthand for a one-element array.
pub fn parse_documents(input: &str) -> Result<Vec<Value>> {
    let invalid = || Error::InvalidJson {
        input: input.to_string(),
    };

    match serde_json::from_str::<Value>(input).map_err(|_| invalid())? {
        Value::Array(items) if items.iter().all(Value::is_object) => Ok(items),
        object @ Value::Object(_) => Ok(vec![object]),
        _ => Err(invalid()),
    }
}

/// Parse a synonyms mapping given as JSON, e.g. `{"logan": ["wolverine"]}`.
pub fn parse_synonyms(input: &str) -> Result<BTreeMap<String, Vec<String>>> {
    serde_json::from_str(input).map_err(|_| Error::InvalidJson {
        input: input.to_string(),
    })
}
