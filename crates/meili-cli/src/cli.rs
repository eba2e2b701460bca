//! # CLI Structure and Argument Parsing
//!
//! The command tree mirrors the Meilisearch REST API: server-wide commands
//! live at the top level, while index, document and dump operations are
//! grouped under `index`, `documents` and `dump`.
//!
//! ```bash
//! # Server
//! meilisearch-cli health
//! meilisearch-cli get-version
//!
//! # Indexes and settings
//! meilisearch-cli index create movies --primary-key id --wait
//! meilisearch-cli index update-stop-words movies the a an --wait
//!
//! # Documents
//! meilisearch-cli documents add-from-file movies ./movies.json --wait
//! meilisearch-cli search movies "carol" --limit 5 --sort year:desc
//!
//! # Documentation
//! meilisearch-cli docs --links
//! ```
//!
//! ## Connection
//!
//! `--url` and `--master-key` fall back to `MEILI_HTTP_ADDR` and
//! `MEILI_MASTER_KEY`, then to the configuration file.
//!
//! ## Output
//!
//! Results are shown in panels by default. `--raw` prints the JSON returned
//! by the server instead.

use clap::{Args, Parser, Subcommand, ValueEnum};
use meili_core::sitemap::DEFAULT_SITEMAP_URL;
use meili_core::{FileEncoding, TaskStatus};
use std::path::PathBuf;

use crate::args::{ConnectionArgs, DocumentWriteArgs, WaitArgs};

/// Main CLI structure for the `meilisearch-cli` command
#[derive(Parser, Clone, Debug)]
#[command(name = "meilisearch-cli")]
#[command(version)]
#[command(about = "Manage a Meilisearch server from the command line", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Display the raw JSON instead of the formatted output
    #[arg(long, global = true)]
    pub raw: bool,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress warnings (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Top-level commands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Check the status of the server
    Health,

    /// Get the Meilisearch version information
    GetVersion,

    /// Get the stats of all indexes
    GetStats,

    /// List the API keys
    GetKeys,

    /// Get a single API key
    GetKey {
        /// The key or its uid
        key: String,
    },

    /// Create an API key
    CreateKey(CreateKeyArgs),

    /// Update the name or description of an API key
    UpdateKey {
        /// The key or its uid
        key: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an API key
    DeleteKey {
        /// The key or its uid
        key: String,
    },

    /// Search an index
    Search(SearchArgs),

    /// Get a single task
    GetTask {
        /// The task uid
        uid: u64,
    },

    /// List tasks
    GetTasks(TasksArgs),

    /// Show the Meilisearch documentation as a tree
    Docs {
        /// Sitemap to build the tree from
        #[arg(long = "sitemap-url", value_name = "URL", default_value = DEFAULT_SITEMAP_URL)]
        sitemap_url: String,

        /// Show the link of every page
        #[arg(long)]
        links: bool,
    },

    /// Manage indexes and their settings
    #[command(subcommand)]
    Index(IndexCommands),

    /// Manage documents
    #[command(subcommand)]
    Documents(DocumentCommands),

    /// Create dumps
    #[command(subcommand)]
    Dump(DumpCommands),
}

/// Arguments for `create-key`
#[derive(Args, Clone, Debug)]
pub struct CreateKeyArgs {
    /// Name of the key
    #[arg(long)]
    pub name: Option<String>,

    /// Description of the key
    #[arg(long)]
    pub description: Option<String>,

    /// Allowed actions, e.g. `search,documents.add` or `*`
    #[arg(long, required = true, value_delimiter = ',')]
    pub actions: Vec<String>,

    /// Allowed indexes, e.g. `movies` or `*`
    #[arg(long, required = true, value_delimiter = ',')]
    pub indexes: Vec<String>,

    /// Expiry date in RFC 3339 format. The key never expires when omitted
    #[arg(long = "expires-at", value_name = "DATE")]
    pub expires_at: Option<String>,
}

/// Arguments for `search`
#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// The index to search
    pub index: String,

    /// The query string. Omit for a placeholder search
    pub query: Option<String>,

    /// Number of hits to skip
    #[arg(long)]
    pub offset: Option<usize>,

    /// Maximum number of hits
    #[arg(long)]
    pub limit: Option<usize>,

    /// Filter expression, e.g. `genre = horror`
    #[arg(long)]
    pub filter: Option<String>,

    /// Attributes to compute a facet distribution for
    #[arg(long, value_delimiter = ',')]
    pub facets: Option<Vec<String>>,

    /// Attributes to return in each hit
    #[arg(long = "attributes-to-retrieve", value_delimiter = ',')]
    pub attributes_to_retrieve: Option<Vec<String>>,

    /// Attributes to crop
    #[arg(long = "attributes-to-crop", value_delimiter = ',')]
    pub attributes_to_crop: Option<Vec<String>>,

    /// Crop window length, in words
    #[arg(long = "crop-length")]
    pub crop_length: Option<usize>,

    /// Attributes to highlight
    #[arg(long = "attributes-to-highlight", value_delimiter = ',')]
    pub attributes_to_highlight: Option<Vec<String>>,

    /// Return the position of every match
    #[arg(long = "show-matches-position")]
    pub show_matches_position: bool,

    /// Sort expressions, e.g. `year:desc`
    #[arg(long, value_delimiter = ',')]
    pub sort: Option<Vec<String>>,
}

/// Task statuses accepted by `get-tasks --status`
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    /// Waiting to be processed
    Enqueued,
    /// Being processed
    Processing,
    /// Finished successfully
    Succeeded,
    /// Finished with an error
    Failed,
    /// Canceled before it finished
    Canceled,
}

impl From<StatusArg> for TaskStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Enqueued => Self::Enqueued,
            StatusArg::Processing => Self::Processing,
            StatusArg::Succeeded => Self::Succeeded,
            StatusArg::Failed => Self::Failed,
            StatusArg::Canceled => Self::Canceled,
        }
    }
}

/// Arguments for `get-tasks`
#[derive(Args, Clone, Debug)]
pub struct TasksArgs {
    /// Only tasks of this index
    #[arg(long)]
    pub index: Option<String>,

    /// Only tasks with these statuses
    #[arg(long, value_enum, value_delimiter = ',')]
    pub status: Vec<StatusArg>,

    /// Only tasks of these types, such as `documentAdditionOrUpdate`
    #[arg(long = "type", value_delimiter = ',')]
    pub types: Vec<String>,

    /// Maximum number of tasks
    #[arg(long)]
    pub limit: Option<usize>,

    /// Uid of the first task to return
    #[arg(long)]
    pub from: Option<u64>,
}

/// An index name with the wait flags
#[derive(Args, Clone, Debug)]
pub struct IndexWaitArgs {
    /// The name of the index
    pub index: String,

    #[command(flatten)]
    pub wait: WaitArgs,
}

/// An index name with a list of setting values
#[derive(Args, Clone, Debug)]
pub struct SettingValuesArgs {
    /// The name of the index
    pub index: String,

    /// The new values
    #[arg(required = true)]
    pub values: Vec<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

/// Arguments for `index update-synonyms`
#[derive(Args, Clone, Debug)]
pub struct SynonymsArgs {
    /// The name of the index
    pub index: String,

    /// Synonyms as JSON, e.g. `{"logan": ["wolverine"]}`
    pub synonyms: String,

    #[command(flatten)]
    pub wait: WaitArgs,
}

/// Arguments for `index update-distinct-attribute`
#[derive(Args, Clone, Debug)]
pub struct DistinctAttributeArgs {
    /// The name of the index
    pub index: String,

    /// The attribute used to de-duplicate results
    pub attribute: String,

    #[command(flatten)]
    pub wait: WaitArgs,
}

/// Arguments for `index update-settings`
#[derive(Args, Clone, Debug)]
pub struct UpdateSettingsArgs {
    /// The name of the index
    pub index: String,

    /// Ranking rules, in order of importance
    #[arg(long = "ranking-rules", num_args = 1..)]
    pub ranking_rules: Option<Vec<String>>,

    /// Words ignored in queries
    #[arg(long = "stop-words", num_args = 1..)]
    pub stop_words: Option<Vec<String>>,

    /// Synonyms as JSON, e.g. `{"logan": ["wolverine"]}`
    #[arg(long)]
    pub synonyms: Option<String>,

    /// Attributes searched for query words
    #[arg(long = "searchable-attributes", num_args = 1..)]
    pub searchable_attributes: Option<Vec<String>>,

    /// Attributes shown in returned documents
    #[arg(long = "displayed-attributes", num_args = 1..)]
    pub displayed_attributes: Option<Vec<String>>,

    /// Attributes usable in filters
    #[arg(long = "filterable-attributes", num_args = 1..)]
    pub filterable_attributes: Option<Vec<String>>,

    /// Attributes usable for sorting
    #[arg(long = "sortable-attributes", num_args = 1..)]
    pub sortable_attributes: Option<Vec<String>>,

    /// Attribute used to de-duplicate results
    #[arg(long = "distinct-attribute")]
    pub distinct_attribute: Option<String>,

    #[command(flatten)]
    pub wait: WaitArgs,
}

/// `index` sub-commands
#[derive(Subcommand, Clone, Debug)]
pub enum IndexCommands {
    /// Create an index
    Create {
        /// The name of the index to create
        index: String,

        /// The primary key of the index
        #[arg(long = "primary-key")]
        primary_key: Option<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Delete an index
    Delete(IndexWaitArgs),

    /// Get a single index
    Get {
        /// The name of the index
        index: String,
    },

    /// Get all indexes
    GetAll,

    /// Get the primary key of an index
    GetPrimaryKey {
        /// The name of the index
        index: String,
    },

    /// Get the stats of an index
    GetStats {
        /// The name of the index
        index: String,
    },

    /// Get the settings of an index
    GetSettings {
        /// The name of the index
        index: String,
    },

    /// Get the status of one update of an index
    GetUpdateStatus {
        /// The name of the index
        index: String,

        /// The task uid of the update
        update_id: u64,
    },

    /// Get the status of all updates of an index
    GetAllUpdateStatus {
        /// The name of the index
        index: String,
    },

    /// Set the primary key of an index
    Update {
        /// The name of the index
        index: String,

        /// The primary key of the index
        #[arg(long = "primary-key", required = true)]
        primary_key: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Update several settings at once
    UpdateSettings(UpdateSettingsArgs),

    /// Update the displayed attributes
    UpdateDisplayedAttributes(SettingValuesArgs),

    /// Update the distinct attribute
    UpdateDistinctAttribute(DistinctAttributeArgs),

    /// Update the filterable attributes
    UpdateFilterableAttributes(SettingValuesArgs),

    /// Update the ranking rules
    UpdateRankingRules(SettingValuesArgs),

    /// Update the searchable attributes
    UpdateSearchableAttributes(SettingValuesArgs),

    /// Update the sortable attributes
    UpdateSortableAttributes(SettingValuesArgs),

    /// Update the stop words
    UpdateStopWords(SettingValuesArgs),

    /// Update the synonyms
    UpdateSynonyms(SynonymsArgs),

    /// Reset all settings to their defaults
    ResetSettings(IndexWaitArgs),

    /// Reset the displayed attributes
    ResetDisplayedAttributes(IndexWaitArgs),

    /// Reset the distinct attribute
    ResetDistinctAttribute(IndexWaitArgs),

    /// Reset the filterable attributes
    ResetFilterableAttributes(IndexWaitArgs),

    /// Reset the ranking rules
    ResetRankingRules(IndexWaitArgs),

    /// Reset the searchable attributes
    ResetSearchableAttributes(IndexWaitArgs),

    /// Reset the sortable attributes
    ResetSortableAttributes(IndexWaitArgs),

    /// Reset the stop words
    ResetStopWords(IndexWaitArgs),

    /// Reset the synonyms
    ResetSynonyms(IndexWaitArgs),
}

/// Documents given as a JSON string
#[derive(Args, Clone, Debug)]
pub struct JsonDocumentsArgs {
    /// The name of the index
    pub index: String,

    /// A JSON object or array of objects
    pub documents: String,

    #[command(flatten)]
    pub write: DocumentWriteArgs,
}

/// Documents read from a file
#[derive(Args, Clone, Debug)]
pub struct FileDocumentsArgs {
    /// The name of the index
    pub index: String,

    /// The file containing the documents. Accepted file types are .json,
    /// .csv, and .ndjson
    pub path: PathBuf,

    /// The encoding of the file (utf-8 or latin-1)
    #[arg(long, default_value = "utf-8", value_parser = parse_encoding)]
    pub encoding: FileEncoding,

    #[command(flatten)]
    pub write: DocumentWriteArgs,
}

fn parse_encoding(value: &str) -> Result<FileEncoding, String> {
    value.parse().map_err(|e: meili_core::Error| e.to_string())
}

/// Documents given as JSON and sent in batches
#[derive(Args, Clone, Debug)]
pub struct BatchDocumentsArgs {
    /// The name of the index
    pub index: String,

    /// A JSON object or array of objects
    pub documents: String,

    /// Number of documents per request
    #[arg(long = "batch-size", default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: u64,

    #[command(flatten)]
    pub write: DocumentWriteArgs,
}

/// `documents` sub-commands
#[derive(Subcommand, Clone, Debug)]
pub enum DocumentCommands {
    /// Add documents, replacing existing ones with the same id
    Add(JsonDocumentsArgs),

    /// Add documents from a file
    AddFromFile(FileDocumentsArgs),

    /// Add documents in batches
    AddInBatches(BatchDocumentsArgs),

    /// Update documents, merging fields into existing ones
    Update(JsonDocumentsArgs),

    /// Update documents from a file
    UpdateFromFile(FileDocumentsArgs),

    /// Update documents in batches
    UpdateInBatches(BatchDocumentsArgs),

    /// Delete a document
    Delete {
        /// The name of the index
        index: String,

        /// The id of the document
        document_id: String,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Delete several documents
    DeleteMultiple {
        /// The name of the index
        index: String,

        /// The ids of the documents
        #[arg(required = true)]
        document_ids: Vec<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Delete all documents of an index
    DeleteAll(IndexWaitArgs),

    /// Get a document
    Get {
        /// The name of the index
        index: String,

        /// The id of the document
        document_id: String,
    },

    /// Get the documents of an index
    GetAll {
        /// The name of the index
        index: String,

        /// Number of documents to skip
        #[arg(long)]
        offset: Option<usize>,

        /// Maximum number of documents
        #[arg(long)]
        limit: Option<usize>,
    },
}

/// `dump` sub-commands
#[derive(Subcommand, Clone, Debug)]
pub enum DumpCommands {
    /// Trigger the creation of a dump
    Create {
        #[command(flatten)]
        wait: WaitArgs,
    },

    /// Get the status of a dump creation
    GetStatus {
        /// The task uid returned by `dump create`
        uid: u64,
    },
}
