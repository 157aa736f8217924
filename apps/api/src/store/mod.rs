//! Document store: keyed JSON records for profiles, applications and job postings.
//!
//! Handlers see only the `DocumentStore` trait. `AppState` carries an
//! `Arc<dyn DocumentStore>`, chosen at start-up from `STORAGE_BACKEND`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::config::TableNames;

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

/// A stored record: a flat JSON object whose key attribute is one of its fields.
pub type Document = Map<String, Value>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Stored document in '{collection}' is not a JSON object")]
    Corrupt { collection: String },
}

/// The three logical collections. Physical names come from config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Profiles,
    Applications,
    JobPostings,
}

impl Collection {
    /// The attribute that holds the primary key inside each document.
    pub fn key_field(self) -> &'static str {
        match self {
            Collection::Profiles => "userId",
            Collection::Applications => "applicationId",
            Collection::JobPostings => "jobId",
        }
    }

    pub fn table_name(self, tables: &TableNames) -> &str {
        match self {
            Collection::Profiles => &tables.users,
            Collection::Applications => &tables.applications,
            Collection::JobPostings => &tables.jobs,
        }
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Document>, StoreError>;

    /// Creates or wholesale replaces the document at `key`.
    async fn put(&self, collection: Collection, key: &str, doc: Document) -> Result<(), StoreError>;

    /// Sets the given top-level fields, leaving the rest untouched.
    /// Creates the document (with its key attribute) if it does not exist.
    async fn update(
        &self,
        collection: Collection,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError>;

    /// All documents whose top-level `field` equals the string `value`.
    async fn find_by(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError>;
}

/// Serializes a record into a storable document. Only structs/maps qualify.
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        _ => Err(<serde_json::Error as serde::ser::Error>::custom(
            "record does not serialize to a JSON object",
        )),
    }
}

pub fn from_document<T: DeserializeOwned>(doc: Document) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(doc))
}
