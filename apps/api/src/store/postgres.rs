use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;
use tracing::debug;

use super::{Collection, Document, DocumentStore, StoreError};
use crate::config::TableNames;

/// Postgres-backed document store. Every collection lives in the single
/// JSONB `documents` table created by `db::ensure_schema`, partitioned by the
/// configured collection name.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
    tables: TableNames,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, tables: TableNames) -> Self {
        Self { pool, tables }
    }

    fn name(&self, collection: Collection) -> &str {
        collection.table_name(&self.tables)
    }
}

fn into_document(collection: &str, body: Value) -> Result<Document, StoreError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(StoreError::Corrupt {
            collection: collection.to_string(),
        }),
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Document>, StoreError> {
        let name = self.name(collection);
        let body: Option<Value> =
            sqlx::query_scalar("SELECT body FROM documents WHERE collection = $1 AND key = $2")
                .bind(name)
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        body.map(|b| into_document(name, b)).transpose()
    }

    async fn put(&self, collection: Collection, key: &str, doc: Document) -> Result<(), StoreError> {
        let name = self.name(collection);
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key)
            DO UPDATE SET body = EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(name)
        .bind(key)
        .bind(Value::Object(doc))
        .execute(&self.pool)
        .await?;

        debug!("put {name}/{key}");
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        key: &str,
        mut fields: Document,
    ) -> Result<(), StoreError> {
        let name = self.name(collection);
        // jsonb || jsonb merges top-level keys, right side wins
        fields.insert(
            collection.key_field().to_string(),
            Value::String(key.to_string()),
        );
        sqlx::query(
            r#"
            INSERT INTO documents (collection, key, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, key)
            DO UPDATE SET body = documents.body || EXCLUDED.body, updated_at = now()
            "#,
        )
        .bind(name)
        .bind(key)
        .bind(Value::Object(fields))
        .execute(&self.pool)
        .await?;

        debug!("update {name}/{key}");
        Ok(())
    }

    async fn find_by(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let name = self.name(collection);
        let bodies: Vec<Value> = sqlx::query_scalar(
            "SELECT body FROM documents WHERE collection = $1 AND body ->> $2 = $3 ORDER BY key",
        )
        .bind(name)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        bodies.into_iter().map(|b| into_document(name, b)).collect()
    }
}
