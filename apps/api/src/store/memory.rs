use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Collection, Document, DocumentStore, StoreError};

/// Process-local document store used in demo mode and tests.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    docs: Arc<RwLock<HashMap<(Collection, String), Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Document>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.get(&(collection, key.to_string())).cloned())
    }

    async fn put(&self, collection: Collection, key: &str, doc: Document) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        docs.insert((collection, key.to_string()), doc);
        Ok(())
    }

    async fn update(
        &self,
        collection: Collection,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        let doc = docs
            .entry((collection, key.to_string()))
            .or_insert_with(|| {
                let mut fresh = Document::new();
                fresh.insert(
                    collection.key_field().to_string(),
                    Value::String(key.to_string()),
                );
                fresh
            });
        doc.extend(fields);
        Ok(())
    }

    async fn find_by(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs
            .iter()
            .filter(|((c, _), doc)| {
                *c == collection && doc.get(field).and_then(Value::as_str) == Some(value)
            })
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let store = MemoryDocumentStore::new();
        store
            .put(Collection::Profiles, "u1", doc(json!({"userId": "u1", "skills": ["Rust"]})))
            .await
            .unwrap();

        let fetched = store.get(Collection::Profiles, "u1").await.unwrap().unwrap();
        assert_eq!(fetched["skills"], json!(["Rust"]));
        assert!(store.get(Collection::Applications, "u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_merges_fields() {
        let store = MemoryDocumentStore::new();
        store
            .put(
                Collection::Profiles,
                "u1",
                doc(json!({"userId": "u1", "currentRole": "Analyst", "skills": ["SQL"]})),
            )
            .await
            .unwrap();
        store
            .update(Collection::Profiles, "u1", doc(json!({"currentRole": "Engineer"})))
            .await
            .unwrap();

        let fetched = store.get(Collection::Profiles, "u1").await.unwrap().unwrap();
        assert_eq!(fetched["currentRole"], "Engineer");
        assert_eq!(fetched["skills"], json!(["SQL"]));
    }

    #[tokio::test]
    async fn test_update_creates_missing_document_with_key() {
        let store = MemoryDocumentStore::new();
        store
            .update(Collection::Applications, "app_1", doc(json!({"status": "offer"})))
            .await
            .unwrap();

        let fetched = store
            .get(Collection::Applications, "app_1")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched["applicationId"], "app_1");
        assert_eq!(fetched["status"], "offer");
    }

    #[tokio::test]
    async fn test_find_by_filters_collection_and_field() {
        let store = MemoryDocumentStore::new();
        for (key, user) in [("app_1", "u1"), ("app_2", "u2"), ("app_3", "u1")] {
            store
                .put(
                    Collection::Applications,
                    key,
                    doc(json!({"applicationId": key, "userId": user})),
                )
                .await
                .unwrap();
        }
        store
            .put(Collection::Profiles, "u1", doc(json!({"userId": "u1"})))
            .await
            .unwrap();

        let found = store
            .find_by(Collection::Applications, "userId", "u1")
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
    }
}
