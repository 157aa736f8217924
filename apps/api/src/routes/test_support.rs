//! Shared fixtures for router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::blob::MemoryBlobStore;
use crate::career::CareerAdvisor;
use crate::llm_client::testing::ScriptedInference;
use crate::llm_client::ModelGateway;
use crate::state::AppState;
use crate::store::{Collection, Document, DocumentStore, MemoryDocumentStore, StoreError};

pub const TEST_MODEL: &str = "anthropic.claude-3-5-haiku-20241022-v1:0";
pub const TEST_BUCKET: &str = "career-agent-resumes";

/// Memory store that counts every operation it serves.
#[derive(Default)]
pub struct CountingStore {
    inner: MemoryDocumentStore,
    ops: AtomicUsize,
}

impl CountingStore {
    pub fn ops(&self) -> usize {
        self.ops.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.ops.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    async fn get(&self, collection: Collection, key: &str) -> Result<Option<Document>, StoreError> {
        self.tick();
        self.inner.get(collection, key).await
    }

    async fn put(&self, collection: Collection, key: &str, doc: Document) -> Result<(), StoreError> {
        self.tick();
        self.inner.put(collection, key, doc).await
    }

    async fn update(
        &self,
        collection: Collection,
        key: &str,
        fields: Document,
    ) -> Result<(), StoreError> {
        self.tick();
        self.inner.update(collection, key, fields).await
    }

    async fn find_by(
        &self,
        collection: Collection,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        self.tick();
        self.inner.find_by(collection, field, value).await
    }
}

pub struct Harness {
    pub state: AppState,
    pub store: Arc<CountingStore>,
    pub blobs: Arc<MemoryBlobStore>,
    pub inference: Arc<ScriptedInference>,
}

pub fn harness(inference: ScriptedInference) -> Harness {
    let store = Arc::new(CountingStore::default());
    let blobs = Arc::new(MemoryBlobStore::new(TEST_BUCKET));
    let inference = Arc::new(inference);
    let state = AppState {
        store: store.clone(),
        blobs: blobs.clone(),
        advisor: CareerAdvisor::new(ModelGateway::new(inference.clone(), TEST_MODEL)),
    };
    Harness {
        state,
        store,
        blobs,
        inference,
    }
}

/// A harness whose model answers every call with `text`.
pub fn harness_replying(text: &str) -> Harness {
    harness(ScriptedInference::replying_text(text))
}
