//! Blob store for uploaded resume files.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::info;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("Upload of '{key}' failed: {message}")]
    Upload { key: String, message: String },
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Stores `body` under `key` and returns the object's location URL.
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, BlobError>;
}

/// S3 (or MinIO) bucket.
#[derive(Clone)]
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BlobStore {
    pub fn new(client: aws_sdk_s3::Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, BlobError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| BlobError::Upload {
                key: key.to_string(),
                message: e.to_string(),
            })?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(format!("s3://{}/{}", self.bucket, key))
    }
}

#[derive(Debug, Clone)]
pub struct StoredBlob {
    pub body: Bytes,
    pub content_type: String,
}

/// In-process bucket for demo mode and tests.
#[derive(Clone)]
pub struct MemoryBlobStore {
    bucket: String,
    objects: Arc<RwLock<HashMap<String, StoredBlob>>>,
}

impl MemoryBlobStore {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    #[cfg(test)]
    pub async fn get(&self, key: &str) -> Option<StoredBlob> {
        self.objects.read().await.get(key).cloned()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, key: &str, body: Bytes, content_type: &str) -> Result<String, BlobError> {
        self.objects.write().await.insert(
            key.to_string(),
            StoredBlob {
                body,
                content_type: content_type.to_string(),
            },
        );
        Ok(format!("memory://{}/{}", self.bucket, key))
    }
}
