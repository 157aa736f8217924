mod blob;
mod career;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;

use crate::blob::{BlobStore, MemoryBlobStore, S3BlobStore};
use crate::career::CareerAdvisor;
use crate::config::{Config, StorageBackend};
use crate::db::{create_pool, ensure_schema};
use crate::llm_client::{HttpInferenceClient, ModelGateway};
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{DocumentStore, MemoryDocumentStore, PgDocumentStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (aborts on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting career API v{}", env!("CARGO_PKG_VERSION"));

    let (store, blobs) = build_storage(&config).await?;

    // Initialize the model gateway
    let inference = HttpInferenceClient::new(
        config.inference_endpoint.clone(),
        config.inference_api_key.clone(),
    )?;
    let gateway = ModelGateway::new(Arc::new(inference), config.model_id.clone());
    info!(
        "Model gateway initialized (model: {}, family: {})",
        gateway.model_id(),
        gateway.family().as_str()
    );

    let state = AppState {
        store,
        blobs,
        advisor: CareerAdvisor::new(gateway),
    };

    let app = build_router(state).layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_storage(
    config: &Config,
) -> Result<(Arc<dyn DocumentStore>, Arc<dyn BlobStore>)> {
    match config.storage_backend {
        StorageBackend::Persistent => {
            let database_url = config
                .database_url
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is required for persistent storage"))?;
            let pool = create_pool(database_url).await?;
            ensure_schema(&pool).await?;

            let s3 = build_s3_client(config).await;
            info!("S3 client initialized (bucket: {})", config.resumes_bucket);

            Ok((
                Arc::new(PgDocumentStore::new(pool, config.tables.clone())),
                Arc::new(S3BlobStore::new(s3, config.resumes_bucket.clone())),
            ))
        }
        StorageBackend::Memory => {
            info!("Using in-memory storage; data is lost on restart");
            Ok((
                Arc::new(MemoryDocumentStore::new()),
                Arc::new(MemoryBlobStore::new(config.resumes_bucket.clone())),
            ))
        }
    }
}

/// Constructs an S3 client for AWS, or for MinIO when `S3_ENDPOINT` is set.
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.aws_region.clone()));

    if let (Some(key_id), Some(secret)) = (
        config.aws_access_key_id.as_deref(),
        config.aws_secret_access_key.as_deref(),
    ) {
        loader = loader.credentials_provider(Credentials::new(
            key_id,
            secret,
            None,
            None,
            "career-api-static",
        ));
    }

    let shared = loader.load().await;
    let mut s3_config = aws_sdk_s3::config::Builder::from(&shared);
    if let Some(endpoint) = &config.s3_endpoint {
        s3_config = s3_config.endpoint_url(endpoint).force_path_style(true);
    }

    aws_sdk_s3::Client::from_conf(s3_config.build())
}
