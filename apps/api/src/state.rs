use std::sync::Arc;

use crate::blob::BlobStore;
use crate::career::CareerAdvisor;
use crate::store::DocumentStore;

/// Shared application state, built once in `main` and handed to the router.
/// Every collaborator is constructed explicitly; nothing is lazily global.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub blobs: Arc<dyn BlobStore>,
    pub advisor: CareerAdvisor,
}
