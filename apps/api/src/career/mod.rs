// Career guidance tasks delegated to the hosted model.
// All model calls go through llm_client::ModelGateway.

pub mod advisor;
pub mod models;
pub mod prompts;

pub use advisor::CareerAdvisor;
