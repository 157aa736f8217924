//! Model gateway: the single point of entry for all inference calls.
//!
//! No other module talks to the inference endpoint directly. Callers hand a
//! prompt and a token budget to `ModelGateway::invoke` and get reply text
//! back; `extract` turns that text into typed data.
//!
//! Failure contract: `invoke` never retries and never substitutes a value.
//! Transport, auth and decode failures are returned to the caller as `LlmError`.
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub mod extract;
pub mod families;
pub mod prompts;
#[cfg(test)]
pub mod testing;

pub use extract::{extract_structured, StructuredKind};
pub use families::ModelFamily;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw transport to the hosted inference capability.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Sends one invoke envelope for `model_id` and returns the decoded
    /// response envelope.
    async fn invoke_model(&self, model_id: &str, body: &Value) -> Result<Value, LlmError>;
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Bedrock-style runtime endpoint: `POST {endpoint}/model/{model_id}/invoke`
/// with bearer-token auth.
#[derive(Clone)]
pub struct HttpInferenceClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpInferenceClient {
    pub fn new(endpoint: String, api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()?,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn invoke_url(&self, model_id: &str) -> String {
        format!(
            "{}/model/{}/invoke",
            self.endpoint,
            model_id.replace(':', "%3A")
        )
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn invoke_model(&self, model_id: &str, body: &Value) -> Result<Value, LlmError> {
        let response = self
            .client
            .post(self.invoke_url(model_id))
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Builds the envelope for the configured model family, invokes the model and
/// pulls the reply text out of the response. The family is resolved once, here.
#[derive(Clone)]
pub struct ModelGateway {
    client: Arc<dyn InferenceClient>,
    model_id: String,
    family: ModelFamily,
}

impl ModelGateway {
    pub fn new(client: Arc<dyn InferenceClient>, model_id: impl Into<String>) -> Self {
        let model_id = model_id.into();
        let family = ModelFamily::resolve(&model_id);
        Self {
            client,
            model_id,
            family,
        }
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub async fn invoke(&self, prompt: &str, max_tokens: u32) -> Result<String, LlmError> {
        let body = self.family.build_request(prompt, max_tokens);
        let response = self.client.invoke_model(&self.model_id, &body).await?;
        let text = self.family.extract_text(&response);

        debug!(
            "Model call succeeded: model={} prompt_chars={} reply_chars={}",
            self.model_id,
            prompt.chars().count(),
            text.chars().count()
        );
        Ok(text)
    }
}
