//! Scripted inference client for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{InferenceClient, LlmError};

enum Scripted {
    Reply(Value),
    Fail { status: u16, message: String },
}

/// Plays back a fixed list of responses, repeating the last one once the
/// script runs out, and records every envelope it was sent.
pub struct ScriptedInference {
    script: Vec<Scripted>,
    requests: Mutex<Vec<Value>>,
}

impl ScriptedInference {
    pub fn new(script: Vec<Result<Value, LlmError>>) -> Self {
        let script = script
            .into_iter()
            .map(|step| match step {
                Ok(value) => Scripted::Reply(value),
                Err(LlmError::Api { status, message }) => Scripted::Fail { status, message },
                Err(other) => Scripted::Fail {
                    status: 500,
                    message: other.to_string(),
                },
            })
            .collect();
        Self {
            script,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answers every call with an Anthropic-shaped envelope carrying `text`.
    pub fn replying_text(text: &str) -> Self {
        Self::new(vec![Ok(json!({
            "content": [{"type": "text", "text": text}]
        }))])
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new(vec![Err(LlmError::Api {
            status,
            message: message.to_string(),
        })])
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// The user prompt of the n-th call (Anthropic envelope).
    pub fn prompt(&self, n: usize) -> String {
        self.requests()[n]["messages"][0]["content"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }
}

#[async_trait]
impl InferenceClient for ScriptedInference {
    async fn invoke_model(&self, _model_id: &str, body: &Value) -> Result<Value, LlmError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(body.clone());
            requests.len() - 1
        };

        let step = self
            .script
            .get(index)
            .or_else(|| self.script.last())
            .expect("ScriptedInference needs at least one scripted step");

        match step {
            Scripted::Reply(value) => Ok(value.clone()),
            Scripted::Fail { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
