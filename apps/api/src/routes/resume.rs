//! /api/resume: analysis, tailoring and file upload.

use axum::http::Method;
use base64::Engine;
use bytes::Bytes;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::errors::AppError;
use crate::routes::payload::{now_iso, present, require, Payload};
use crate::state::AppState;
use crate::store::Collection;

const RESUME_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub resume_text: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailorRequest {
    pub resume_text: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub user_id: Option<String>,
    /// Base64-encoded file bytes.
    pub file_content: Option<String>,
    pub file_name: Option<String>,
}

pub async fn handle(
    state: &AppState,
    method: &Method,
    path: &str,
    payload: Payload,
) -> Result<Value, AppError> {
    if *method != Method::POST {
        return Err(AppError::MethodNotAllowed);
    }

    if path.contains("/analyze") {
        analyze(state, payload.parse()?).await
    } else if path.contains("/tailor") {
        tailor(state, payload.parse()?).await
    } else if path.contains("/upload") {
        upload(state, payload.parse()?).await
    } else {
        Err(AppError::MethodNotAllowed)
    }
}

/// The analysis is written onto the profile only when `userId` is given.
async fn analyze(state: &AppState, request: AnalyzeRequest) -> Result<Value, AppError> {
    let resume_text = require(request.resume_text, "Resume text required")?;

    let analysis = serde_json::to_value(state.advisor.analyze_resume(&resume_text).await?)?;

    if let Some(user_id) = present(request.user_id) {
        let mut fields = Map::new();
        fields.insert("resumeAnalysis".to_string(), analysis.clone());
        fields.insert("updatedAt".to_string(), Value::String(now_iso()));
        state
            .store
            .update(Collection::Profiles, &user_id, fields)
            .await?;
    }

    Ok(analysis)
}

async fn tailor(state: &AppState, request: TailorRequest) -> Result<Value, AppError> {
    let (resume_text, job_description) =
        match (present(request.resume_text), present(request.job_description)) {
            (Some(r), Some(j)) => (r, j),
            _ => {
                return Err(AppError::Validation(
                    "Resume text and job description required".to_string(),
                ))
            }
        };

    let suggestions = state
        .advisor
        .tailor_resume(&resume_text, &job_description)
        .await;
    Ok(serde_json::to_value(suggestions)?)
}

async fn upload(state: &AppState, request: UploadRequest) -> Result<Value, AppError> {
    let (user_id, file_content, file_name) = match (
        present(request.user_id),
        present(request.file_content),
        present(request.file_name),
    ) {
        (Some(u), Some(c), Some(n)) => (u, c, n),
        _ => {
            return Err(AppError::Validation(
                "User ID, file content, and file name required".to_string(),
            ))
        }
    };

    if file_name.contains(['/', '\\']) {
        return Err(AppError::Validation("Invalid file name".to_string()));
    }

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(file_content.trim())
        .map_err(|_| AppError::Validation("fileContent must be base64-encoded".to_string()))?;

    let key = format!("{user_id}/{file_name}");
    let url = state
        .blobs
        .put(&key, Bytes::from(bytes), RESUME_CONTENT_TYPE)
        .await?;
    info!("Stored resume {key} for user {user_id}");

    let mut fields = Map::new();
    fields.insert("resumeUrl".to_string(), Value::String(url));
    fields.insert("updatedAt".to_string(), Value::String(now_iso()));
    state
        .store
        .update(Collection::Profiles, &user_id, fields)
        .await?;

    Ok(json!({ "resumeUrl": key }))
}
