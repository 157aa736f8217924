//! /api/applications: application tracking.

use axum::http::Method;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::errors::AppError;
use crate::models::application::{
    new_application_id, JobApplication, INITIAL_STATUS, SERVER_FIELDS,
};
use crate::routes::payload::{now_iso, present, require, Payload};
use crate::state::AppState;
use crate::store::{to_document, Collection};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub user_id: Option<String>,
    pub job_id: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateRequest {
    pub application_id: Option<String>,
    pub status: Option<String>,
}

pub async fn handle(
    state: &AppState,
    method: &Method,
    _path: &str,
    payload: Payload,
) -> Result<Value, AppError> {
    match *method {
        Method::GET => list(state, payload.parse()?).await,
        Method::POST => create(state, payload.parse()?).await,
        Method::PUT => update_status(state, payload.parse()?).await,
        _ => Err(AppError::MethodNotAllowed),
    }
}

/// Oldest first.
async fn list(state: &AppState, request: ListRequest) -> Result<Value, AppError> {
    let user_id = require(request.user_id, "User ID required")?;
    let mut applications = state
        .store
        .find_by(Collection::Applications, "userId", &user_id)
        .await?;

    applications.sort_by(|a, b| {
        let applied = |d: &Map<String, Value>| {
            d.get("appliedAt")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        applied(a).cmp(&applied(b))
    });

    Ok(Value::Array(
        applications.into_iter().map(Value::Object).collect(),
    ))
}

/// Stores the request wholesale; only the server-managed attributes are
/// overwritten.
async fn create(state: &AppState, request: CreateRequest) -> Result<Value, AppError> {
    let user_id = require(request.user_id, "User ID required")?;
    let mut extra = request.extra;
    for field in SERVER_FIELDS {
        extra.remove(*field);
    }
    let now = Utc::now();

    let application = JobApplication {
        application_id: new_application_id(now),
        user_id,
        job_id: present(request.job_id),
        job_title: present(request.job_title),
        company: present(request.company),
        notes: present(request.notes),
        status: INITIAL_STATUS.to_string(),
        applied_at: now.to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        updated_at: None,
        extra,
    };

    let doc = to_document(&application)?;
    state
        .store
        .put(Collection::Applications, &application.application_id, doc.clone())
        .await?;
    Ok(Value::Object(doc))
}

async fn update_status(state: &AppState, request: StatusUpdateRequest) -> Result<Value, AppError> {
    let (application_id, status) = match (present(request.application_id), present(request.status))
    {
        (Some(id), Some(status)) => (id, status),
        _ => {
            return Err(AppError::Validation(
                "Application ID and status required".to_string(),
            ))
        }
    };

    let mut fields = Map::new();
    fields.insert("status".to_string(), Value::String(status));
    fields.insert("updatedAt".to_string(), Value::String(now_iso()));
    state
        .store
        .update(Collection::Applications, &application_id, fields)
        .await?;

    Ok(json!({ "message": "Application updated" }))
}
