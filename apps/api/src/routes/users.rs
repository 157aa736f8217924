//! /api/users: profile read, create/replace, partial update.

use axum::http::Method;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::routes::payload::{now_iso, require, Payload};
use crate::state::AppState;
use crate::store::{to_document, Collection};

pub async fn handle(
    state: &AppState,
    method: &Method,
    path: &str,
    payload: Payload,
) -> Result<Value, AppError> {
    match *method {
        Method::GET => get_profile(state, path).await,
        Method::POST => put_profile(state, payload).await,
        Method::PUT => patch_profile(state, payload).await,
        _ => Err(AppError::MethodNotAllowed),
    }
}

/// GET /api/users/{userId}: the id is the last path segment.
async fn get_profile(state: &AppState, path: &str) -> Result<Value, AppError> {
    let user_id = path.rsplit('/').next().unwrap_or_default();
    state
        .store
        .get(Collection::Profiles, user_id)
        .await?
        .map(Value::Object)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// POST /api/users: stores the whole profile, stamped with `updatedAt`.
async fn put_profile(state: &AppState, payload: Payload) -> Result<Value, AppError> {
    let mut profile: UserProfile = payload.parse()?;
    let user_id = require(profile.user_id.clone(), "User ID required")?;
    profile.user_id = Some(user_id.clone());
    profile.updated_at = Some(now_iso());

    let doc = to_document(&profile)?;
    state
        .store
        .put(Collection::Profiles, &user_id, doc.clone())
        .await?;
    Ok(Value::Object(doc))
}

/// PUT /api/users: sets every supplied field except `userId`.
async fn patch_profile(state: &AppState, payload: Payload) -> Result<Value, AppError> {
    let patch: UserProfile = payload.parse()?;
    let user_id = require(patch.user_id.clone(), "User ID required")?;

    let mut fields = to_document(&patch)?;
    fields.remove("userId");
    if fields.is_empty() {
        return Err(AppError::Validation("No fields to update".to_string()));
    }

    state
        .store
        .update(Collection::Profiles, &user_id, fields)
        .await?;
    Ok(json!({ "message": "User updated successfully" }))
}
