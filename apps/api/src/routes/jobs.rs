//! /api/jobs: recommendations and compatibility scoring.

use axum::http::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::routes::payload::{require, Payload};
use crate::state::AppState;
use crate::store::{from_document, Collection};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRequest {
    pub user_id: Option<String>,
    pub job_id: Option<String>,
}

pub async fn handle(
    state: &AppState,
    method: &Method,
    path: &str,
    payload: Payload,
) -> Result<Value, AppError> {
    if *method == Method::GET {
        let request: RecommendationsRequest = payload.parse()?;
        let user_id = require(request.user_id, "User ID required")?;

        // A user without a stored profile still gets (generic) recommendations.
        let profile: UserProfile = match state.store.get(Collection::Profiles, &user_id).await? {
            Some(doc) => from_document(doc)?,
            None => UserProfile::default(),
        };

        let jobs = state.advisor.recommend_jobs(&profile).await;
        return Ok(serde_json::to_value(jobs)?);
    }

    if *method == Method::POST && path.contains("/score") {
        let request: ScoreRequest = payload.parse()?;
        let (user_id, job_id) = match (request.user_id, request.job_id) {
            (Some(u), Some(j)) if !u.trim().is_empty() && !j.trim().is_empty() => (u, j),
            _ => {
                return Err(AppError::Validation(
                    "User ID and Job ID required".to_string(),
                ))
            }
        };

        let posting = state
            .store
            .get(Collection::JobPostings, &job_id)
            .await?
            .map(Value::Object);

        let score = state
            .advisor
            .score_job(&user_id, &job_id, posting.as_ref())
            .await;
        return Ok(json!({ "score": score }));
    }

    Err(AppError::MethodNotAllowed)
}
