//! /api/ai: free-form career guidance.

use axum::http::Method;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::AppError;
use crate::routes::payload::{present, require, string_or_list, Payload};
use crate::state::AppState;

pub const ANY_LOCATION: &str = "any location";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub current_role: Option<String>,
    pub target_role: Option<String>,
    #[serde(default, deserialize_with = "string_or_list")]
    pub skills: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsightsRequest {
    pub role: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewPrepRequest {
    pub job_id: Option<String>,
    pub job_description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAnalysisRequest {
    pub email_content: Option<String>,
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

    if path.contains("/career-roadmap") {
        let request: RoadmapRequest = payload.parse()?;
        let (current_role, target_role) =
            match (present(request.current_role), present(request.target_role)) {
                (Some(c), Some(t)) => (c, t),
                _ => {
                    return Err(AppError::Validation(
                        "Current role and target role required".to_string(),
                    ))
                }
            };
        let skills = request.skills.unwrap_or_default();
        let roadmap = state
            .advisor
            .career_roadmap(&current_role, &target_role, &skills)
            .await;
        Ok(serde_json::to_value(roadmap)?)
    } else if path.contains("/market-insights") {
        let request: MarketInsightsRequest = payload.parse()?;
        let role = require(request.role, "Role required")?;
        let location = present(request.location).unwrap_or_else(|| ANY_LOCATION.to_string());
        let insights = state.advisor.market_insights(&role, &location).await;
        Ok(serde_json::to_value(insights)?)
    } else if path.contains("/interview-prep") {
        let request: InterviewPrepRequest = payload.parse()?;
        let job_description = require(request.job_description, "Job description required")?;
        let questions = state.advisor.interview_questions(&job_description).await;

        let mut body = json!({ "questions": questions });
        if let Some(job_id) = present(request.job_id) {
            body["jobId"] = Value::String(job_id);
        }
        Ok(body)
    } else if path.contains("/analyze-email") {
        let request: EmailAnalysisRequest = payload.parse()?;
        let email_content = require(request.email_content, "Email content required")?;
        let analysis = state.advisor.analyze_interview_email(&email_content).await;
        Ok(serde_json::to_value(analysis)?)
    } else {
        Err(AppError::MethodNotAllowed)
    }
}
