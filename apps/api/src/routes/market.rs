//! /api/market-intelligence: salary trends and skill demand.

use axum::http::Method;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::AppError;
use crate::routes::ai::ANY_LOCATION;
use crate::routes::payload::{present, require, string_or_list, Payload};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalaryTrendsRequest {
    pub role: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDemandRequest {
    #[serde(default, deserialize_with = "string_or_list")]
    pub skills: Option<Vec<String>>,
}

pub async fn handle(
    state: &AppState,
    method: &Method,
    path: &str,
    payload: Payload,
) -> Result<Value, AppError> {
    if *method == Method::GET && path.contains("/salary-trends") {
        let request: SalaryTrendsRequest = payload.parse()?;
        let role = require(request.role, "Role required")?;
        let location = present(request.location).unwrap_or_else(|| ANY_LOCATION.to_string());
        let trends = state.advisor.salary_trends(&role, &location).await;
        return Ok(serde_json::to_value(trends)?);
    }

    if *method == Method::GET && path.contains("/skill-demand") {
        let request: SkillDemandRequest = payload.parse()?;
        let skills = request.skills.unwrap_or_default();
        if skills.is_empty() {
            return Err(AppError::Validation("Skills required".to_string()));
        }
        let demand = state.advisor.skill_demand(&skills).await;
        return Ok(serde_json::to_value(demand)?);
    }

    Err(AppError::MethodNotAllowed)
}
