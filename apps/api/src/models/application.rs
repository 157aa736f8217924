use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const INITIAL_STATUS: &str = "applied";

/// Attributes the service sets itself; a client cannot supply them on create.
pub const SERVER_FIELDS: &[&str] = &["applicationId", "status", "appliedAt", "updatedAt"];

/// A tracked job application, keyed by `applicationId`.
/// `status` starts at "applied" and is free text afterwards. Client attributes
/// without a typed field (`position`, `salary`, `jobUrl`, ...) live in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    pub application_id: String,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: String,
    pub applied_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `app_<unix millis>`.
pub fn new_application_id(now: DateTime<Utc>) -> String {
    format!("app_{}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_application_id_is_prefixed_millis() {
        let now = Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap();
        assert_eq!(new_application_id(now), "app_1712318400000");
    }
}
