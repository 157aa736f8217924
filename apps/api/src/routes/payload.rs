//! Request-boundary helpers: typed payload parsing and presence checks.

use chrono::{SecondsFormat, Utc};
use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// A request body that is known to be a JSON object (or absent).
#[derive(Debug, Clone, Default)]
pub struct Payload(Map<String, Value>);

impl Payload {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        match body {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self(map)),
            _ => Err(AppError::Validation(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }

    /// Deserializes into the endpoint's request record. Wrong field types are
    /// a 400. Records that are stored keep unknown fields in a flattened map;
    /// task inputs ignore them.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, AppError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| AppError::Validation(format!("Invalid request body: {e}")))
    }
}

/// A present, non-blank string field.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn require(value: Option<String>, message: &str) -> Result<String, AppError> {
    present(value).ok_or_else(|| AppError::Validation(message.to_string()))
}

/// UTC now, ISO-8601 with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrList {
    List(Vec<String>),
    Csv(String),
}

/// Accepts `["a", "b"]` or `"a, b"` (the latter is what a query string gives us).
pub fn string_or_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<StringOrList>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        StringOrList::List(items) => items,
        StringOrList::Csv(text) => text
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct SkillsRequest {
        #[serde(default, deserialize_with = "string_or_list")]
        skills: Option<Vec<String>>,
        user_id: Option<String>,
    }

    #[test]
    fn test_from_body_accepts_null_and_objects() {
        assert!(Payload::from_body(Value::Null).is_ok());
        assert!(Payload::from_body(json!({"a": 1})).is_ok());
    }

    #[test]
    fn test_from_body_rejects_other_shapes() {
        for body in [json!([1, 2]), json!("text"), json!(3)] {
            let err = Payload::from_body(body).unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[test]
    fn test_parse_reports_type_errors_as_validation() {
        let payload = Payload::from_body(json!({"userId": 42})).unwrap();
        let err = payload.parse::<SkillsRequest>().unwrap_err();
        assert!(err.to_string().starts_with("Invalid request body"));
    }

    #[test]
    fn test_skills_from_list_or_csv() {
        let from_list: SkillsRequest =
            Payload::from_body(json!({"skills": ["Rust", "Go"]})).unwrap().parse().unwrap();
        let from_csv: SkillsRequest =
            Payload::from_body(json!({"skills": "Rust, Go,"})).unwrap().parse().unwrap();
        let absent: SkillsRequest = Payload::from_body(json!({})).unwrap().parse().unwrap();

        assert_eq!(from_list.skills, from_csv.skills);
        assert_eq!(from_csv.skills.unwrap(), vec!["Rust", "Go"]);
        assert!(absent.skills.is_none());
        assert!(absent.user_id.is_none());
    }

    #[test]
    fn test_require_treats_blank_as_missing() {
        assert!(require(Some("  ".into()), "User ID required").is_err());
        assert!(require(None, "User ID required").is_err());
        assert_eq!(require(Some("u1".into()), "x").unwrap(), "u1");
    }

    #[test]
    fn test_now_iso_is_utc() {
        assert!(now_iso().ends_with('Z'));
    }
}
