//! Transport-neutral request/response envelopes. The router only ever sees
//! these; the axum front end converts to and from HTTP.

use std::collections::BTreeMap;

use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// JSON payload; `Null` when the request had no body.
    #[serde(default)]
    pub body: Value,
}

impl RequestEnvelope {
    pub fn new(method: &str, path: &str, body: Value) -> Self {
        Self {
            method: method.to_string(),
            path: path.to_string(),
            headers: BTreeMap::new(),
            body,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    /// JSON-encoded body.
    pub body: String,
}

/// Sent on every response, errors and pre-flight included.
pub fn standard_headers() -> BTreeMap<String, String> {
    [
        ("Content-Type", "application/json"),
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Headers", "Content-Type,Authorization"),
        ("Access-Control-Allow-Methods", "GET,POST,PUT,DELETE,OPTIONS"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl ResponseEnvelope {
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status_code: status.as_u16(),
            headers: standard_headers(),
            body: body.to_string(),
        }
    }

    pub fn ok(body: &Value) -> Self {
        Self::json(StatusCode::OK, body)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                headers.insert(name, value);
            }
        }

        (status, headers, self.body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_envelope_defaults() {
        let envelope: RequestEnvelope =
            serde_json::from_value(json!({"method": "GET", "path": "/api/users/u1"})).unwrap();
        assert!(envelope.headers.is_empty());
        assert!(envelope.body.is_null());
    }

    #[test]
    fn test_response_envelope_wire_names() {
        let envelope = ResponseEnvelope::ok(&json!({"score": 70}));
        let wire = serde_json::to_value(&envelope).unwrap();
        assert_eq!(wire["statusCode"], 200);
        assert_eq!(wire["body"], r#"{"score":70}"#);
    }

    #[test]
    fn test_into_response_copies_status_and_headers() {
        let response = ResponseEnvelope::json(StatusCode::NOT_FOUND, &json!({})).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers()["access-control-allow-origin"],
            HeaderValue::from_static("*")
        );
        assert_eq!(
            response.headers()["content-type"],
            HeaderValue::from_static("application/json")
        );
    }
}
