pub mod ai;
pub mod applications;
pub mod envelope;
pub mod health;
pub mod jobs;
pub mod market;
pub mod payload;
pub mod resume;
pub mod users;

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, Method, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::errors::AppError;
use crate::routes::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::routes::payload::Payload;
use crate::state::AppState;

/// Resource groups, matched by path prefix in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Jobs,
    Users,
    Resume,
    Ai,
    Applications,
    MarketIntelligence,
}

const ROUTE_TABLE: &[(&str, Group)] = &[
    ("/api/jobs", Group::Jobs),
    ("/api/users", Group::Users),
    ("/api/resume", Group::Resume),
    ("/api/ai", Group::Ai),
    ("/api/applications", Group::Applications),
    ("/api/market-intelligence", Group::MarketIntelligence),
];

fn select_group(path: &str) -> Option<Group> {
    ROUTE_TABLE
        .iter()
        .find(|(prefix, _)| path.starts_with(prefix))
        .map(|(_, group)| *group)
}

/// Routes one request envelope to its handler and always answers with an
/// envelope; failures become error envelopes.
pub async fn dispatch(state: &AppState, request: RequestEnvelope) -> ResponseEnvelope {
    info!("Request: {} {}", request.method, request.path);

    // An unparseable method token is only a 405 once the path has matched.
    let method = Method::from_bytes(request.method.to_ascii_uppercase().as_bytes()).ok();

    // Pre-flight is answered before any routing.
    if method == Some(Method::OPTIONS) {
        return ResponseEnvelope::ok(&json!({}));
    }

    match route(state, method.as_ref(), &request.path, request.body).await {
        Ok(body) => ResponseEnvelope::ok(&body),
        Err(e) => e.into_envelope(),
    }
}

async fn route(
    state: &AppState,
    method: Option<&Method>,
    path: &str,
    body: Value,
) -> Result<Value, AppError> {
    let group = select_group(path).ok_or_else(|| AppError::NotFound("Not found".to_string()))?;
    let method = method.ok_or(AppError::MethodNotAllowed)?;
    let payload = Payload::from_body(body)?;

    match group {
        Group::Jobs => jobs::handle(state, method, path, payload).await,
        Group::Users => users::handle(state, method, path, payload).await,
        Group::Resume => resume::handle(state, method, path, payload).await,
        Group::Ai => ai::handle(state, method, path, payload).await,
        Group::Applications => applications::handle(state, method, path, payload).await,
        Group::MarketIntelligence => market::handle(state, method, path, payload).await,
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .fallback(handle_http)
        .with_state(state)
}

/// HTTP front end: request → envelope → dispatch → HTTP response.
async fn handle_http(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let mut body = decode_body(&body);
    merge_query(&mut body, &uri);

    let envelope = RequestEnvelope {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect(),
        body,
    };

    dispatch(&state, envelope).await.into_response()
}

/// Empty → `Null`. Anything that is not JSON is passed through as a string so
/// the router can reject it after the pre-flight check.
fn decode_body(raw: &[u8]) -> Value {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(raw)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(raw).into_owned()))
}

/// Query parameters fill in fields the body does not set. This is how GET
/// callers pass `userId`, `role`, `skills` and friends.
fn merge_query(body: &mut Value, uri: &Uri) {
    let Ok(Query(params)) = Query::<HashMap<String, String>>::try_from_uri(uri) else {
        return;
    };
    if params.is_empty() {
        return;
    }
    if body.is_null() {
        *body = Value::Object(Default::default());
    }
    if let Value::Object(map) = body {
        for (key, value) in params {
            map.entry(key).or_insert(Value::String(value));
        }
    }
}

#[cfg(test)]
mod test_support;
