use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{Map, Value, json};

/// JSON error body shared by every response this crate produces on its own.
pub fn problem(status: StatusCode, message: impl Into<String>) -> Response {
    problem_with(status, message, Map::new())
}

/// Same as [`problem`], with extra top level fields merged into the body.
pub fn problem_with(
    status: StatusCode,
    message: impl Into<String>,
    extra: Map<String, Value>,
) -> Response {
    let mut body = json!({
        "status": status.as_u16(),
        "message": message.into(),
        "timestamp": Utc::now().to_rfc3339(),
    });
    if let Value::Object(fields) = &mut body {
        fields.extend(extra);
    }
    (status, Json(body)).into_response()
}
