use axum::{
    extract::OriginalUri,
    http::{StatusCode, Uri},
    response::Response,
};
use serde_json::{Map, Value};

use crate::shared::infrastructure::http::problem::problem_with;

pub const INVALID_URL_MESSAGE: &str = "Invalid URL";

/// Terminal catch-all answering every request no route took with the invalid URL response.
#[derive(Debug, Default, Clone, Copy)]
pub struct InvalidUrlFilter;

impl InvalidUrlFilter {
    pub fn respond(&self, uri: &Uri) -> Response {
        tracing::debug!(path = %uri.path(), "no route matched");
        let mut extra = Map::new();
        extra.insert("path".into(), Value::String(uri.path().to_string()));
        problem_with(StatusCode::NOT_FOUND, INVALID_URL_MESSAGE, extra)
    }
}

/// Router fallback handler. Nested routers strip their prefix, so the path comes from `OriginalUri`.
pub async fn fallback(OriginalUri(uri): OriginalUri) -> Response {
    InvalidUrlFilter.respond(&uri)
}
