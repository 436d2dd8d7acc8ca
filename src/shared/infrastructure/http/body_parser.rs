// Buffers JSON and URL-encoded request bodies and exposes the parsed value as a request
// extension, so middleware running before the handler can inspect or rewrite the payload.
// The raw bytes are put back on the request; handlers still use the regular extractors.

use axum::{
    body::{Body, to_bytes},
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::shared::infrastructure::http::problem::problem;

/// Parsed request payload. Always an object for form bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody(pub Value);

#[derive(Debug, Clone, Copy)]
pub struct BodyParser {
    pub limit: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BodyParserError {
    #[error("Request body exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("Malformed JSON body")]
    MalformedJson,

    #[error("Malformed form body")]
    MalformedForm,
}

impl IntoResponse for BodyParserError {
    fn into_response(self) -> Response {
        let status = match self {
            BodyParserError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            BodyParserError::MalformedJson | BodyParserError::MalformedForm => {
                StatusCode::BAD_REQUEST
            }
        };
        problem(status, self.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Json,
    Form,
}

impl BodyKind {
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let content_type = headers.get(header::CONTENT_TYPE)?.to_str().ok()?;
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        if essence == "application/json" || essence.ends_with("+json") {
            Some(BodyKind::Json)
        } else if essence == "application/x-www-form-urlencoded" {
            Some(BodyKind::Form)
        } else {
            None
        }
    }

    pub fn parse(self, bytes: &[u8]) -> Result<Value, BodyParserError> {
        if bytes.is_empty() {
            return Ok(Value::Object(Map::new()));
        }
        match self {
            BodyKind::Json => {
                serde_json::from_slice(bytes).map_err(|_| BodyParserError::MalformedJson)
            }
            BodyKind::Form => {
                let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(bytes)
                    .map_err(|_| BodyParserError::MalformedForm)?;
                Ok(Value::Object(
                    pairs
                        .into_iter()
                        .map(|(key, value)| (key, Value::String(value)))
                        .collect(),
                ))
            }
        }
    }

    /// Serializes a (possibly rewritten) payload back into this content type.
    pub fn encode(self, value: &Value) -> Option<Vec<u8>> {
        match self {
            BodyKind::Json => serde_json::to_vec(value).ok(),
            BodyKind::Form => {
                let fields = value.as_object()?;
                let pairs: Vec<(&str, String)> = fields
                    .iter()
                    .map(|(key, value)| {
                        let value = match value {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        };
                        (key.as_str(), value)
                    })
                    .collect();
                serde_urlencoded::to_string(pairs)
                    .ok()
                    .map(String::into_bytes)
            }
        }
    }
}

pub async fn parse_body(
    State(parser): State<BodyParser>,
    request: Request,
    next: Next,
) -> Response {
    let Some(kind) = BodyKind::from_headers(request.headers()) else {
        return next.run(request).await;
    };

    let (mut parts, body) = request.into_parts();
    let bytes = match to_bytes(body, parser.limit).await {
        Ok(bytes) => bytes,
        Err(_) => {
            return BodyParserError::TooLarge {
                limit: parser.limit,
            }
            .into_response();
        }
    };

    match kind.parse(&bytes) {
        Ok(value) => {
            parts.extensions.insert(ParsedBody(value));
        }
        Err(err) => {
            tracing::debug!(error = %err, "rejecting unparsable request body");
            return err.into_response();
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
