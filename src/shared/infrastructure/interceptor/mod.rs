// Validating interceptor: pairs a schema type with the part of the request it describes.
//
// Per request
// - Extract the target (parsed body or query string) and deserialize it into the schema.
// - Run the schema's `validator::Validate` rules.
// - Valid: forward the untouched request. Invalid: answer 400 with the field level errors.
//
// The interceptor holds no state, one instance per input shape is enough.

use std::marker::PhantomData;

use async_trait::async_trait;
use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use validator::{Validate, ValidationErrors};

use crate::shared::config::DEFAULT_BODY_LIMIT;
use crate::shared::infrastructure::filter::Filter;
use crate::shared::infrastructure::http::body_parser::{BodyKind, BodyParserError, ParsedBody};
use crate::shared::infrastructure::http::problem::{problem, problem_with};

pub const VALIDATION_FAILED_MESSAGE: &str = "Validation failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptTarget {
    Body,
    Query,
}

enum Rejection {
    Unreadable(String),
    Invalid(ValidationErrors),
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        match self {
            Rejection::Unreadable(reason) => problem(StatusCode::BAD_REQUEST, reason),
            Rejection::Invalid(errors) => {
                let mut extra = Map::new();
                extra.insert(
                    "errors".into(),
                    serde_json::to_value(&errors).unwrap_or(Value::Null),
                );
                problem_with(StatusCode::BAD_REQUEST, VALIDATION_FAILED_MESSAGE, extra)
            }
        }
    }
}

pub struct ValidatorInterceptor<T> {
    target: InterceptTarget,
    body_limit: usize,
    schema: PhantomData<fn() -> T>,
}

impl<T> ValidatorInterceptor<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    pub fn new(target: InterceptTarget) -> Self {
        Self {
            target,
            body_limit: DEFAULT_BODY_LIMIT,
            schema: PhantomData,
        }
    }

    pub fn body() -> Self {
        Self::new(InterceptTarget::Body)
    }

    pub fn query() -> Self {
        Self::new(InterceptTarget::Query)
    }

    /// Only used when the body has not already been buffered by the body parser.
    pub fn with_body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn target(&self) -> InterceptTarget {
        self.target
    }

    fn check(payload: Value) -> Result<(), Rejection> {
        let candidate: T = serde_json::from_value(payload)
            .map_err(|err| Rejection::Unreadable(format!("Unreadable payload: {err}")))?;
        candidate.validate().map_err(Rejection::Invalid)
    }

    fn query_payload(parts: &Parts) -> Result<Value, Rejection> {
        let raw = parts.uri.query().unwrap_or_default();
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .map_err(|_| Rejection::Unreadable("Malformed query string".into()))?;
        Ok(Value::Object(
            pairs
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        ))
    }

    async fn body_payload(&self, parts: &Parts, body: Body) -> Result<(Value, Body), Response> {
        if let Some(ParsedBody(value)) = parts.extensions.get::<ParsedBody>() {
            return Ok((value.clone(), body));
        }

        let bytes = to_bytes(body, self.body_limit).await.map_err(|_| {
            BodyParserError::TooLarge {
                limit: self.body_limit,
            }
            .into_response()
        })?;
        let kind = BodyKind::from_headers(&parts.headers).unwrap_or(BodyKind::Json);
        let value = kind.parse(&bytes).map_err(IntoResponse::into_response)?;
        Ok((value, Body::from(bytes)))
    }
}

#[async_trait]
impl<T> Filter for ValidatorInterceptor<T>
where
    T: DeserializeOwned + Validate + 'static,
{
    async fn filter(&self, request: Request, next: Next) -> Response {
        let (parts, body) = request.into_parts();

        let (payload, body) = match self.target {
            InterceptTarget::Query => match Self::query_payload(&parts) {
                Ok(payload) => (payload, body),
                Err(rejection) => return rejection.into_response(),
            },
            InterceptTarget::Body => match self.body_payload(&parts, body).await {
                Ok(found) => found,
                Err(response) => return response,
            },
        };

        if let Err(rejection) = Self::check(payload) {
            tracing::debug!(path = %parts.uri.path(), "request rejected by validator interceptor");
            return rejection.into_response();
        }

        next.run(Request::from_parts(parts, body)).await
    }
}
