// Lets clients that can only send POST reach PUT, PATCH, DELETE, ... routes.
//
// Sources, in order of precedence
// - `_method` field of an object shaped body (removed from the forwarded body).
// - `X-HTTP-Method-Override` header.
//
// Only POST requests are rewritten and unknown method tokens are ignored. Must run ahead of
// routing and after the body parser, which provides the `ParsedBody` extension.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, HeaderValue, Method, header, request::Parts},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::shared::infrastructure::http::body_parser::{BodyKind, ParsedBody};

pub const METHOD_OVERRIDE_HEADER: &str = "x-http-method-override";
pub const METHOD_OVERRIDE_FIELD: &str = "_method";

/// Method the client actually sent, recorded when it was overridden.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalMethod(pub Method);

pub async fn method_override(request: Request, next: Next) -> Response {
    if request.method() != Method::POST {
        return next.run(request).await;
    }

    let (mut parts, body) = request.into_parts();
    let from_header = header_override(&parts.headers);
    let (from_body, body) = match take_body_override(&mut parts) {
        Some((method, rewritten)) => (method, rewritten),
        None => (None, body),
    };

    if let Some(method) = from_body.or(from_header) {
        tracing::debug!(from = %parts.method, to = %method, "overriding request method");
        let original = std::mem::replace(&mut parts.method, method);
        parts.extensions.insert(OriginalMethod(original));
    }

    next.run(Request::from_parts(parts, body)).await
}

fn header_override(headers: &HeaderMap) -> Option<Method> {
    headers
        .get(METHOD_OVERRIDE_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.split(',').next())
        .and_then(supported_method)
}

/// Removes `_method` from the parsed body and re-encodes the payload without it.
/// Returns `None` when the body carries no override field at all.
fn take_body_override(parts: &mut Parts) -> Option<(Option<Method>, Body)> {
    let kind = BodyKind::from_headers(&parts.headers)?;
    let ParsedBody(value) = parts.extensions.get_mut::<ParsedBody>()?;
    let removed = value.as_object_mut()?.remove(METHOD_OVERRIDE_FIELD)?;

    let bytes = kind.encode(value)?;
    if let Ok(length) = HeaderValue::from_str(&bytes.len().to_string()) {
        parts.headers.insert(header::CONTENT_LENGTH, length);
    }

    let method = match removed {
        Value::String(raw) => supported_method(&raw),
        _ => None,
    };
    Some((method, Body::from(bytes)))
}

fn supported_method(raw: &str) -> Option<Method> {
    let method = Method::from_bytes(raw.trim().to_ascii_uppercase().as_bytes()).ok()?;
    [
        Method::GET,
        Method::HEAD,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
        Method::TRACE,
        Method::CONNECT,
    ]
    .contains(&method)
    .then_some(method)
}
