use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::modules::auth::interceptor::forgot_password::ForgotPasswordBody;
use crate::shared::infrastructure::http::body_parser::ParsedBody;

pub const RESET_REQUESTED_MESSAGE: &str =
    "If an account exists for this email, a reset link has been sent";

#[derive(Serialize)]
pub struct ForgotPasswordResponse {
    pub message: &'static str,
}

// Answers the same way whether or not the account exists.
// JSON and URL-encoded bodies arrive already parsed; without the body parser the JSON is read here.
pub async fn handle(request: Request) -> Response {
    let parsed = request.extensions().get::<ParsedBody>().cloned();
    let body = match parsed {
        Some(ParsedBody(value)) => serde_json::from_value::<ForgotPasswordBody>(value).ok(),
        None => Json::<ForgotPasswordBody>::from_request(request, &())
            .await
            .ok()
            .map(|Json(body)| body),
    };
    let Some(body) = body else {
        return StatusCode::UNPROCESSABLE_ENTITY.into_response();
    };

    tracing::debug!(has_email = body.email.is_some(), "password reset requested");

    (
        StatusCode::ACCEPTED,
        Json(ForgotPasswordResponse {
            message: RESET_REQUESTED_MESSAGE,
        }),
    )
        .into_response()
}
