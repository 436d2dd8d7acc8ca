use std::sync::Arc;

use axum::{Router, routing::post};
use serde_json::{Value, json};

use crate::modules::auth::interceptor::forgot_password::forgot_password_interceptor;
use crate::modules::auth::use_cases::forgot_password::inbound::http as forgot_password_http;
use crate::shared::infrastructure::filter::guard;
use crate::shared::infrastructure::resolver::module_resolver::Module;

pub const AUTH_PREFIX: &str = "/auth";

#[derive(Debug, Default, Clone, Copy)]
pub struct AuthModule;

impl AuthModule {
    /// OpenAPI operations for the routes of this module, keyed by path relative to `/api`.
    pub fn operations() -> Vec<(&'static str, String, Value)> {
        vec![(
            "post",
            format!("{AUTH_PREFIX}/forgot-password"),
            json!({
                "summary": "Request a password reset link",
                "tags": ["auth"],
                "requestBody": {
                    "required": true,
                    "content": {
                        "application/json": {
                            "schema": {
                                "type": "object",
                                "required": ["email"],
                                "properties": {
                                    "email": { "type": "string", "format": "email" }
                                }
                            }
                        }
                    }
                },
                "responses": {
                    "202": { "description": "Reset requested" },
                    "400": { "description": "Validation failed" }
                }
            }),
        )]
    }
}

impl Module for AuthModule {
    fn name(&self) -> &str {
        "auth"
    }

    fn prefix(&self) -> &str {
        AUTH_PREFIX
    }

    fn routes(&self) -> Router {
        Router::new().route(
            "/forgot-password",
            guard(
                post(forgot_password_http::handle),
                Arc::new(forgot_password_interceptor()),
            ),
        )
    }
}
