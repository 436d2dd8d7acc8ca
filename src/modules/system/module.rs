use axum::{Router, routing::get};
use serde_json::{Value, json};

use crate::modules::system::use_cases::health::inbound::http::{self as health_http, HealthState};
use crate::shared::infrastructure::resolver::module_resolver::Module;

pub const SYSTEM_PREFIX: &str = "/system";

#[derive(Debug, Clone)]
pub struct SystemModule {
    mode: String,
}

impl SystemModule {
    pub fn new(mode: impl Into<String>) -> Self {
        Self { mode: mode.into() }
    }

    pub fn operations() -> Vec<(&'static str, String, Value)> {
        vec![(
            "get",
            format!("{SYSTEM_PREFIX}/health"),
            json!({
                "summary": "Liveness probe",
                "tags": ["system"],
                "responses": { "200": { "description": "Service is up" } }
            }),
        )]
    }
}

impl Module for SystemModule {
    fn name(&self) -> &str {
        "system"
    }

    fn prefix(&self) -> &str {
        SYSTEM_PREFIX
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/health", get(health_http::handle))
            .with_state(HealthState {
                mode: self.mode.clone(),
            })
    }
}
