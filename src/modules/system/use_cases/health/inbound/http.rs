use axum::{Json, extract::State};
use serde::Serialize;

#[derive(Clone)]
pub struct HealthState {
    pub mode: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mode: String,
}

pub async fn handle(State(state): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mode: state.mode,
    })
}
