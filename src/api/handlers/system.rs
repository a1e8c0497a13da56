use axum::{extract::State, http::StatusCode, Json};

use crate::api::state::AppState;
use crate::services::HealthResponse;

pub const HOME_MESSAGE: &str = "API de IA do Projeto SYMBIO está no ar!";

/// GET / -- static confirmation that the process is up
pub async fn home() -> &'static str {
    HOME_MESSAGE
}

/// GET /healthz -- bare liveness check
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health -- artifact and endpoint report
///
/// Always 200: a degraded service is still alive and answers the endpoints
/// whose artifacts loaded.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::build(&state.predictions, state.start_time))
}
