use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Liveness
        .route("/", get(handlers::home))
        .route("/healthz", get(handlers::liveness))
        .route("/health", get(handlers::health))
        // Prediction endpoints (English and Portuguese paths)
        .route("/predict/risk", post(handlers::predict_risk))
        .route("/prever/risco", post(handlers::predict_risk))
        .route("/predict/cluster", post(handlers::predict_cluster))
        .route("/prever/cluster", post(handlers::predict_cluster))
        // Add state, CORS and request tracing
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
