use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde_json::Value;
use tracing::warn;

use crate::api::{
    state::AppState,
    types::{ClusterResponse, RiskResponse},
};
use crate::domain::{ProfileFeatures, RiskFeatures};
use crate::error::{Result, SymbioError};

/// POST /predict/risk
///
/// `{"features": [perc_tarefa_repetitiva, perc_exige_criatividade, perc_interacao_humana]}`
pub async fn predict_risk(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<RiskResponse>> {
    // Availability first: a missing model answers 500 whatever the body is.
    state.predictions.ensure_risk_available()?;

    let features = parse_features::<RiskFeatures>("risk", body, RiskFeatures::from_body)?;
    let label = state.predictions.predict_risk(&features)?;

    Ok(Json(RiskResponse {
        risco_predito: label,
    }))
}

/// POST /predict/cluster
///
/// `{"features": [JobSatisfaction, EnvironmentSatisfaction, WorkLifeBalance,
/// PerformanceRating, TrainingTimesLastYear, YearsInCurrentRole]}`
pub async fn predict_cluster(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<ClusterResponse>> {
    state.predictions.ensure_cluster_available()?;

    let features =
        parse_features::<ProfileFeatures>("cluster", body, ProfileFeatures::from_body)?;
    let cluster = state.predictions.predict_cluster(&features)?;

    Ok(Json(ClusterResponse {
        cluster_predito: cluster,
    }))
}

fn parse_features<F>(
    endpoint: &str,
    body: std::result::Result<Json<Value>, JsonRejection>,
    extract: impl FnOnce(&Value) -> Result<F>,
) -> Result<F> {
    let parsed = body
        .map_err(SymbioError::from)
        .and_then(|Json(value)| extract(&value));
    if let Err(e) = &parsed {
        warn!(endpoint, error = %e, "Rejected prediction request");
    }
    parsed
}
