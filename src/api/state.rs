use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::artifacts::ArtifactSet;
use crate::services::PredictionService;

/// Shared application state for API handlers
///
/// Built once at startup and read-only afterwards, so cloning per request is
/// just two `Arc` bumps.
#[derive(Clone)]
pub struct AppState {
    /// Prediction façade over the loaded artifacts
    pub predictions: Arc<PredictionService>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(artifacts: ArtifactSet, require_label_encoder: bool) -> Self {
        Self {
            predictions: Arc::new(PredictionService::new(
                Arc::new(artifacts),
                require_label_encoder,
            )),
            start_time: Utc::now(),
        }
    }
}
