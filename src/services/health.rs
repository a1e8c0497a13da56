//! Health reporting for process supervision.
//!
//! Liveness never depends on artifacts; the detailed report says which
//! artifacts loaded and which prediction endpoints can answer.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::artifacts::ArtifactReport;
use crate::domain::{PROFILE_FEATURE_NAMES, RISK_FEATURE_NAMES};
use crate::services::PredictionService;

/// Overall service health
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// Every artifact loaded
    Ok,
    /// Up, but at least one endpoint answers 500
    Degraded,
}

#[derive(Debug, Clone, Serialize)]
pub struct EndpointHealth {
    pub path: &'static str,
    pub available: bool,
    pub features: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub version: &'static str,
    pub artifacts: Vec<ArtifactReport>,
    pub endpoints: Vec<EndpointHealth>,
}

impl HealthResponse {
    pub fn build(service: &PredictionService, started_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        let artifacts = service.artifacts();
        let status = if artifacts.all_present() {
            HealthStatus::Ok
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            timestamp: now,
            uptime_seconds: (now - started_at).num_seconds().max(0) as u64,
            version: env!("CARGO_PKG_VERSION"),
            artifacts: artifacts.reports().to_vec(),
            endpoints: vec![
                EndpointHealth {
                    path: "/predict/risk",
                    available: service.risk_available(),
                    features: &RISK_FEATURE_NAMES,
                },
                EndpointHealth {
                    path: "/predict/cluster",
                    available: service.cluster_available(),
                    features: &PROFILE_FEATURE_NAMES,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::ArtifactSet;
    use crate::ml::{MockClusterModel, MockScaler};
    use std::sync::Arc;

    #[test]
    fn empty_set_is_degraded() {
        let service = PredictionService::new(Arc::new(ArtifactSet::empty()), false);
        let health = HealthResponse::build(&service, Utc::now());

        assert_eq!(health.status, HealthStatus::Degraded);
        assert!(health.endpoints.iter().all(|e| !e.available));
    }

    #[test]
    fn reports_endpoint_availability_independently() {
        let set = ArtifactSet::empty()
            .with_scaler(MockScaler::new())
            .with_cluster_model(MockClusterModel::new());
        let service = PredictionService::new(Arc::new(set), false);
        let health = HealthResponse::build(&service, Utc::now());

        let json = serde_json::to_value(&health).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["endpoints"][0]["available"], false);
        assert_eq!(json["endpoints"][1]["available"], true);
        assert_eq!(json["endpoints"][1]["features"].as_array().unwrap().len(), 6);
    }
}
