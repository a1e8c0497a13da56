//! Prediction façade over the loaded artifacts.
//!
//! Callers check availability, validate their input into a fixed-width
//! feature vector, then call `predict_*`. Every model error that escapes
//! from here is an inference failure.

use std::sync::Arc;
use tracing::{debug, error};

use crate::artifacts::ArtifactSet;
use crate::domain::{ClassLabel, ProfileFeatures, RiskFeatures};
use crate::error::{Result, SymbioError};
use crate::ml::{Classifier, ClusterModel, LabelDecoder, Scaler};

const CLASSIFIER_UNAVAILABLE: &str = "Modelo de classificação não foi carregado.";
const LABEL_ENCODER_UNAVAILABLE: &str = "Label encoder de risco não foi carregado.";
const CLUSTER_UNAVAILABLE: &str = "Modelo de agrupamento não foi carregado.";

pub struct PredictionService {
    artifacts: Arc<ArtifactSet>,
    require_label_encoder: bool,
}

impl PredictionService {
    pub fn new(artifacts: Arc<ArtifactSet>, require_label_encoder: bool) -> Self {
        Self {
            artifacts,
            require_label_encoder,
        }
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    /// Models behind the risk endpoint, or why they are unavailable.
    fn risk_models(&self) -> Result<(&dyn Classifier, Option<&dyn LabelDecoder>)> {
        let classifier = self
            .artifacts
            .classifier
            .as_deref()
            .ok_or_else(|| unavailable(CLASSIFIER_UNAVAILABLE))?;
        let encoder = self.artifacts.label_encoder.as_deref();
        if self.require_label_encoder && encoder.is_none() {
            return Err(unavailable(LABEL_ENCODER_UNAVAILABLE));
        }
        Ok((classifier, encoder))
    }

    /// Models behind the cluster endpoint, or why they are unavailable.
    fn cluster_models(&self) -> Result<(&dyn Scaler, &dyn ClusterModel)> {
        match (
            self.artifacts.scaler.as_deref(),
            self.artifacts.cluster_model.as_deref(),
        ) {
            (Some(scaler), Some(model)) => Ok((scaler, model)),
            _ => Err(unavailable(CLUSTER_UNAVAILABLE)),
        }
    }

    pub fn ensure_risk_available(&self) -> Result<()> {
        self.risk_models().map(|_| ())
    }

    pub fn ensure_cluster_available(&self) -> Result<()> {
        self.cluster_models().map(|_| ())
    }

    pub fn risk_available(&self) -> bool {
        self.ensure_risk_available().is_ok()
    }

    pub fn cluster_available(&self) -> bool {
        self.ensure_cluster_available().is_ok()
    }

    /// Classify one job row; decoded to its category name when an encoder is loaded.
    pub fn predict_risk(&self, features: &RiskFeatures) -> Result<ClassLabel> {
        let (classifier, encoder) = self.risk_models()?;

        let raw = classifier
            .predict(features.as_slice())
            .map_err(|e| inference_failure("risk", e))?;

        let label = match encoder {
            Some(encoder) => ClassLabel::Name(
                encoder
                    .decode(&raw)
                    .map_err(|e| inference_failure("risk", e))?,
            ),
            None => raw.clone(),
        };

        debug!(features = ?features.as_slice(), raw = %raw, label = %label, "Risk predicted");
        Ok(label)
    }

    /// Scale one profile row with the frozen scaler and assign its cluster.
    pub fn predict_cluster(&self, features: &ProfileFeatures) -> Result<usize> {
        let (scaler, model) = self.cluster_models()?;

        let scaled = scaler
            .transform(features.as_slice())
            .map_err(|e| inference_failure("cluster", e))?;
        let cluster = model
            .predict(&scaled)
            .map_err(|e| inference_failure("cluster", e))?;

        debug!(features = ?features.as_slice(), scaled = ?scaled, cluster, "Cluster predicted");
        Ok(cluster)
    }
}

fn unavailable(message: &str) -> SymbioError {
    SymbioError::ArtifactUnavailable(message.to_string())
}

fn inference_failure(endpoint: &str, err: SymbioError) -> SymbioError {
    error!(endpoint, error = %err, "Model inference failed");
    match err {
        SymbioError::Inference(_) => err,
        other => SymbioError::Inference(other.to_string()),
    }
}
