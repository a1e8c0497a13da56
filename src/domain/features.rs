//! Fixed-width feature vectors extracted from request bodies.

use serde_json::Value;

use crate::error::{Result, SymbioError};

/// Inputs of the job automation risk classifier, in training column order.
pub const RISK_FEATURE_NAMES: [&str; 3] = [
    "perc_tarefa_repetitiva",
    "perc_exige_criatividade",
    "perc_interacao_humana",
];

/// Inputs of the talent clustering model, in training column order.
pub const PROFILE_FEATURE_NAMES: [&str; 6] = [
    "JobSatisfaction",
    "EnvironmentSatisfaction",
    "WorkLifeBalance",
    "PerformanceRating",
    "TrainingTimesLastYear",
    "YearsInCurrentRole",
];

pub const RISK_FEATURE_COUNT: usize = RISK_FEATURE_NAMES.len();
pub const PROFILE_FEATURE_COUNT: usize = PROFILE_FEATURE_NAMES.len();

/// Exactly `N` numeric features for a single prediction row.
///
/// Any JSON number is accepted (integers are widened to `f64`); there are no
/// range checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector<const N: usize>([f64; N]);

/// Job description row: repetitive task %, creativity %, human interaction %.
pub type RiskFeatures = FeatureVector<RISK_FEATURE_COUNT>;

/// Employee profile row fed to the scaler and then the cluster model.
pub type ProfileFeatures = FeatureVector<PROFILE_FEATURE_COUNT>;

impl<const N: usize> FeatureVector<N> {
    pub fn new(values: [f64; N]) -> Self {
        Self(values)
    }

    /// Extract and validate the `features` field of a request body.
    pub fn from_body(body: &Value) -> Result<Self> {
        let object = body.as_object().ok_or_else(|| {
            SymbioError::Validation("o corpo da requisição deve ser um objeto JSON".to_string())
        })?;

        let raw = object
            .get("features")
            .ok_or_else(|| SymbioError::Validation("campo 'features' ausente".to_string()))?;

        Self::from_value(raw)
    }

    /// Validate a bare JSON value as an `N`-length numeric list.
    pub fn from_value(raw: &Value) -> Result<Self> {
        let items = raw.as_array().ok_or_else(|| {
            SymbioError::Validation("'features' deve ser uma lista de números".to_string())
        })?;

        if items.len() != N {
            return Err(SymbioError::Validation(format!(
                "'features' deve conter exatamente {N} valores, recebido {}",
                items.len()
            )));
        }

        let mut values = [0.0_f64; N];
        for (idx, item) in items.iter().enumerate() {
            values[idx] = item.as_f64().ok_or_else(|| {
                SymbioError::Validation(format!("'features[{idx}]' não é numérico: {item}"))
            })?;
        }

        Ok(Self(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}
