//! Inference over frozen, externally trained estimators.
//!
//! Training happens elsewhere. Classifier, scaler and KMeans arrive as ONNX
//! exports run by `tract`; the label encoder is a JSON class table. The
//! prediction service only sees the traits below.

pub mod classifier;
pub mod kmeans;
pub mod label_encoder;
pub mod onnx;
pub mod scaler;

pub use classifier::OnnxClassifier;
pub use kmeans::OnnxKMeans;
pub use label_encoder::LabelEncoder;
pub use onnx::OnnxModel;
pub use scaler::OnnxScaler;

use serde::de::DeserializeOwned;
use std::path::Path;

use crate::domain::ClassLabel;
use crate::error::{Result, SymbioError};

/// Assigns one class to a single feature row.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<ClassLabel>;
}

/// Maps encoded class values back to their original names.
#[cfg_attr(test, mockall::automock)]
pub trait LabelDecoder: Send + Sync {
    fn decode(&self, label: &ClassLabel) -> Result<String>;
}

/// Applies frozen feature preprocessing.
#[cfg_attr(test, mockall::automock)]
pub trait Scaler: Send + Sync {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>>;
}

/// Assigns a (scaled) feature row to a cluster index.
#[cfg_attr(test, mockall::automock)]
pub trait ClusterModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> Result<usize>;
}

/// Read and parse a JSON artifact without validating it.
pub(crate) fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Index of the first maximum (ties resolve to the lowest index).
pub(crate) fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((idx, v)),
        }
    }
    best.map(|(idx, _)| idx)
}

pub(crate) fn check_width(what: &str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(SymbioError::Inference(format!(
            "{what} input dim mismatch: got {got}, expected {expected}"
        )));
    }
    Ok(())
}

pub(crate) fn all_finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}
