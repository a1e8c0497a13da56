//! KMeans cluster assignment.
//!
//! Inference only: the model is fitted offline and exported with skl2onnx,
//! which emits the cluster label first and the per-centre distances second.

use std::path::Path;

use super::onnx::{output_values, OnnxModel};
use super::ClusterModel;
use crate::error::{Result, SymbioError};

#[derive(Debug)]
pub struct OnnxKMeans {
    model: OnnxModel,
    n_clusters: Option<usize>,
}

impl OnnxKMeans {
    pub fn from_file<P: AsRef<Path>>(path: P, n_features: usize) -> Result<Self> {
        let model = OnnxModel::load_for_vec_input(path.as_ref(), n_features)?;
        let outputs = model.run(&vec![0.0; n_features])?;
        let n_clusters = match outputs.get(1) {
            Some(scores) => Some(output_values(scores)?.len()),
            None => None,
        };

        let kmeans = Self { model, n_clusters };
        kmeans
            .predict(&vec![0.0; n_features])
            .map_err(|e| SymbioError::InvalidArtifact(format!("kmeans label output: {e}")))?;
        Ok(kmeans)
    }

    /// Number of centres, when the export carries the distance output.
    pub fn n_clusters(&self) -> Option<usize> {
        self.n_clusters
    }
}

impl ClusterModel for OnnxKMeans {
    fn predict(&self, features: &[f64]) -> Result<usize> {
        let outputs = self.model.run(features)?;
        let labels = output_values(&outputs[0])?;

        let label = match labels.as_slice() {
            [label] if label.fract() == 0.0 && *label >= 0.0 => *label as usize,
            _ => {
                return Err(SymbioError::Inference(format!(
                    "kmeans label output {labels:?} is not a cluster index"
                )))
            }
        };
        if let Some(n) = self.n_clusters {
            if label >= n {
                return Err(SymbioError::Inference(format!(
                    "cluster {label} is outside 0..{n}"
                )));
            }
        }
        Ok(label)
    }
}
