use std::path::Path;

use super::onnx::{output_values, OnnxModel};
use super::{all_finite, Scaler};
use crate::error::{Result, SymbioError};

/// Feature scaler exported with skl2onnx.
///
/// Any row-wise transformer works as long as it keeps the row width.
#[derive(Debug)]
pub struct OnnxScaler {
    model: OnnxModel,
}

impl OnnxScaler {
    pub fn from_file<P: AsRef<Path>>(path: P, n_features: usize) -> Result<Self> {
        let scaler = Self {
            model: OnnxModel::load_for_vec_input(path.as_ref(), n_features)?,
        };
        scaler
            .transform(&vec![0.0; n_features])
            .map_err(|e| SymbioError::InvalidArtifact(format!("scaler output: {e}")))?;
        Ok(scaler)
    }
}

impl Scaler for OnnxScaler {
    fn transform(&self, features: &[f64]) -> Result<Vec<f64>> {
        let outputs = self.model.run(features)?;
        let scaled = output_values(&outputs[0])?;

        if scaled.len() != self.model.input_dim() {
            return Err(SymbioError::Inference(format!(
                "scaler returned {} values for {} features",
                scaled.len(),
                self.model.input_dim()
            )));
        }
        if !all_finite(&scaled) {
            return Err(SymbioError::Inference(
                "scaler produced non-finite values".to_string(),
            ));
        }
        Ok(scaled)
    }
}
