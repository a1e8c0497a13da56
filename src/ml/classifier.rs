use std::path::Path;

use super::onnx::{label_from_output, OnnxModel};
use super::Classifier;
use crate::domain::ClassLabel;
use crate::error::{Result, SymbioError};

/// Risk classifier exported with skl2onnx (`zipmap` disabled).
#[derive(Debug)]
pub struct OnnxClassifier {
    model: OnnxModel,
}

impl OnnxClassifier {
    /// Load the export for rows of `n_features` values.
    ///
    /// The label output of the dry run must decode to a class.
    pub fn from_file<P: AsRef<Path>>(path: P, n_features: usize) -> Result<Self> {
        let classifier = Self {
            model: OnnxModel::load_for_vec_input(path.as_ref(), n_features)?,
        };
        classifier
            .predict(&vec![0.0; n_features])
            .map_err(|e| SymbioError::InvalidArtifact(format!("classifier label output: {e}")))?;
        Ok(classifier)
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &[f64]) -> Result<ClassLabel> {
        let outputs = self.model.run(features)?;
        label_from_output(&outputs[0])
    }
}
