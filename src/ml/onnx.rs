//! ONNX inference wrapper (pure Rust via `tract-onnx`).
//!
//! Artifacts are skl2onnx exports with a single float input of shape
//! `[batch, n]`. Classifiers and KMeans put the label first and the scores
//! second; transformers return the transformed row.

use std::fmt;
use std::path::Path;
use tract_onnx::prelude::*;

use super::{argmax, check_width};
use crate::domain::ClassLabel;
use crate::error::{Result, SymbioError};

pub struct OnnxModel {
    plan: TypedRunnableModel<TypedModel>,
    input_dim: usize,
}

impl fmt::Debug for OnnxModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnnxModel")
            .field("input_dim", &self.input_dim)
            .finish()
    }
}

impl OnnxModel {
    /// Load an ONNX model and specialize it to a fixed `[1, input_dim]` f32 input.
    ///
    /// Loading ends with a forward pass on zeros: a graph that cannot take
    /// `input_dim` features fails here, not on the first request.
    pub fn load_for_vec_input(path: &Path, input_dim: usize) -> Result<Self> {
        if input_dim == 0 {
            return Err(SymbioError::InvalidArtifact(
                "input_dim must be > 0".to_string(),
            ));
        }

        // Opened first so a missing file surfaces as an I/O NotFound.
        let mut file = std::fs::File::open(path)?;
        let model = tract_onnx::onnx()
            .model_for_read(&mut file)
            .map_err(|e| SymbioError::InvalidArtifact(format!("onnx load failed: {e}")))?;

        let model = model
            .with_input_fact(
                0,
                InferenceFact::dt_shape(f32::datum_type(), tvec!(1, input_dim)),
            )
            .map_err(|e| {
                SymbioError::InvalidArtifact(format!("onnx input fact failed: {e}"))
            })?;

        let plan = model
            .into_optimized()
            .map_err(|e| SymbioError::InvalidArtifact(format!("onnx optimize failed: {e}")))?
            .into_runnable()
            .map_err(|e| SymbioError::InvalidArtifact(format!("onnx runnable failed: {e}")))?;

        let loaded = Self { plan, input_dim };
        loaded
            .run(&vec![0.0; input_dim])
            .map_err(|e| SymbioError::InvalidArtifact(e.to_string()))?;

        Ok(loaded)
    }

    pub fn input_dim(&self) -> usize {
        self.input_dim
    }

    /// Run inference on a single row and return every graph output.
    pub fn run(&self, input: &[f64]) -> Result<TVec<TValue>> {
        check_width("onnx", input.len(), self.input_dim)?;

        let row: Vec<f32> = input.iter().map(|v| *v as f32).collect();
        let tensor = tract_ndarray::ArrayD::<f32>::from_shape_vec(
            tract_ndarray::IxDyn(&[1, self.input_dim]),
            row,
        )
        .map_err(|e| SymbioError::Inference(format!("onnx input reshape failed: {e}")))?
        .into_tvalue();

        let outputs = self
            .plan
            .run(tvec!(tensor))
            .map_err(|e| SymbioError::Inference(format!("onnx run failed: {e}")))?;
        if outputs.is_empty() {
            return Err(SymbioError::Inference(
                "onnx produced no outputs".to_string(),
            ));
        }
        Ok(outputs)
    }
}

/// Flatten a numeric output tensor to `f64`.
pub(crate) fn output_values(output: &Tensor) -> Result<Vec<f64>> {
    let values = output
        .cast_to::<f64>()
        .map_err(|e| SymbioError::Inference(format!("onnx output decode failed: {e}")))?;
    let slice = values
        .as_slice::<f64>()
        .map_err(|e| SymbioError::Inference(format!("onnx output decode failed: {e}")))?;
    Ok(slice.to_vec())
}

/// Read the class of the single row from a classifier label output.
///
/// String labels become names, integer labels indices. Float outputs are
/// either a whole-valued label or a row of class scores.
pub(crate) fn label_from_output(output: &Tensor) -> Result<ClassLabel> {
    let datum_type = output.datum_type();

    if datum_type == String::datum_type() {
        let names = output
            .as_slice::<String>()
            .map_err(|e| SymbioError::Inference(format!("onnx label decode failed: {e}")))?;
        return names
            .first()
            .map(|name| ClassLabel::Name(name.clone()))
            .ok_or_else(|| SymbioError::Inference("onnx label output is empty".to_string()));
    }

    let values = output_values(output)?;
    let label = match values.as_slice() {
        [] => None,
        [value] if datum_type.is_integer() => Some(ClassLabel::Index(*value as i64)),
        [value] => ClassLabel::from_whole(*value),
        scores => argmax(scores).map(|idx| ClassLabel::Index(idx as i64)),
    };
    label.ok_or_else(|| {
        SymbioError::Inference(format!("onnx label output {values:?} is not a class"))
    })
}
