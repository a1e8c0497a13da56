use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::{read_json, LabelDecoder};
use crate::domain::ClassLabel;
use crate::error::{Result, SymbioError};

/// `classes_` of a fitted label encoder; the encoded value of a class is its position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<ClassLabel>,
}

impl LabelEncoder {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let encoder: Self = read_json(path)?;
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn validate(&self) -> Result<()> {
        if self.classes.is_empty() {
            return Err(SymbioError::InvalidArtifact(
                "label encoder has no classes".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for class in &self.classes {
            if !seen.insert(class) {
                return Err(SymbioError::InvalidArtifact(format!(
                    "label encoder repeats class {class}"
                )));
            }
        }
        Ok(())
    }

    pub fn inverse_transform(&self, index: i64) -> Result<&ClassLabel> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.classes.get(i))
            .ok_or_else(|| {
                SymbioError::Inference(format!(
                    "label {index} is outside the encoder range 0..{}",
                    self.classes.len()
                ))
            })
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, label: &ClassLabel) -> Result<String> {
        match label {
            ClassLabel::Index(i) => self.inverse_transform(*i).map(ClassLabel::to_string),
            // Already decoded by a classifier fitted on raw names.
            ClassLabel::Name(name) if self.classes.contains(label) => Ok(name.clone()),
            ClassLabel::Name(name) => Err(SymbioError::Inference(format!(
                "label {name:?} is unknown to the encoder"
            ))),
        }
    }
}
