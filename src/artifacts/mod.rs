//! Startup-loaded model artifacts.
//!
//! The set is built once by [`ArtifactLoader::load_all`] and never mutated;
//! handlers share it behind an `Arc`.

pub mod loader;

pub use loader::ArtifactLoader;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::ml::{Classifier, ClusterModel, LabelDecoder, Scaler};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    Classifier,
    LabelEncoder,
    ClusterModel,
    FeatureScaler,
}

impl ArtifactKind {
    pub const ALL: [ArtifactKind; 4] = [
        ArtifactKind::Classifier,
        ArtifactKind::LabelEncoder,
        ArtifactKind::ClusterModel,
        ArtifactKind::FeatureScaler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classifier => "classifier",
            Self::LabelEncoder => "label_encoder",
            Self::ClusterModel => "cluster_model",
            Self::FeatureScaler => "feature_scaler",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one artifact load
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum LoadOutcome {
    Loaded,
    Missing,
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtifactReport {
    pub kind: ArtifactKind,
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: LoadOutcome,
}

/// The four optional artifacts plus how each load went.
#[derive(Default)]
pub struct ArtifactSet {
    pub classifier: Option<Box<dyn Classifier>>,
    pub label_encoder: Option<Box<dyn LabelDecoder>>,
    pub cluster_model: Option<Box<dyn ClusterModel>>,
    pub scaler: Option<Box<dyn Scaler>>,
    reports: Vec<ArtifactReport>,
}

impl ArtifactSet {
    /// A set with nothing loaded; every prediction endpoint is unavailable.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_classifier(mut self, model: impl Classifier + 'static) -> Self {
        self.classifier = Some(Box::new(model));
        self
    }

    pub fn with_label_encoder(mut self, encoder: impl LabelDecoder + 'static) -> Self {
        self.label_encoder = Some(Box::new(encoder));
        self
    }

    pub fn with_cluster_model(mut self, model: impl ClusterModel + 'static) -> Self {
        self.cluster_model = Some(Box::new(model));
        self
    }

    pub fn with_scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.scaler = Some(Box::new(scaler));
        self
    }

    /// Per-artifact load results, in load order. Empty for hand-built sets.
    pub fn reports(&self) -> &[ArtifactReport] {
        &self.reports
    }

    pub fn is_present(&self, kind: ArtifactKind) -> bool {
        match kind {
            ArtifactKind::Classifier => self.classifier.is_some(),
            ArtifactKind::LabelEncoder => self.label_encoder.is_some(),
            ArtifactKind::ClusterModel => self.cluster_model.is_some(),
            ArtifactKind::FeatureScaler => self.scaler.is_some(),
        }
    }

    pub fn all_present(&self) -> bool {
        ArtifactKind::ALL.iter().all(|kind| self.is_present(*kind))
    }

    /// Whether any artifact file existed but could not be loaded.
    pub fn has_failures(&self) -> bool {
        self.reports
            .iter()
            .any(|r| matches!(r.outcome, LoadOutcome::Failed(_)))
    }
}

impl fmt::Debug for ArtifactSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArtifactSet")
            .field("classifier", &self.classifier.is_some())
            .field("label_encoder", &self.label_encoder.is_some())
            .field("cluster_model", &self.cluster_model.is_some())
            .field("scaler", &self.scaler.is_some())
            .field("reports", &self.reports)
            .finish()
    }
}
