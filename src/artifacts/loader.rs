//! Best-effort artifact loader.
//!
//! Every artifact is loaded independently: a missing or broken file leaves
//! that slot empty and only degrades the endpoints that need it.

use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use super::{ArtifactKind, ArtifactReport, ArtifactSet, LoadOutcome};
use crate::config::ArtifactsConfig;
use crate::domain::{PROFILE_FEATURE_COUNT, RISK_FEATURE_COUNT};
use crate::error::{Result, SymbioError};
use crate::ml::{
    Classifier, ClusterModel, LabelDecoder, LabelEncoder, OnnxClassifier, OnnxKMeans, OnnxScaler,
    Scaler,
};

/// Loader for the service's model artifacts
pub struct ArtifactLoader {
    config: ArtifactsConfig,
}

impl ArtifactLoader {
    pub fn new(config: &ArtifactsConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Load all four artifacts. Never fails; absence is recorded per slot.
    pub fn load_all(&self) -> ArtifactSet {
        let mut reports = Vec::with_capacity(ArtifactKind::ALL.len());

        info!(dir = %self.config.dir.display(), "Loading model artifacts");

        let classifier = attempt(
            &mut reports,
            ArtifactKind::Classifier,
            self.config.classifier_path(),
            |path| OnnxClassifier::from_file(path, RISK_FEATURE_COUNT),
        );

        let label_encoder = attempt(
            &mut reports,
            ArtifactKind::LabelEncoder,
            self.config.label_encoder_path(),
            |path| {
                let encoder = LabelEncoder::from_file(path)?;
                info!(classes = encoder.classes.len(), "Label encoder ready");
                Ok(encoder)
            },
        );

        let cluster_model = attempt(
            &mut reports,
            ArtifactKind::ClusterModel,
            self.config.cluster_model_path(),
            |path| {
                let model = OnnxKMeans::from_file(path, PROFILE_FEATURE_COUNT)?;
                info!(clusters = ?model.n_clusters(), "Cluster model ready");
                Ok(model)
            },
        );

        let scaler = attempt(
            &mut reports,
            ArtifactKind::FeatureScaler,
            self.config.scaler_path(),
            |path| OnnxScaler::from_file(path, PROFILE_FEATURE_COUNT),
        );

        let set = ArtifactSet {
            classifier: classifier.map(|m| Box::new(m) as Box<dyn Classifier>),
            label_encoder: label_encoder.map(|e| Box::new(e) as Box<dyn LabelDecoder>),
            cluster_model: cluster_model.map(|m| Box::new(m) as Box<dyn ClusterModel>),
            scaler: scaler.map(|s| Box::new(s) as Box<dyn Scaler>),
            reports,
        };

        let loaded = ArtifactKind::ALL
            .iter()
            .filter(|kind| set.is_present(**kind))
            .count();
        if set.all_present() {
            info!(loaded, "All model artifacts loaded");
        } else {
            warn!(
                loaded,
                total = ArtifactKind::ALL.len(),
                "Some model artifacts are unavailable, dependent endpoints will answer 500"
            );
        }

        set
    }
}

fn attempt<T>(
    reports: &mut Vec<ArtifactReport>,
    kind: ArtifactKind,
    path: PathBuf,
    load: impl FnOnce(&Path) -> Result<T>,
) -> Option<T> {
    let (artifact, outcome) = match load(&path) {
        Ok(artifact) => {
            info!(artifact = %kind, path = %path.display(), "Artifact loaded successfully");
            (Some(artifact), LoadOutcome::Loaded)
        }
        Err(SymbioError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(artifact = %kind, path = %path.display(), "Artifact file not found");
            (None, LoadOutcome::Missing)
        }
        Err(e) => {
            error!(artifact = %kind, path = %path.display(), error = %e, "Failed to load artifact, skipping");
            (None, LoadOutcome::Failed(e.to_string()))
        }
    };

    reports.push(ArtifactReport {
        kind,
        path,
        outcome,
    });
    artifact
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClassLabel;

    fn copy_fixture(dir: &Path, name: &str, as_name: &str) {
        let source = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        std::fs::copy(source, dir.join(as_name)).unwrap();
    }

    #[test]
    fn empty_directory_yields_empty_set() {
        let dir = tempfile::tempdir().unwrap();
        let set = ArtifactLoader::new(&ArtifactsConfig::in_dir(dir.path())).load_all();

        assert!(ArtifactKind::ALL.iter().all(|k| !set.is_present(*k)));
        assert_eq!(set.reports().len(), 4);
        assert!(set
            .reports()
            .iter()
            .all(|r| r.outcome == LoadOutcome::Missing));
        assert!(!set.has_failures());
    }

    #[test]
    fn corrupt_artifact_only_degrades_its_slot() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("modelo_cluster.onnx"), b"\x80\x04pickle").unwrap();
        copy_fixture(dir.path(), "scaler_cluster.onnx", "scaler_cluster.onnx");
        copy_fixture(
            dir.path(),
            "label_encoder_risco.json",
            "label_encoder_risco.json",
        );

        let set = ArtifactLoader::new(&ArtifactsConfig::in_dir(dir.path())).load_all();

        assert!(set.scaler.is_some());
        assert!(set.label_encoder.is_some());
        assert!(set.cluster_model.is_none());
        assert!(set.classifier.is_none());
        assert!(set.has_failures());

        let cluster = set
            .reports()
            .iter()
            .find(|r| r.kind == ArtifactKind::ClusterModel)
            .unwrap();
        assert!(matches!(cluster.outcome, LoadOutcome::Failed(_)));
    }

    #[test]
    fn width_mismatch_counts_as_failure() {
        let dir = tempfile::tempdir().unwrap();
        // A three-feature graph where six features are sent.
        copy_fixture(dir.path(), "modelo_risco.onnx", "modelo_cluster.onnx");
        // A six-feature graph where three features are sent.
        copy_fixture(dir.path(), "scaler_cluster.onnx", "modelo_risco.onnx");

        let set = ArtifactLoader::new(&ArtifactsConfig::in_dir(dir.path())).load_all();
        assert!(set.cluster_model.is_none());
        assert!(set.classifier.is_none());
        assert!(set.has_failures());

        copy_fixture(dir.path(), "modelo_cluster.onnx", "modelo_cluster.onnx");
        let set = ArtifactLoader::new(&ArtifactsConfig::in_dir(dir.path())).load_all();
        assert!(set.cluster_model.is_some());
    }

    #[test]
    fn float_valued_encoder_classes_load() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("label_encoder_risco.json"),
            r#"{"classes": [0.0, 1.0, 2.0]}"#,
        )
        .unwrap();

        let set = ArtifactLoader::new(&ArtifactsConfig::in_dir(dir.path())).load_all();
        let encoder = set.label_encoder.as_ref().unwrap();
        assert_eq!(encoder.decode(&ClassLabel::Index(1)).unwrap(), "1");
        assert!(!set.has_failures());
    }

    #[test]
    fn honours_configured_file_names() {
        let dir = tempfile::tempdir().unwrap();
        copy_fixture(dir.path(), "modelo_cluster.onnx", "centres.onnx");

        let mut config = ArtifactsConfig::in_dir(dir.path());
        config.cluster_model = "centres.onnx".to_string();

        let set = ArtifactLoader::new(&config).load_all();
        assert!(set.is_present(ArtifactKind::ClusterModel));
    }
}
