pub mod api;
pub mod artifacts;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ml;
pub mod services;

pub use artifacts::{ArtifactKind, ArtifactLoader, ArtifactReport, ArtifactSet, LoadOutcome};
pub use config::AppConfig;
pub use domain::{ClassLabel, ProfileFeatures, RiskFeatures};
pub use error::{Result, SymbioError};
pub use services::{HealthResponse, PredictionService};
