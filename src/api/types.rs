use serde::{Deserialize, Serialize};

use crate::domain::ClassLabel;

// ============================================================================
// Prediction Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResponse {
    pub risco_predito: ClassLabel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterResponse {
    pub cluster_predito: usize,
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub erro: String,
}
