use axum::http::StatusCode;
use thiserror::Error;

/// Main error type for the prediction service
#[derive(Error, Debug)]
pub enum SymbioError {
    // Serialization errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Artifact errors
    #[error("Invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("{0}")]
    ArtifactUnavailable(String),

    // Request errors
    #[error("{0}")]
    Validation(String),

    // Model errors
    #[error("Inference failed: {0}")]
    Inference(String),

    // Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SymbioError {
    /// HTTP status for this error when it reaches a request handler.
    ///
    /// Only client input problems are 400; everything else is a server-side
    /// failure.
    pub fn status_code(&self) -> StatusCode {
        match self {
            SymbioError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

/// Result type alias for SymbioError
pub type Result<T> = std::result::Result<T, SymbioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = SymbioError::Validation("features ausente".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert!(err.is_client_error());
    }

    #[test]
    fn server_side_failures_map_to_500() {
        let cases = [
            SymbioError::ArtifactUnavailable("x".to_string()),
            SymbioError::Inference("x".to_string()),
            SymbioError::InvalidArtifact("x".to_string()),
            SymbioError::Internal("x".to_string()),
        ];
        for err in cases {
            assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}
