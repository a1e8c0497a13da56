use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    Json,
};

use crate::api::types::ErrorResponse;
use crate::error::SymbioError;

impl IntoResponse for SymbioError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            erro: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for SymbioError {
    fn from(rejection: JsonRejection) -> Self {
        SymbioError::Validation(format!("corpo JSON inválido: {}", rejection.body_text()))
    }
}
