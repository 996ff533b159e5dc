use axum::Json;
use axum::http::StatusCode;
use serde::Serialize;

use crate::articles::ArticleRecord;

pub const MSG_METHOD_NOT_ALLOWED: &str = "Método no permitido";
pub const MSG_INVALID_BODY: &str = "Cuerpo de la solicitud no válido";
pub const MSG_INTERNAL: &str = "Error interno del servidor";

/// Canonical JSON payload for error responses.
#[derive(Debug, Serialize, Clone)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Plain acknowledgement carrying a human-readable message.
#[derive(Debug, Serialize, Clone)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
pub struct ActionResult {
    pub success: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct ArticleList {
    pub articles: Vec<ArticleRecord>,
}

/// Helper for controllers that need to return `(StatusCode, Json<ApiError>)`.
pub fn json_error(status: StatusCode, message: impl Into<String>) -> (StatusCode, Json<ApiError>) {
    (status, Json(ApiError::new(message)))
}

pub async fn method_not_allowed() -> (StatusCode, Json<ApiError>) {
    json_error(StatusCode::METHOD_NOT_ALLOWED, MSG_METHOD_NOT_ALLOWED)
}
