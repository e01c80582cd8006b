use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use wayfare_core::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    PaymentRequired(String),
    /// Body could not be extracted; keeps the extractor's status code.
    #[error("{message}")]
    InvalidBody { status: StatusCode, message: String },
    /// Detail is logged, never returned.
    #[error("{public}: {detail}")]
    InternalServerError { public: String, detail: String },
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let public = err.to_string();
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::PaymentError(_) => AppError::PaymentRequired(public),
            CoreError::PersistenceError(detail) => AppError::InternalServerError { public, detail },
        }
    }
}

/// Malformed bodies, wrong content types and oversized bodies get the same
/// JSON envelope as other failures; the extractor's own text is only logged.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::info!("Rejected request body: {}", rejection.body_text());
        let status = rejection.status();
        let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "Request body too large"
        } else {
            "Invalid JSON request body"
        };
        AppError::InvalidBody {
            status,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
            AppError::InvalidBody { status, message } => (status, message),
            AppError::InternalServerError { public, detail } => {
                tracing::error!("Internal Server Error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, public)
            }
        };

        let body = Json(json!({
            "success": false,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}
