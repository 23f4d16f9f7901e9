//! HTTP response handling for errors

use super::types::QualityError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for QualityError {
    fn status_code(&self) -> StatusCode {
        self.parts().0
    }

    fn error_response(&self) -> HttpResponse {
        self.response_for_request(None)
    }
}

impl QualityError {
    /// Render the error envelope, tagged with the request it answers
    ///
    /// The auth middleware calls this with the request id; plain
    /// `error_response` leaves it empty.
    pub fn response_for_request(&self, request_id: Option<&str>) -> HttpResponse {
        let (status_code, error_code, message) = self.parts();

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
                request_id: request_id.map(str::to_string),
            },
        };

        HttpResponse::build(status_code).json(error_response)
    }

    /// Status, machine readable code and client facing message
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            QualityError::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIG_ERROR",
                self.to_string(),
            ),
            QualityError::Database(_) if self.is_unique_violation() => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "Resource already exists".to_string(),
            ),
            QualityError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed".to_string(),
            ),
            QualityError::Auth(_) => (StatusCode::UNAUTHORIZED, "AUTH_ERROR", self.to_string()),
            QualityError::Jwt(_) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
            ),
            QualityError::Unauthorized(_) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", self.to_string())
            }
            QualityError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN", self.to_string()),
            QualityError::Validation(_) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
            ),
            QualityError::BadRequest(_) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", self.to_string())
            }
            QualityError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND", self.to_string()),
            QualityError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT", self.to_string()),
            QualityError::FileStorage(_) | QualityError::Io(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "FILE_STORAGE_ERROR",
                "File storage operation failed".to_string(),
            ),
            QualityError::Archive(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "ARCHIVE_ERROR",
                "Failed to build archive".to_string(),
            ),
            QualityError::Crypto(_) | QualityError::Internal(_) | QualityError::Server(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            ),
        }
    }
}

/// Standard error response format
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
    pub request_id: Option<String>,
}
