//! Error Handling Module
//!
//! Provides type-safe error handling with proper HTTP status code mapping.
//! Uses thiserror for domain errors and integrates with tracing for structured logging.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::services::MAX_FILE_SIZE;

/// API 에러 타입
///
/// 각 에러 variant는 HTTP 상태 코드에 매핑됨
/// - 클라이언트 에러: 4xx (필드 누락, 인증 실패, 업로드 제약 위반)
/// - 서버 에러: 5xx (저장소 오류)
///
/// 저장소 에러의 상세 내용은 로그에만 남기고 클라이언트에는 노출하지 않음
#[derive(Debug, Error)]
pub enum ApiError {
    // ============ 400 Bad Request ============
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    ValidationError(String),

    #[error("File exceeds the {} MB limit", MAX_FILE_SIZE / (1024 * 1024))]
    FileTooLarge,

    #[error("Only image files can be uploaded: {0}")]
    UnsupportedFileType(String),

    #[error("No file was uploaded")]
    MissingFile,

    #[error("Only one file can be uploaded per request")]
    UnexpectedFile,

    // ============ 401 Unauthorized ============
    #[error("Authentication required")]
    Unauthorized,

    // ============ 404 Not Found ============
    #[error("Resource not found: {0}")]
    NotFound(String),

    // ============ 500 Internal Server Error ============
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal server error")]
    InternalError,
}

/// API 에러 응답 구조
#[derive(Serialize)]
pub struct ErrorResponse {
    pub message: String,
    pub code: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::ValidationError(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::FileTooLarge => (StatusCode::BAD_REQUEST, "FILE_TOO_LARGE"),
            ApiError::UnsupportedFileType(_) => (StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE"),
            ApiError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            ApiError::UnexpectedFile => (StatusCode::BAD_REQUEST, "UNEXPECTED_FILE"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::DatabaseError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::InternalError => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            ApiError::ValidationError(msg) | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::NotFound(resource) => format!("{} not found", resource),
            ApiError::DatabaseError(_) => {
                // 내부 에러는 클라이언트에 상세 정보 노출 안 함
                tracing::error!("Database error: {:?}", self);
                "Database error occurred".to_string()
            }
            // 원인은 InternalError를 만드는 쪽에서 로그로 남김
            ApiError::InternalError => "An internal error occurred".to_string(),
            other => other.to_string(),
        };

        let body = ErrorResponse {
            message,
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// SQLx 에러를 ApiError로 변환
///
/// 로그는 응답으로 바뀔 때(`into_response`) 한 번만 남김
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        ApiError::DatabaseError(err.to_string())
    }
}

/// anyhow 에러를 ApiError로 변환
///
/// Repository trait은 anyhow::Result를 반환하므로 저장소 실패는 모두 여기로 들어옴.
/// context 체인 전체를 메시지에 보존
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(format!("{:#}", err))
    }
}

/// 잘못된 JSON 바디는 400으로 통일
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
