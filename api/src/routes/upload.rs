//! File Upload Endpoint
//!
//! multipart/form-data의 `file` 필드 하나만 받음.
//!
//! # Validation Order
//!
//! 1. content-type 허용 목록 (jpeg/png/gif)
//! 2. 크기 (최대 5MB, 스트리밍하면서 누적 크기 확인)
//! 3. `file` 필드가 두 개 이상이면 거부
//!
//! 모든 검증이 끝난 뒤에 디스크에 씀 → 거부된 요청은 파일을 남기지 않음

use axum::{
    extract::{
        multipart::{Field, MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::{
    error::ApiError,
    services::{is_allowed_mime, MAX_FILE_SIZE},
    AppState,
};

/// multipart 필드 이름
pub const FILE_FIELD: &str = "file";

/// 업로드 라우트 요청 바디 한도
///
/// 파일 한도보다 넉넉하게 잡아서 초과분은 핸들러에서 "too large"로 응답
pub const UPLOAD_BODY_LIMIT: usize = MAX_FILE_SIZE * 2;

/// 업로드 응답
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// 공개 URL (`/uploads/<name>`)
    pub url: String,
}

struct PendingFile {
    name: String,
    bytes: Vec<u8>,
}

/// POST /community/upload
pub async fn upload_file(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, ApiError> {
    // multipart 요청이 아니면 파일이 없는 것과 같음
    let mut multipart = multipart.map_err(|_| ApiError::MissingFile)?;

    let mut pending: Option<PendingFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };

        if pending.is_some() {
            return Err(ApiError::UnexpectedFile);
        }

        let content_type = field.content_type().map(str::to_owned);
        if !is_allowed_mime(content_type.as_deref()) {
            return Err(ApiError::UnsupportedFileType(
                content_type.unwrap_or_else(|| "unknown".to_string()),
            ));
        }

        let bytes = read_limited(field).await?;
        pending = Some(PendingFile { name, bytes });
    }

    let file = pending.ok_or(ApiError::MissingFile)?;

    let stored = state
        .uploads
        .save(&file.name, &file.bytes)
        .await
        .map_err(|e| {
            tracing::error!("upload write failed: {:?}", e);
            ApiError::InternalError
        })?;

    Ok(Json(UploadResponse { url: stored.url }))
}

/// 크기 한도를 넘는 순간 중단
async fn read_limited(mut field: Field<'_>) -> Result<Vec<u8>, ApiError> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if buf.len() + chunk.len() > MAX_FILE_SIZE {
            return Err(ApiError::FileTooLarge);
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf)
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::FileTooLarge
    } else {
        ApiError::BadRequest(err.body_text())
    }
}
