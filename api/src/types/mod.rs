//! Common Types Module
//!
//! 여러 엔드포인트에서 공통으로 쓰는 응답 타입과 입력 검증 헬퍼

use serde::Serialize;

use crate::error::ApiError;

/// 생성 성공 응답 (`{ message, post }`)
#[derive(Debug, Serialize)]
pub struct PostSaved<T> {
    pub message: String,
    pub post: T,
}

impl<T> PostSaved<T> {
    pub fn new(message: &str, post: T) -> Self {
        Self {
            message: message.to_string(),
            post,
        }
    }
}

/// 필수 문자열 필드 추출
///
/// 누락, 빈 문자열, 공백만 있는 문자열은 모두 누락으로 취급
pub fn required(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::ValidationError(format!("{} is required", field))),
    }
}

/// 선택 문자열 필드 정리 (빈 문자열은 None)
pub fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 게시글 계열 입력(title, category, content)의 필수 필드 검증
///
/// 누락된 필드를 모두 모아 한 번에 보고
pub fn require_post_fields(
    title: Option<String>,
    category: Option<String>,
    content: Option<String>,
) -> Result<(String, String, String), ApiError> {
    let fields = [("title", title), ("category", category), ("content", content)];
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(ApiError::ValidationError(format!(
            "All fields are required (missing: {})",
            missing.join(", ")
        )));
    }

    let [(_, title), (_, category), (_, content)] = fields;
    Ok((
        title.unwrap_or_default(),
        category.unwrap_or_default(),
        content.unwrap_or_default(),
    ))
}
