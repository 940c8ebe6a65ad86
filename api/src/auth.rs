//! Request Identity
//!
//! 인증 자체는 이 서비스의 범위 밖. 앞단 게이트웨이가 인증을 끝내고
//! 사용자 ID를 헤더에 실어 보내면 `attach_identity` 미들웨어가
//! request extension에 `Identity`를 붙임.
//!
//! 핸들러는 `Identity` extractor로 꺼내 쓰고, 없으면 401.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{error::ApiError, AppState};

/// 인증된 사용자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .copied()
            .ok_or(ApiError::Unauthorized)
    }
}

/// 설정된 식별 헤더(기본 `x-user-id`)를 읽어 `Identity`를 붙이는 미들웨어
///
/// 헤더가 없거나 UUID가 아니면 아무것도 붙이지 않음 → 보호된 엔드포인트에서 401
pub async fn attach_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let identity = req
        .headers()
        .get(state.config.identity_header.as_str())
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .map(Identity::new);

    req.extensions_mut().remove::<Identity>();
    if let Some(identity) = identity {
        tracing::debug!(user_id = %identity.user_id, "identity attached");
        req.extensions_mut().insert(identity);
    }

    next.run(req).await
}
