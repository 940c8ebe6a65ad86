//! Draft (임시 저장) Endpoints
//!
//! 작성 중인 글을 사용자별로 저장/조회.
//! 작성자 ID는 항상 인증 정보에서 가져오며 요청 바디의 값은 무시함.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::Identity,
    db::{Draft, NewDraft},
    error::ApiError,
    types::{optional, require_post_fields, PostSaved},
    AppState,
};

// ============ Request Types ============

/// 임시 저장 요청
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
    /// 첨부 파일 URL (`/community/upload` 응답의 url)
    #[serde(alias = "writeFile")]
    pub attachment_url: Option<String>,
}

impl DraftRequest {
    fn validate(self, owner_id: Uuid) -> Result<NewDraft, ApiError> {
        let (title, category, content) =
            require_post_fields(self.title, self.category, self.content)?;

        Ok(NewDraft {
            owner_id,
            title,
            category,
            content,
            attachment_url: optional(self.attachment_url),
        })
    }
}

// ============ Handlers ============

/// POST /community/write
///
/// 임시 저장
///
/// # Response
///
/// ```json
/// {
///   "message": "Draft saved",
///   "post": { "id": "...", "ownerId": "...", "title": "A", ... }
/// }
/// ```
pub async fn create_draft(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<DraftRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostSaved<Draft>>), ApiError> {
    let Json(req) = body?;
    let draft = req.validate(identity.user_id)?;

    let saved = state.repo.insert_draft(&draft).await?;
    tracing::info!(draft_id = %saved.id, owner_id = %saved.owner_id, "draft saved");

    Ok((StatusCode::CREATED, Json(PostSaved::new("Draft saved", saved))))
}

/// GET /community/write
///
/// 내 임시 저장 글 목록 (최신순)
pub async fn list_drafts(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<Draft>>, ApiError> {
    let drafts = state.repo.list_drafts_by_owner(identity.user_id).await?;
    Ok(Json(drafts))
}

/// GET /community/write/:id
///
/// 내 임시 저장 글 조회. 다른 사람의 글이거나 id 형식이 잘못된 경우 모두 404
pub async fn get_draft(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<String>,
) -> Result<Json<Draft>, ApiError> {
    let id = Uuid::parse_str(&id).map_err(|_| ApiError::NotFound("Draft".to_string()))?;

    state
        .repo
        .find_draft(id, identity.user_id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Draft".to_string()))
}
