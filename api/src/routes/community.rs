//! Community Post Endpoints
//!
//! 게시글은 전체 공개. 작성에만 인증이 필요함.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    auth::Identity,
    db::{CommunityPost, NewCommunityPost},
    error::ApiError,
    types::{require_post_fields, PostSaved},
    AppState,
};

/// 게시글 작성 요청
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub content: Option<String>,
}

impl CreatePostRequest {
    fn validate(self, owner_id: Uuid) -> Result<NewCommunityPost, ApiError> {
        let (title, category, content) =
            require_post_fields(self.title, self.category, self.content)?;

        Ok(NewCommunityPost {
            owner_id,
            title,
            category,
            content,
        })
    }
}

/// POST /community
///
/// 게시글 작성
pub async fn create_post(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<CreatePostRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PostSaved<CommunityPost>>), ApiError> {
    let Json(req) = body?;
    let post = req.validate(identity.user_id)?;

    let saved = state.repo.insert_post(&post).await?;
    tracing::info!(post_id = %saved.id, owner_id = %saved.owner_id, "community post created");

    Ok((StatusCode::CREATED, Json(PostSaved::new("Post created", saved))))
}

/// GET /community
///
/// 전체 게시글 (최신순, 페이지네이션 없음)
pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<Json<Vec<CommunityPost>>, ApiError> {
    let posts = state.repo.list_posts().await?;
    Ok(Json(posts))
}
