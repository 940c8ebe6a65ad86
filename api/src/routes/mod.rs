//! API Routes Module
//!
//! 모든 HTTP 엔드포인트 정의
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - 서버 상태 확인
//!
//! POST /community/write        - 임시 저장
//! GET  /community/write        - 내 임시 저장 글 목록
//! GET  /community/write/:id    - 내 임시 저장 글 조회
//! POST /community/upload       - 첨부 파일 업로드 (multipart, field "file")
//! POST /community              - 게시글 작성
//! GET  /community              - 게시글 목록 (인증 불필요)
//!
//! POST /shop/payments          - 결제 기록 생성
//! GET  /shop/payments          - 내 결제 기록 목록
//!
//! GET  /uploads/*              - 업로드 파일 정적 서빙
//! ```

pub mod health;
pub mod writes;
pub mod upload;
pub mod community;
pub mod payments;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::{auth, services::PUBLIC_PREFIX, AppState};

/// 라우터 생성
///
/// 식별 정보 미들웨어까지 포함. CORS/Trace 레이어는 바이너리에서 추가
pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.uploads.dir());

    Router::new()
        // Health check
        .route("/health", get(health::health_check))

        // Drafts
        .route(
            "/community/write",
            post(writes::create_draft).get(writes::list_drafts),
        )
        .route("/community/write/:id", get(writes::get_draft))

        // Upload
        .route(
            "/community/upload",
            post(upload::upload_file).layer(DefaultBodyLimit::max(upload::UPLOAD_BODY_LIMIT)),
        )

        // Community posts
        .route(
            "/community",
            post(community::create_post).get(community::list_posts),
        )

        // Payments
        .route(
            "/shop/payments",
            post(payments::create_payment).get(payments::list_payments),
        )

        .nest_service(PUBLIC_PREFIX, uploads)

        .layer(middleware::from_fn_with_state(state.clone(), auth::attach_identity))
        .with_state(state)
}
