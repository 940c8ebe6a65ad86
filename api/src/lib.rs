//! Community API Library
//!
//! # Overview
//!
//! 커뮤니티(임시 저장 글, 게시글), 첨부 파일 업로드, 결제 기록을 다루는 백엔드 API.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                         API                              │
//! │                                                          │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌─────────┐    │
//! │  │ Routes  │  │Services │  │   DB    │  │  Types  │    │
//! │  └────┬────┘  └────┬────┘  └────┬────┘  └────┬────┘    │
//! │       │            │            │            │          │
//! │       └────────────┴────────────┴────────────┘          │
//! │                         │                                │
//! └─────────────────────────┼────────────────────────────────┘
//!                           │
//!               ┌───────────┴───────────┐
//!               ▼                       ▼
//!      ┌────────────────┐      ┌────────────────┐
//!      │   PostgreSQL   │      │   uploads/     │
//!      └────────────────┘      └────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `config`: 환경 설정 관리
//! - `error`: 에러 타입 및 처리
//! - `auth`: 요청에 붙은 사용자 식별 정보
//! - `routes`: HTTP 엔드포인트 핸들러
//! - `services`: 업로드 파일 저장소
//! - `db`: 데이터베이스 연동 (Repository trait + PostgreSQL 구현)
//! - `types`: 공통 타입 정의
//!
//! ## Usage
//!
//! ```rust,ignore
//! use community_api::{config::Config, db::Database, services::UploadStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let db = Database::connect(&config.database_url).await?;
//!     let uploads = UploadStore::new(&config.upload_dir);
//!
//!     // ... 서버 시작
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod services;
pub mod db;
pub mod types;

// Re-exports for convenience
pub use config::Config;
pub use error::ApiError;
pub use db::{CommunityRepository, Database};
pub use services::UploadStore;

/// 애플리케이션 전역 상태
///
/// 저장소와 업로드 디렉토리는 모두 주입받음 (테스트에서는 Mock/임시 디렉토리)
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn CommunityRepository>,
    pub uploads: Arc<UploadStore>,
    pub config: Arc<Config>,
}
