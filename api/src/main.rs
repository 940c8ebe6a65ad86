//! Community API Server
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Client (Frontend) / Auth Gateway             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  x-user-id
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      Axum Web Server                         │
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                      Routes Layer                        ││
//! │  │  /health  /community/*  /shop/payments  /uploads/*      ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Services Layer                        ││
//! │  │  UploadStore                                            ││
//! │  └─────────────────────────────────────────────────────────┘│
//! │  ┌─────────────────────────────────────────────────────────┐│
//! │  │                    Data Layer                            ││
//! │  │  CommunityRepository (PostgreSQL)                       ││
//! │  └─────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use community_api::{routes, AppState, Config, Database, UploadStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 환경변수 로드
    dotenvy::dotenv().ok();

    // 로깅 초기화
    // RUST_LOG=debug,sqlx=warn 형태로 레벨 제어 가능
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "community_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("🚀 Starting Community API Server");

    // 설정 로드
    let config = Config::from_env()?;
    tracing::info!("📋 Configuration loaded");

    // 데이터베이스 연결
    let db = Database::connect(&config.database_url).await?;
    tracing::info!("🗄️  Database connected");

    // 마이그레이션 실행
    db.run_migrations().await?;
    tracing::info!("📦 Migrations completed");

    // 업로드 디렉토리 준비
    let uploads = UploadStore::new(config.upload_dir.clone());
    uploads.ensure_dir().await?;
    tracing::info!("📁 Upload dir ready: {}", uploads.dir().display());

    // 앱 상태 구성
    let state = AppState {
        repo: Arc::new(db),
        uploads: Arc::new(uploads),
        config: Arc::new(config.clone()),
    };

    let app = create_app(state)?;

    // 서버 시작
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🌐 Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// 라우터 + 공통 미들웨어 (CORS, Trace)
fn create_app(state: AppState) -> anyhow::Result<Router> {
    // 프로덕션: ALLOWED_ORIGINS에 등록된 도메인만 허용
    // 개발: localhost 허용
    let cors = if state.config.is_production() {
        let origins = state
            .config
            .allowed_origins
            .iter()
            .map(|origin| {
                origin
                    .parse::<HeaderValue>()
                    .with_context(|| format!("invalid origin in ALLOWED_ORIGINS: {}", origin))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::HeaderName::from_bytes(state.config.identity_header.as_bytes())?,
            ])
    } else {
        CorsLayer::new()
            .allow_origin([
                HeaderValue::from_static("http://localhost:5173"),  // Vite dev server
                HeaderValue::from_static("http://localhost:3000"),  // Alternative
                HeaderValue::from_static("http://127.0.0.1:5173"),
            ])
            .allow_methods(Any)
            .allow_headers(Any)
    };

    Ok(routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors))
}
