//! Health Check Endpoint
//!
//! 로드밸런서 상태 확인용. 저장소 연결과 업로드 디렉토리까지 확인함.
//!
//! 둘 중 하나라도 실패하면 `degraded` (HTTP 상태는 항상 200)

use std::path::Path;
use std::time::Instant;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{db::CommunityRepository, AppState};

/// 전체 서비스 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
}

/// Health check 응답
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: ServiceStatus,
    pub version: &'static str,
    pub database: DatabaseStatus,
    pub uploads: UploadDirStatus,
    pub checked_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseStatus {
    pub connected: bool,
    pub latency_ms: Option<u64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadDirStatus {
    pub ready: bool,
}

impl DatabaseStatus {
    /// 저장소 왕복 시간 측정
    async fn measure(repo: &dyn CommunityRepository) -> Self {
        let started = Instant::now();
        match repo.health_check().await {
            Ok(()) => Self {
                connected: true,
                latency_ms: Some(started.elapsed().as_millis() as u64),
            },
            Err(e) => {
                tracing::warn!("repository health check failed: {:#}", e);
                Self {
                    connected: false,
                    latency_ms: None,
                }
            }
        }
    }
}

impl UploadDirStatus {
    async fn inspect(dir: &Path) -> Self {
        let ready = tokio::fs::metadata(dir)
            .await
            .map(|meta| meta.is_dir())
            .unwrap_or(false);
        if !ready {
            tracing::warn!(dir = %dir.display(), "upload dir missing");
        }
        Self { ready }
    }
}

impl HealthResponse {
    fn new(database: DatabaseStatus, uploads: UploadDirStatus) -> Self {
        let status = if database.connected && uploads.ready {
            ServiceStatus::Healthy
        } else {
            ServiceStatus::Degraded
        };

        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
            uploads,
            checked_at: chrono::Utc::now(),
        }
    }
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = DatabaseStatus::measure(state.repo.as_ref()).await;
    let uploads = UploadDirStatus::inspect(state.uploads.dir()).await;
    Json(HealthResponse::new(database, uploads))
}
