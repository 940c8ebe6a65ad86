//! Database Module
//!
//! PostgreSQL + SQLx 기반 저장소
//!
//! - 커넥션 풀: `PgPool` (최소/최대 커넥션, 획득 타임아웃)
//! - 마이그레이션: `migrations/` 디렉토리, 바이너리에 임베드
//! - 결제 상품 참조는 JSONB, 이미지/금액 목록은 배열 컬럼
//!
//! 핸들러는 `CommunityRepository` trait을 통해서만 접근함

mod models;
mod repository;

pub use models::*;
pub use repository::CommunityRepository;

#[cfg(test)]
pub use repository::mock;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{postgres::PgPoolOptions, types::Json, PgPool};
use uuid::Uuid;

const DRAFT_COLUMNS: &str = "id, owner_id, title, category, content, attachment_url, created_at";
const POST_COLUMNS: &str = "id, owner_id, title, category, content, created_at";
const PAYMENT_COLUMNS: &str = r#"
    id, buyer_id, product_refs, price, final_price, option, quantity, images,
    buyer_name, address, message, total_amounts, delivery_fee, discount,
    payment_method, status, paid_at
"#;

/// 데이터베이스 연결 및 쿼리 담당
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// 데이터베이스 연결
    ///
    /// # Connection Pool Settings
    ///
    /// - max_connections: 10 (트래픽에 따라 조정)
    /// - min_connections: 1 (idle 시 최소 유지)
    /// - acquire_timeout: 3초 (커넥션 획득 대기)
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(3))
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// 마이그레이션 실행
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl CommunityRepository for Database {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// 임시 저장 글 생성
    async fn insert_draft(&self, draft: &NewDraft) -> Result<Draft> {
        let saved = sqlx::query_as::<_, Draft>(&format!(
            r#"
            INSERT INTO writes (id, owner_id, title, category, content, attachment_url, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {DRAFT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(draft.owner_id)
        .bind(&draft.title)
        .bind(&draft.category)
        .bind(&draft.content)
        .bind(&draft.attachment_url)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_drafts_by_owner(&self, owner_id: Uuid) -> Result<Vec<Draft>> {
        let drafts = sqlx::query_as::<_, Draft>(&format!(
            r#"
            SELECT {DRAFT_COLUMNS}
            FROM writes
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#
        ))
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(drafts)
    }

    async fn find_draft(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Draft>> {
        let draft = sqlx::query_as::<_, Draft>(&format!(
            r#"
            SELECT {DRAFT_COLUMNS}
            FROM writes
            WHERE id = $1 AND owner_id = $2
            "#
        ))
        .bind(id)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(draft)
    }

    /// 커뮤니티 게시글 생성
    async fn insert_post(&self, post: &NewCommunityPost) -> Result<CommunityPost> {
        let saved = sqlx::query_as::<_, CommunityPost>(&format!(
            r#"
            INSERT INTO community_posts (id, owner_id, title, category, content, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(post.owner_id)
        .bind(&post.title)
        .bind(&post.category)
        .bind(&post.content)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_posts(&self) -> Result<Vec<CommunityPost>> {
        let posts = sqlx::query_as::<_, CommunityPost>(&format!(
            "SELECT {POST_COLUMNS} FROM community_posts ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// 결제 기록 생성 (status는 컬럼 기본값 'ordered')
    async fn insert_payment(&self, payment: &NewPayment) -> Result<Payment> {
        let saved = sqlx::query_as::<_, Payment>(&format!(
            r#"
            INSERT INTO payments (
                id, buyer_id, product_refs, price, final_price, option, quantity, images,
                buyer_name, address, message, total_amounts, delivery_fee, discount,
                payment_method, paid_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {PAYMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(payment.buyer_id)
        .bind(Json(&payment.product_refs))
        .bind(payment.price)
        .bind(payment.final_price)
        .bind(&payment.option)
        .bind(payment.quantity)
        .bind(&payment.images)
        .bind(&payment.buyer_name)
        .bind(&payment.address)
        .bind(&payment.message)
        .bind(&payment.total_amounts)
        .bind(payment.delivery_fee)
        .bind(payment.discount)
        .bind(payment.payment_method)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }

    async fn list_payments_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Payment>> {
        let payments = sqlx::query_as::<_, Payment>(&format!(
            r#"
            SELECT {PAYMENT_COLUMNS}
            FROM payments
            WHERE buyer_id = $1
            ORDER BY paid_at DESC
            "#
        ))
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }
}
