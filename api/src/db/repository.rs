//! Repository Pattern Implementation
//!
//! 핸들러는 `CommunityRepository` trait에만 의존함
//! - PostgreSQL 구현: `db/mod.rs`의 `Database`
//! - 테스트용 Mock: 아래 `mock` 모듈 (인메모리)
//!
//! id와 생성 시각은 저장 시점에 저장소 구현이 채움

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use super::models::{CommunityPost, Draft, NewCommunityPost, NewDraft, NewPayment, Payment};

/// 커뮤니티/결제 저장소 인터페이스
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// 저장소 연결 확인
    async fn health_check(&self) -> Result<()>;

    // ============ Drafts ============

    async fn insert_draft(&self, draft: &NewDraft) -> Result<Draft>;

    /// 작성자의 임시 저장 글 (최신순)
    async fn list_drafts_by_owner(&self, owner_id: Uuid) -> Result<Vec<Draft>>;

    /// id와 작성자가 모두 일치할 때만 반환
    async fn find_draft(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Draft>>;

    // ============ Community Posts ============

    async fn insert_post(&self, post: &NewCommunityPost) -> Result<CommunityPost>;

    /// 전체 게시글 (최신순, 페이지네이션 없음)
    async fn list_posts(&self) -> Result<Vec<CommunityPost>>;

    // ============ Payments ============

    async fn insert_payment(&self, payment: &NewPayment) -> Result<Payment>;

    /// 구매자의 결제 기록 (결제 시각 최신순)
    async fn list_payments_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Payment>>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::db::models::PaymentStatus;
    use anyhow::bail;
    use chrono::Utc;
    use sqlx::types::Json;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::RwLock;

    /// 인메모리 저장소
    ///
    /// `set_failing(true)` 이후 모든 호출이 에러를 반환 (500 경로 테스트용)
    #[derive(Default)]
    pub struct MockRepository {
        drafts: RwLock<Vec<Draft>>,
        posts: RwLock<Vec<CommunityPost>>,
        payments: RwLock<Vec<Payment>>,
        failing: AtomicBool,
    }

    impl MockRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_failing(&self, failing: bool) {
            self.failing.store(failing, Ordering::SeqCst);
        }

        /// 생성 시각을 직접 지정해서 게시글 삽입
        pub fn seed_post(&self, post: CommunityPost) {
            self.posts.write().unwrap().push(post);
        }

        pub fn seed_draft(&self, draft: Draft) {
            self.drafts.write().unwrap().push(draft);
        }

        /// 결제 시각을 직접 지정해서 결제 기록 삽입
        pub fn seed_payment(&self, payment: Payment) {
            self.payments.write().unwrap().push(payment);
        }

        pub fn draft_count(&self) -> usize {
            self.drafts.read().unwrap().len()
        }

        pub fn post_count(&self) -> usize {
            self.posts.read().unwrap().len()
        }

        pub fn payment_count(&self) -> usize {
            self.payments.read().unwrap().len()
        }

        fn check(&self) -> Result<()> {
            if self.failing.load(Ordering::SeqCst) {
                bail!("mock storage failure");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl CommunityRepository for MockRepository {
        async fn health_check(&self) -> Result<()> {
            self.check()
        }

        async fn insert_draft(&self, draft: &NewDraft) -> Result<Draft> {
            self.check()?;
            let saved = Draft {
                id: Uuid::new_v4(),
                owner_id: draft.owner_id,
                title: draft.title.clone(),
                category: draft.category.clone(),
                content: draft.content.clone(),
                attachment_url: draft.attachment_url.clone(),
                created_at: Utc::now(),
            };
            self.drafts.write().unwrap().push(saved.clone());
            Ok(saved)
        }

        async fn list_drafts_by_owner(&self, owner_id: Uuid) -> Result<Vec<Draft>> {
            self.check()?;
            let mut drafts: Vec<Draft> = self
                .drafts
                .read()
                .unwrap()
                .iter()
                .filter(|d| d.owner_id == owner_id)
                .cloned()
                .collect();
            drafts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(drafts)
        }

        async fn find_draft(&self, id: Uuid, owner_id: Uuid) -> Result<Option<Draft>> {
            self.check()?;
            let drafts = self.drafts.read().unwrap();
            Ok(drafts
                .iter()
                .find(|d| d.id == id && d.owner_id == owner_id)
                .cloned())
        }

        async fn insert_post(&self, post: &NewCommunityPost) -> Result<CommunityPost> {
            self.check()?;
            let saved = CommunityPost {
                id: Uuid::new_v4(),
                owner_id: post.owner_id,
                title: post.title.clone(),
                category: post.category.clone(),
                content: post.content.clone(),
                created_at: Utc::now(),
            };
            self.posts.write().unwrap().push(saved.clone());
            Ok(saved)
        }

        async fn list_posts(&self) -> Result<Vec<CommunityPost>> {
            self.check()?;
            let mut posts = self.posts.read().unwrap().clone();
            posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            Ok(posts)
        }

        async fn insert_payment(&self, payment: &NewPayment) -> Result<Payment> {
            self.check()?;
            let saved = Payment {
                id: Uuid::new_v4(),
                buyer_id: payment.buyer_id,
                product_refs: Json(payment.product_refs.clone()),
                price: payment.price,
                final_price: payment.final_price,
                option: payment.option.clone(),
                quantity: payment.quantity,
                images: payment.images.clone(),
                buyer_name: payment.buyer_name.clone(),
                address: payment.address.clone(),
                message: payment.message.clone(),
                total_amounts: payment.total_amounts.clone(),
                delivery_fee: payment.delivery_fee,
                discount: payment.discount,
                payment_method: payment.payment_method,
                status: PaymentStatus::default(),
                paid_at: Utc::now(),
            };
            self.payments.write().unwrap().push(saved.clone());
            Ok(saved)
        }

        async fn list_payments_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Payment>> {
            self.check()?;
            let mut payments: Vec<Payment> = self
                .payments
                .read()
                .unwrap()
                .iter()
                .filter(|p| p.buyer_id == buyer_id)
                .cloned()
                .collect();
            payments.sort_by(|a, b| b.paid_at.cmp(&a.paid_at));
            Ok(payments)
        }
    }
}
