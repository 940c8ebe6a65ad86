//! Database Models
//!
//! 커뮤니티 글, 임시 저장 글, 결제 기록 테이블에 매핑되는 모델.
//! JSON 응답에도 그대로 사용되므로 camelCase로 직렬화함.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use uuid::Uuid;

/// 임시 저장 글 (writes)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub id: Uuid,

    /// 작성자 ID, 항상 인증된 사용자에서 채워짐
    pub owner_id: Uuid,

    pub title: String,
    pub category: String,
    pub content: String,

    /// 첨부 파일 URL (`/uploads/...`)
    pub attachment_url: Option<String>,

    pub created_at: DateTime<Utc>,
}

/// 커뮤니티 게시글 (전체 공개)
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CommunityPost {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub category: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// 검증을 통과한 임시 저장 글 입력
#[derive(Debug, Clone)]
pub struct NewDraft {
    pub owner_id: Uuid,
    pub title: String,
    pub category: String,
    pub content: String,
    pub attachment_url: Option<String>,
}

/// 검증을 통과한 게시글 입력
#[derive(Debug, Clone)]
pub struct NewCommunityPost {
    pub owner_id: Uuid,
    pub title: String,
    pub category: String,
    pub content: String,
}

// ============ Payment ============

/// 상품 카탈로그 구분
/// - md: 굿즈(MD) 상품
/// - auction: 경매 상품
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Catalog {
    Md,
    Auction,
}

/// 결제된 상품 참조
///
/// 상품 문서는 카탈로그별로 따로 관리되므로 (catalog, product_id)로 참조하고
/// 결제 시점의 상품명은 스냅샷으로 함께 저장
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub catalog: Catalog,
    pub product_id: Uuid,
    pub name: String,
}

/// 결제 수단
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// 신용/체크카드
    #[serde(alias = "신용/체크카드")]
    Card,
    /// 무통장입금
    #[serde(alias = "무통장입금")]
    BankTransfer,
    #[serde(alias = "네이버페이")]
    NaverPay,
    #[serde(alias = "카카오페이")]
    KakaoPay,
    #[serde(alias = "토스페이")]
    TossPay,
}

/// 주문 상태
///
/// 상태 값만 모델링함. 상태 전이 로직은 이 서비스에 없음
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "TEXT", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// 주문완료
    #[default]
    Ordered,
    /// 배송중
    Shipping,
    /// 배송완료
    Delivered,
    /// 환불 처리
    RefundProcessing,
    /// 환불 완료
    RefundComplete,
}

/// 결제 기록
///
/// 금액은 모두 원(KRW) 단위 정수
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,

    /// 구매자 (users 참조)
    pub buyer_id: Uuid,

    pub product_refs: Json<Vec<ProductRef>>,

    /// MD 가격
    pub price: i64,
    /// 경매 낙찰가
    pub final_price: i64,
    /// MD 옵션
    pub option: Option<String>,
    pub quantity: i32,
    /// 상품 이미지 URL
    pub images: Vec<String>,

    // 주문 정보
    pub buyer_name: String,
    pub address: String,
    pub message: Option<String>,

    /// 카탈로그별 결제 금액
    pub total_amounts: Vec<i64>,
    pub delivery_fee: i64,
    pub discount: i64,
    pub payment_method: PaymentMethod,
    pub status: PaymentStatus,
    pub paid_at: DateTime<Utc>,
}

/// 검증을 통과한 결제 입력 (기본값 적용 완료)
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub buyer_id: Uuid,
    pub product_refs: Vec<ProductRef>,
    pub price: i64,
    pub final_price: i64,
    pub option: Option<String>,
    pub quantity: i32,
    pub images: Vec<String>,
    pub buyer_name: String,
    pub address: String,
    pub message: Option<String>,
    pub total_amounts: Vec<i64>,
    pub delivery_fee: i64,
    pub discount: i64,
    pub payment_method: PaymentMethod,
}
