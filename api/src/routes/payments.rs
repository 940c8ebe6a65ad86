//! Payment Record Endpoints
//!
//! 결제 기록 저장/조회만 제공. 주문 상태 변경(배송, 환불 등) 엔드포인트는 없으며
//! 새 기록은 항상 `ordered` 상태로 생성됨.
//!
//! # Defaults
//!
//! - quantity: 1
//! - deliveryFee: 3000
//! - discount: 0
//! - images: []

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    auth::Identity,
    db::{NewPayment, Payment, PaymentMethod, ProductRef},
    error::ApiError,
    types::{optional, required},
    AppState,
};

pub const DEFAULT_QUANTITY: i32 = 1;
pub const DEFAULT_DELIVERY_FEE: i64 = 3000;
pub const DEFAULT_DISCOUNT: i64 = 0;

// ============ Request/Response Types ============

/// 결제 기록 생성 요청
///
/// 구매자 ID와 상태는 받지 않음 (인증 정보 / 기본값 사용)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub product_refs: Option<Vec<ProductRef>>,
    pub price: Option<i64>,
    pub final_price: Option<i64>,
    pub option: Option<String>,
    pub quantity: Option<i32>,
    pub images: Option<Vec<String>>,
    pub buyer_name: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
    pub total_amounts: Option<Vec<i64>>,
    pub delivery_fee: Option<i64>,
    pub discount: Option<i64>,
    pub payment_method: Option<PaymentMethod>,
}

impl CreatePaymentRequest {
    fn validate(self, buyer_id: Uuid) -> Result<NewPayment, ApiError> {
        let product_refs = self
            .product_refs
            .filter(|refs| !refs.is_empty())
            .ok_or_else(|| ApiError::ValidationError("productRefs is required".to_string()))?;
        if product_refs.iter().any(|r| r.name.trim().is_empty()) {
            return Err(ApiError::ValidationError("product name is required".to_string()));
        }

        let price = non_negative("price", self.price)?;
        let final_price = non_negative("finalPrice", self.final_price)?;

        let total_amounts = self
            .total_amounts
            .filter(|amounts| !amounts.is_empty())
            .ok_or_else(|| ApiError::ValidationError("totalAmounts is required".to_string()))?;
        if total_amounts.iter().any(|a| *a < 0) {
            return Err(ApiError::ValidationError(
                "totalAmounts must not be negative".to_string(),
            ));
        }

        let quantity = self.quantity.unwrap_or(DEFAULT_QUANTITY);
        if quantity < 1 {
            return Err(ApiError::ValidationError("quantity must be at least 1".to_string()));
        }

        let delivery_fee =
            non_negative("deliveryFee", self.delivery_fee.or(Some(DEFAULT_DELIVERY_FEE)))?;
        let discount = non_negative("discount", self.discount.or(Some(DEFAULT_DISCOUNT)))?;

        let payment_method = self
            .payment_method
            .ok_or_else(|| ApiError::ValidationError("paymentMethod is required".to_string()))?;

        Ok(NewPayment {
            buyer_id,
            product_refs,
            price,
            final_price,
            option: optional(self.option),
            quantity,
            images: self.images.unwrap_or_default(),
            buyer_name: required("buyerName", self.buyer_name)?,
            address: required("address", self.address)?,
            message: optional(self.message),
            total_amounts,
            delivery_fee,
            discount,
            payment_method,
        })
    }
}

fn non_negative(field: &str, value: Option<i64>) -> Result<i64, ApiError> {
    match value {
        Some(v) if v >= 0 => Ok(v),
        Some(_) => Err(ApiError::ValidationError(format!("{} must not be negative", field))),
        None => Err(ApiError::ValidationError(format!("{} is required", field))),
    }
}

/// 결제 기록 생성 응답
#[derive(Debug, Serialize)]
pub struct PaymentSaved {
    pub message: String,
    pub payment: Payment,
}

// ============ Handlers ============

/// POST /shop/payments
pub async fn create_payment(
    State(state): State<AppState>,
    identity: Identity,
    body: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PaymentSaved>), ApiError> {
    let Json(req) = body?;
    let payment = req.validate(identity.user_id)?;

    let saved = state.repo.insert_payment(&payment).await?;
    tracing::info!(
        payment_id = %saved.id,
        buyer_id = %saved.buyer_id,
        method = ?saved.payment_method,
        "payment recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(PaymentSaved {
            message: "Payment recorded".to_string(),
            payment: saved,
        }),
    ))
}

/// GET /shop/payments
///
/// 내 결제 기록 (결제 시각 최신순)
pub async fn list_payments(
    State(state): State<AppState>,
    identity: Identity,
) -> Result<Json<Vec<Payment>>, ApiError> {
    let payments = state.repo.list_payments_by_buyer(identity.user_id).await?;
    Ok(Json(payments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::router;
    use crate::test_support::{get_request, json_request, read_json, test_state};
    use crate::db::{Catalog, PaymentStatus};
    use axum::http::Method;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn payment_at(buyer_id: Uuid, product: &str, minutes_ago: i64) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            buyer_id,
            product_refs: sqlx::types::Json(vec![ProductRef {
                catalog: Catalog::Md,
                product_id: Uuid::new_v4(),
                name: product.to_string(),
            }]),
            price: 10000,
            final_price: 13000,
            option: None,
            quantity: 1,
            images: Vec::new(),
            buyer_name: "Kim".to_string(),
            address: "Seoul".to_string(),
            message: None,
            total_amounts: vec![13000],
            delivery_fee: DEFAULT_DELIVERY_FEE,
            discount: DEFAULT_DISCOUNT,
            payment_method: PaymentMethod::Card,
            status: PaymentStatus::Ordered,
            paid_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    fn payment_body() -> Value {
        json!({
            "productRefs": [
                { "catalog": "md", "productId": Uuid::new_v4(), "name": "Tote bag" },
                { "catalog": "auction", "productId": Uuid::new_v4(), "name": "Signed poster" }
            ],
            "price": 25000,
            "finalPrice": 120000,
            "images": ["/uploads/1-2-tote.png"],
            "buyerName": "Kim",
            "address": "Seoul",
            "totalAmounts": [25000, 120000],
            "paymentMethod": "kakao_pay",
            "status": "refund_complete",
            "buyerId": Uuid::new_v4()
        })
    }

    #[tokio::test]
    async fn test_create_payment_applies_defaults() {
        let (state, repo, _dir) = test_state();
        let user = Uuid::new_v4();

        let res = router(state)
            .oneshot(json_request(Method::POST, "/shop/payments", Some(user), payment_body()))
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::CREATED);
        let payment = read_json(res).await["payment"].clone();
        assert_eq!(payment["buyerId"], user.to_string());
        assert_eq!(payment["quantity"], 1);
        assert_eq!(payment["deliveryFee"], 3000);
        assert_eq!(payment["discount"], 0);
        assert_eq!(payment["status"], "ordered");
        assert_eq!(payment["paymentMethod"], "kakao_pay");
        assert_eq!(payment["productRefs"][1]["catalog"], "auction");
        assert_eq!(repo.payment_count(), 1);
    }

    #[tokio::test]
    async fn test_create_payment_validation() {
        let (state, repo, _dir) = test_state();
        let app = router(state);
        let user = Uuid::new_v4();

        let mut cases = Vec::new();

        let mut body = payment_body();
        body["productRefs"] = json!([]);
        cases.push(body);

        let mut body = payment_body();
        body["address"] = json!("  ");
        cases.push(body);

        let mut body = payment_body();
        body["quantity"] = json!(0);
        cases.push(body);

        let mut body = payment_body();
        body["price"] = json!(-1);
        cases.push(body);

        let mut body = payment_body();
        body["paymentMethod"] = json!("bitcoin");
        cases.push(body);

        let mut body = payment_body();
        body.as_object_mut().unwrap().remove("paymentMethod");
        cases.push(body);

        for body in cases {
            let res = app
                .clone()
                .oneshot(json_request(Method::POST, "/shop/payments", Some(user), body))
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        }
        assert_eq!(repo.payment_count(), 0);
    }

    #[tokio::test]
    async fn test_payments_are_scoped_to_buyer() {
        let (state, repo, _dir) = test_state();
        let app = router(state);
        let buyer = Uuid::new_v4();

        let res = app
            .clone()
            .oneshot(json_request(Method::POST, "/shop/payments", None, payment_body()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(repo.payment_count(), 0);

        let res = app
            .clone()
            .oneshot(get_request("/shop/payments", None))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(res).await["code"], "UNAUTHORIZED");

        let res = app
            .clone()
            .oneshot(json_request(Method::POST, "/shop/payments", Some(buyer), payment_body()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);

        let mine = read_json(
            app.clone()
                .oneshot(get_request("/shop/payments", Some(buyer)))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(mine.as_array().unwrap().len(), 1);

        let theirs = read_json(
            app.oneshot(get_request("/shop/payments", Some(Uuid::new_v4())))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(theirs, json!([]));
    }

    #[tokio::test]
    async fn test_list_payments_newest_first() {
        let (state, repo, _dir) = test_state();
        let buyer = Uuid::new_v4();
        repo.seed_payment(payment_at(buyer, "b", 20));
        repo.seed_payment(payment_at(buyer, "d", 1));
        repo.seed_payment(payment_at(Uuid::new_v4(), "other", 0));
        repo.seed_payment(payment_at(buyer, "a", 30));
        repo.seed_payment(payment_at(buyer, "c", 10));

        let res = router(state)
            .oneshot(get_request("/shop/payments", Some(buyer)))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body = read_json(res).await;
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["productRefs"][0]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_payments_storage_failure() {
        let (state, repo, _dir) = test_state();
        let app = router(state);
        let buyer = Uuid::new_v4();
        repo.set_failing(true);

        let res = app
            .clone()
            .oneshot(json_request(Method::POST, "/shop/payments", Some(buyer), payment_body()))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let res = app.oneshot(get_request("/shop/payments", Some(buyer))).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
