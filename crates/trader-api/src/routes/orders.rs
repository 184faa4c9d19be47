//! 주문 endpoint.
//!
//! 요청 본문을 검증한 뒤 거래소로 주문을 전달하고, 거래소 응답 JSON을 그대로 반환합니다.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};
use trader_core::OrderIntent;
use trader_exchange::ExchangeError;

use crate::error::{order_error_response, ApiErrorResponse, ApiResult};
use crate::state::AppState;

/// 주문 생성 요청.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// 거래 심볼 (예: BTCUSDT)
    pub symbol: String,
    /// BUY 또는 SELL
    pub side: String,
    /// MARKET 또는 LIMIT
    pub order_type: String,
    /// 주문 수량
    pub quantity: Decimal,
    /// 지정가 (LIMIT 전용)
    #[serde(default)]
    pub price: Option<Decimal>,
}

impl CreateOrderRequest {
    /// 주문 의도로 변환 (검증 포함).
    pub fn to_intent(&self) -> Result<OrderIntent, ExchangeError> {
        OrderIntent::parse(
            &self.symbol,
            &self.side,
            &self.order_type,
            self.quantity,
            self.price,
        )
        .map_err(ExchangeError::from)
    }
}

/// 요청 본문 파싱 실패를 400 `{detail}` 응답으로 변환.
///
/// 누락된 필드나 잘못된 타입도 검증 실패와 같은 형식으로 응답합니다.
pub fn body_rejection_response(rejection: JsonRejection) -> (StatusCode, Json<ApiErrorResponse>) {
    let detail = format!("Invalid request body: {}", rejection.body_text());
    warn!(status = rejection.status().as_u16(), error = %detail, "Order request body rejected");
    (StatusCode::BAD_REQUEST, Json(ApiErrorResponse::new(detail)))
}

/// 주문 생성.
///
/// POST /api/v1/order
pub async fn create_order(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let Json(request) = payload.map_err(body_rejection_response)?;

    info!(
        symbol = %request.symbol,
        side = %request.side,
        order_type = %request.order_type,
        quantity = %request.quantity,
        price = ?request.price,
        "Received order request"
    );

    let intent = request.to_intent().map_err(order_error_response)?;
    let result = state
        .client
        .place_order(&intent)
        .await
        .map_err(order_error_response)?;

    Ok(Json(result))
}

/// 주문 라우터.
pub fn orders_router() -> Router<Arc<AppState>> {
    Router::new().route("/order", post(create_order))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::body::Body;
    use axum::http::Request;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use tower::ServiceExt;

    fn app(base_url: &str) -> Router {
        Router::new()
            .nest("/api/v1", orders_router())
            .with_state(Arc::new(create_test_state(base_url)))
    }

    async fn post_order(app: Router, payload: Value) -> (StatusCode, Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/order")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_market_order_passthrough() {
        let mut server = Server::new_async().await;
        let exchange_body = json!({
            "orderId": 123,
            "status": "FILLED",
            "executedQty": "1",
            "avgPrice": "50000"
        });
        let mock = server
            .mock("POST", "/fapi/v1/order")
            .match_header("X-MBX-APIKEY", "test_api_key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("symbol".into(), "BTCUSDT".into()),
                Matcher::UrlEncoded("type".into(), "MARKET".into()),
                Matcher::UrlEncoded("quantity".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(exchange_body.to_string())
            .create_async()
            .await;

        let (status, body) = post_order(
            app(&server.url()),
            json!({"symbol": "BTCUSDT", "side": "BUY", "order_type": "MARKET", "quantity": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, exchange_body);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_limit_order_sends_price_and_gtc() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/fapi/v1/order")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("type".into(), "LIMIT".into()),
                Matcher::UrlEncoded("price".into(), "65000.5".into()),
                Matcher::UrlEncoded("timeInForce".into(), "GTC".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"orderId":7,"status":"NEW"}"#)
            .create_async()
            .await;

        let (status, body) = post_order(
            app(&server.url()),
            json!({
                "symbol": "BTCUSDT",
                "side": "SELL",
                "order_type": "LIMIT",
                "quantity": "0.002",
                "price": "65000.50"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["orderId"], 7);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_limit_without_price_never_reaches_exchange() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/fapi/v1/order")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (status, body) = post_order(
            app(&server.url()),
            json!({"symbol": "BTCUSDT", "side": "BUY", "order_type": "LIMIT", "quantity": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiErrorResponse = serde_json::from_value(body).unwrap();
        assert!(error.detail.contains("Price is required for LIMIT orders."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_market_with_price_is_rejected() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/fapi/v1/order")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (status, body) = post_order(
            app(&server.url()),
            json!({
                "symbol": "BTCUSDT",
                "side": "BUY",
                "order_type": "MARKET",
                "quantity": 1,
                "price": 50000
            }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .contains("Price should not be provided for MARKET orders."));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_invalid_side_is_rejected() {
        let (status, body) = post_order(
            app("http://127.0.0.1:1"),
            json!({"symbol": "BTCUSDT", "side": "HOLD", "order_type": "MARKET", "quantity": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("HOLD"));
    }

    #[tokio::test]
    async fn test_exchange_rejection_is_bad_request() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/fapi/v1/order")
            .match_query(Matcher::Any)
            .with_status(400)
            .with_body(r#"{"code":-1013,"msg":"bad symbol"}"#)
            .create_async()
            .await;

        let (status, body) = post_order(
            app(&server.url()),
            json!({"symbol": "NOPE", "side": "BUY", "order_type": "MARKET", "quantity": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"].as_str().unwrap().contains("bad symbol"));
    }

    #[tokio::test]
    async fn test_network_failure_is_internal_error() {
        let (status, body) = post_order(
            app("http://127.0.0.1:1"),
            json!({"symbol": "BTCUSDT", "side": "BUY", "order_type": "MARKET", "quantity": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["detail"].as_str().unwrap().starts_with("Network error"));
    }

    #[tokio::test]
    async fn test_missing_field_is_bad_request_with_detail() {
        let (status, body) = post_order(
            app("http://127.0.0.1:1"),
            json!({"symbol": "BTCUSDT", "order_type": "MARKET", "quantity": 1}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiErrorResponse = serde_json::from_value(body).unwrap();
        assert!(error.detail.starts_with("Invalid request body"));
        assert!(error.detail.contains("side"));
    }

    #[tokio::test]
    async fn test_non_numeric_quantity_is_bad_request_with_detail() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/fapi/v1/order")
            .match_query(Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let (status, body) = post_order(
            app(&server.url()),
            json!({"symbol": "BTCUSDT", "side": "BUY", "order_type": "MARKET", "quantity": "abc"}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
        mock.assert_async().await;
    }
}
