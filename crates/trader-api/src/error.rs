//! API 에러 응답 타입.
//!
//! 모든 실패 응답은 `{"detail": "..."}` 형식입니다.
//! 거래소 에러의 HTTP 상태 분류도 이 모듈에서 담당합니다.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use trader_exchange::ExchangeError;

/// API 에러 응답.
///
/// # 예시
///
/// ```json
/// { "detail": "API Error: {\"code\":-1013,\"msg\":\"bad symbol\"}" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// 사람이 읽을 수 있는 에러 메시지
    pub detail: String,
}

impl ApiErrorResponse {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.detail)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 주문 에러의 HTTP 상태 코드.
///
/// 검증 실패와 거래소 거부는 400, 나머지(네트워크, 설정, 파싱)는 500입니다.
pub fn order_error_status(err: &ExchangeError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// 주문 에러를 로그에 남기고 API 응답으로 변환.
pub fn order_error_response(err: ExchangeError) -> (StatusCode, Json<ApiErrorResponse>) {
    let status = order_error_status(&err);
    if status.is_client_error() {
        warn!(status = status.as_u16(), error = %err, "Order rejected");
    } else {
        error!(status = status.as_u16(), error = %err, "Unexpected error placing order");
    }

    (status, Json(ApiErrorResponse::new(err.to_string())))
}
