//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/v1/order` - 주문 생성

pub mod health;
pub mod orders;

pub use health::{health_router, ExchangeStatus, HealthResponse};
pub use orders::{orders_router, CreateOrderRequest};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/v1", orders_router())
}
