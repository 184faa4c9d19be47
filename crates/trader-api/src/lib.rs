//! # Trader API
//!
//! Binance Futures 주문 게이트웨이 HTTP 서버.
//!
//! - `POST /api/v1/order` - 주문 검증 후 거래소로 전달
//! - `GET /health`, `GET /health/ready` - 헬스 체크

pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{order_error_response, order_error_status, ApiErrorResponse, ApiResult};
pub use server::{create_app, serve};
pub use state::AppState;
