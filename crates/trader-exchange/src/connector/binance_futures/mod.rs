//! Binance USD-M Futures 커넥터.
//!
//! - `auth`: HMAC-SHA256 요청 서명
//! - `config`: 자격증명 및 클라이언트 설정
//! - `client`: 서명된 REST 요청 전송 및 주문 실행

pub mod auth;
pub mod client;
pub mod config;

pub use auth::{encode_query, RequestSigner, SignedRequest};
pub use client::{BinanceFuturesClient, API_KEY_HEADER, ORDER_ENDPOINT};
pub use config::{BinanceFuturesConfig, Credentials};
