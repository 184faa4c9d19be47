//! 애플리케이션 상태.
//!
//! 모든 핸들러가 공유하는 읽기 전용 상태입니다.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use trader_exchange::BinanceFuturesClient;

/// 애플리케이션 상태.
#[derive(Debug, Clone)]
pub struct AppState {
    /// 서명 요청을 보내는 거래소 클라이언트
    pub client: Arc<BinanceFuturesClient>,

    /// API 버전
    pub version: String,

    /// 서버 시작 시간
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new(client: BinanceFuturesClient) -> Self {
        Self {
            client: Arc::new(client),
            version: env!("CARGO_PKG_VERSION").to_string(),
            started_at: Utc::now(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 고정 자격증명으로 `base_url`(모의 거래소)을 바라보는 클라이언트를 만듭니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state(base_url: &str) -> AppState {
    use trader_exchange::{BinanceFuturesConfig, Credentials};

    let credentials = Credentials::new(Some("test_api_key".to_string()), "test_api_secret")
        .expect("test credentials");
    let config = BinanceFuturesConfig::new(credentials).with_base_url(base_url);
    let client = BinanceFuturesClient::new(config).expect("test client");
    AppState::new(client)
}
