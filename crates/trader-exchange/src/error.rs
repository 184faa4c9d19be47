//! 거래소 에러 타입.

use thiserror::Error;
use trader_core::OrderValidationError;

/// 거래소 관련 에러.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// 설정 에러 (시크릿 누락 등). 재시도 불가.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// 주문 검증 실패. 네트워크 호출 전에 발생.
    #[error("Validation error: {0}")]
    Validation(#[from] OrderValidationError),

    /// 거래소가 2xx 이외의 상태 코드를 반환 (응답 본문 원문 보존)
    #[error("API Error: {body}")]
    Api { status: u16, body: String },

    /// 네트워크/연결 에러 (DNS, 연결, 타임아웃)
    #[error("Network error: {0}")]
    Network(String),

    /// 파싱/역직렬화 에러
    #[error("Parse error: {0}")]
    Parse(String),
}

/// 거래소 작업을 위한 Result 타입.
pub type ExchangeResult<T> = Result<T, ExchangeError>;

impl ExchangeError {
    /// 호출자 입력 또는 거래소 거부로 인한 에러인지 확인.
    ///
    /// API 경계에서 HTTP 400으로 분류됩니다. 나머지는 500입니다.
    pub fn is_client_error(&self) -> bool {
        matches!(self, ExchangeError::Validation(_) | ExchangeError::Api { .. })
    }

    /// 재시도해도 해결되지 않는 치명적 에러인지 확인.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExchangeError::Configuration(_))
    }

    /// 거래소 HTTP 상태 코드 (API 에러인 경우).
    pub fn status(&self) -> Option<u16> {
        match self {
            ExchangeError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ExchangeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExchangeError::Network(format!("request timed out: {}", err))
        } else if err.is_decode() {
            ExchangeError::Parse(err.to_string())
        } else {
            ExchangeError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ExchangeError {
    fn from(err: serde_json::Error) -> Self {
        ExchangeError::Parse(err.to_string())
    }
}
