//! 공통 에러 타입.
//!
//! 설정 로드와 로깅 초기화처럼 프로세스 시작 단계에서 발생하는 에러를 정의합니다.
//! 주문 검증 에러는 [`crate::OrderValidationError`]를 참고하세요.

use thiserror::Error;

/// 핵심 에러.
#[derive(Debug, Error)]
pub enum TraderError {
    /// 설정 에러
    #[error("설정 에러: {0}")]
    Config(String),

    /// 로깅 초기화 에러
    #[error("로깅 에러: {0}")]
    Logging(String),

    /// 잘못된 입력
    #[error("잘못된 입력: {0}")]
    InvalidInput(String),
}

/// 핵심 작업을 위한 Result 타입.
pub type TraderResult<T> = Result<T, TraderError>;

impl TraderError {
    /// 프로세스를 계속 실행할 수 없는 에러인지 확인합니다.
    pub fn is_fatal(&self) -> bool {
        matches!(self, TraderError::Config(_) | TraderError::Logging(_))
    }
}

impl From<config::ConfigError> for TraderError {
    fn from(err: config::ConfigError) -> Self {
        TraderError::Config(err.to_string())
    }
}

impl From<std::io::Error> for TraderError {
    fn from(err: std::io::Error) -> Self {
        TraderError::Logging(err.to_string())
    }
}
