//! Binance Futures 클라이언트 설정.
//!
//! 자격증명은 프로세스 시작 시 한 번 로드되며 이후 변경되지 않습니다.
//! 시크릿이 없으면 설정 생성 단계에서 실패합니다.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use trader_core::{ExchangeConfig, DEFAULT_EXCHANGE_BASE_URL};

use crate::{ExchangeError, ExchangeResult};

/// API 키 환경 변수
pub const API_KEY_ENV: &str = "BINANCE_API_KEY";
/// API 시크릿 환경 변수
pub const API_SECRET_ENV: &str = "BINANCE_API_SECRET";
/// API 시크릿 대체 환경 변수
pub const SECRET_KEY_ENV: &str = "BINANCE_SECRET_KEY";

/// API 자격증명.
///
/// # 보안
/// - 시크릿은 `SecretString`으로 보관되어 drop 시 메모리가 0으로 초기화됩니다.
/// - `Debug` 구현은 민감 정보를 마스킹합니다.
pub struct Credentials {
    api_key: Option<String>,
    api_secret: SecretString,
}

impl Credentials {
    /// 명시적인 값으로 자격증명 생성.
    ///
    /// # Errors
    /// 시크릿이 비어 있으면 `ExchangeError::Configuration`을 반환합니다.
    pub fn new(api_key: Option<String>, api_secret: impl Into<String>) -> ExchangeResult<Self> {
        let api_secret = api_secret.into();
        if api_secret.trim().is_empty() {
            return Err(ExchangeError::Configuration(
                "API secret is required for signing requests".to_string(),
            ));
        }

        Ok(Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            api_secret: SecretString::from(api_secret),
        })
    }

    /// 환경 변수에서 자격증명 로드.
    ///
    /// `.env` 파일이 있으면 먼저 읽습니다. 시크릿은 `BINANCE_API_SECRET`,
    /// 없으면 `BINANCE_SECRET_KEY`에서 찾습니다.
    pub fn from_env() -> ExchangeResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 이름으로 값을 조회하는 함수에서 자격증명 로드.
    ///
    /// 빈 값은 설정되지 않은 것으로 취급하므로 빈 `BINANCE_API_SECRET`은
    /// `BINANCE_SECRET_KEY`로 대체됩니다.
    pub fn from_lookup<F>(lookup: F) -> ExchangeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = get(API_KEY_ENV);
        let api_secret = get(API_SECRET_ENV)
            .or_else(|| get(SECRET_KEY_ENV))
            .ok_or_else(|| {
                ExchangeError::Configuration(format!(
                    "missing environment variable: {} (or {})",
                    API_SECRET_ENV, SECRET_KEY_ENV
                ))
            })?;

        Self::new(api_key, api_secret)
    }

    /// API 키 (로그 출력 가능).
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// 서명용 시크릿.
    ///
    /// 암호 연산에만 사용하고 절대 로그에 남기지 않습니다.
    pub(crate) fn expose_secret(&self) -> &str {
        self.api_secret.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked_key = match self.api_key.as_deref() {
            Some(key) if key.len() > 8 => format!("{}...{}", &key[..4], &key[key.len() - 4..]),
            Some(_) => "***REDACTED***".to_string(),
            None => "<none>".to_string(),
        };

        f.debug_struct("Credentials")
            .field("api_key", &masked_key)
            .field("api_secret", &"***REDACTED***")
            .finish()
    }
}

/// Binance Futures 클라이언트 설정.
#[derive(Debug)]
pub struct BinanceFuturesConfig {
    /// 자격증명
    pub credentials: Credentials,
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    pub timeout_secs: u64,
}

impl BinanceFuturesConfig {
    /// 새 설정 생성 (테스트넷, 타임아웃 10초).
    pub fn new(credentials: Credentials) -> Self {
        let defaults = ExchangeConfig::default();
        Self {
            credentials,
            base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
            timeout_secs: defaults.timeout_secs,
        }
    }

    /// 애플리케이션 설정의 거래소 섹션으로 생성.
    pub fn from_exchange_config(credentials: Credentials, exchange: &ExchangeConfig) -> Self {
        Self::new(credentials)
            .with_base_url(&exchange.base_url)
            .with_timeout_secs(exchange.timeout_secs)
    }

    /// 기본 URL 변경 (끝의 `/` 제거).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// 요청 타임아웃 변경.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
