//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → 환경 변수(`TRADER__` 접두사) 순으로 덮어씁니다.
//! 거래소 자격증명은 여기에 포함되지 않으며 환경 변수에서만 읽습니다.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{TraderError, TraderResult};

/// Binance Futures 테스트넷 REST URL.
pub const DEFAULT_EXCHANGE_BASE_URL: &str = "https://testnet.binancefuture.com";

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 거래소 설정
    #[serde(default)]
    pub exchange: ExchangeConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `TraderError::Config`를 반환합니다.
    pub fn socket_addr(&self) -> TraderResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| TraderError::Config(format!("invalid server address: {}", e)))
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
    /// 로그 파일 경로 (비어 있으면 콘솔만 사용)
    #[serde(default = "default_log_file")]
    pub file: Option<String>,
}

fn default_log_file() -> Option<String> {
    Some("logs/trading_bot.log".to_string())
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: default_log_file(),
        }
    }
}

/// 거래소 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExchangeConfig {
    /// REST API 기본 URL
    pub base_url: String,
    /// 요청 타임아웃 (초)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_EXCHANGE_BASE_URL.to_string(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없으면 기본값과 환경 변수만 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> TraderResult<Self> {
        let defaults = AppConfig::default();

        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.format", defaults.logging.format)?
            .set_default("exchange.base_url", defaults.exchange.base_url)?
            .set_default("exchange.timeout_secs", default_timeout_secs() as i64)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("TRADER")
                    .separator("__")
                    .try_parsing(true),
            );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> TraderResult<Self> {
        Self::load(DEFAULT_CONFIG_PATH)
    }
}
