//! tracing을 사용한 로깅 인프라.
//!
//! 이 모듈은 다양한 출력 형식을 지원하는 구조화된 로깅을 제공합니다:
//! - **pretty**: 개발용 사람이 읽기 쉬운 형식
//! - **json**: 운영환경/로그 집계용 JSON 형식
//! - **compact**: 로그 크기를 줄이기 위한 간결한 형식
//!
//! 파일 경로가 설정되면 콘솔 출력과 함께 같은 이벤트를 파일에도 기록합니다.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{
    fmt::{
        self,
        format::{DefaultFields, Format},
    },
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;
use crate::error::{TraderError, TraderResult};

/// 로그 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// 색상이 포함된 사람이 읽기 쉬운 형식 (개발용)
    #[default]
    Pretty,
    /// 로그 집계용 JSON 형식 (운영용)
    Json,
    /// 간결한 한 줄 형식
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = TraderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            _ => Err(TraderError::InvalidInput(format!("Unknown log format: {}", s))),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 로그 레벨 필터 (예: "info", "debug", "trader_exchange=debug")
    pub level: String,
    /// 출력 형식
    pub format: LogFormat,
    /// 로그 파일 경로 (콘솔 출력과 병행)
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
            file: None,
        }
    }
}

impl LogConfig {
    /// 새 로그 설정을 생성합니다.
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// 로그 형식을 설정합니다.
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// 로그 파일을 설정합니다.
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// 설정 파일의 `[logging]` 섹션으로 로그 설정을 만듭니다.
    ///
    /// 치명적이지 않은 에러(알 수 없는 형식 등)는 기본 형식으로 대체하고
    /// 레벨과 파일 경로는 유지합니다. 치명적인 에러는 그대로 반환합니다.
    pub fn from_logging_config(config: &LoggingConfig) -> TraderResult<Self> {
        match Self::try_from(config) {
            Ok(log_config) => Ok(log_config),
            Err(e) if !e.is_fatal() => {
                // 구독자 초기화 전이므로 stderr로 출력
                eprintln!("Invalid logging config ({}); using default format", e);
                Ok(Self {
                    level: config.level.clone(),
                    file: log_file_path(config),
                    ..Default::default()
                })
            }
            Err(e) => Err(e),
        }
    }
}

fn log_file_path(config: &LoggingConfig) -> Option<PathBuf> {
    config
        .file
        .as_deref()
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PathBuf::from)
}

impl TryFrom<&LoggingConfig> for LogConfig {
    type Error = TraderError;

    fn try_from(config: &LoggingConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            level: config.level.clone(),
            format: config.format.parse()?,
            file: log_file_path(config),
        })
    }
}

/// 파일 출력 레이어.
type FileLayer<S> = fmt::Layer<S, DefaultFields, Format, Mutex<File>>;

/// 파일 출력 레이어 생성 (ANSI 색상 없음, 추가 모드).
fn file_layer<S>(path: Option<&Path>) -> TraderResult<Option<FileLayer<S>>> {
    let Some(path) = path else {
        return Ok(None);
    };

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Ok(Some(
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file)),
    ))
}

/// 주어진 설정으로 로깅 시스템을 초기화합니다.
///
/// 프로세스당 한 번, 바이너리의 `main`에서 호출합니다.
///
/// # 예제
///
/// ```no_run
/// use trader_core::logging::{init_logging, LogConfig, LogFormat};
///
/// let config = LogConfig::new("debug")
///     .with_format(LogFormat::Json)
///     .with_log_file("logs/trading_bot.log");
/// init_logging(config).unwrap();
/// ```
pub fn init_logging(config: LogConfig) -> TraderResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| TraderError::Logging(e.to_string()))?;

    let file = config.file.as_deref();

    let result = match config.format {
        LogFormat::Pretty => {
            let fmt_layer = fmt::layer()
                .pretty()
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(file_layer(file)?)
                .try_init()
        }
        LogFormat::Json => {
            let fmt_layer = fmt::layer()
                .json()
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(file_layer(file)?)
                .try_init()
        }
        LogFormat::Compact => {
            let fmt_layer = fmt::layer()
                .compact()
                .with_target(true);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer)
                .with(file_layer(file)?)
                .try_init()
        }
    };

    result.map_err(|e| TraderError::Logging(e.to_string()))?;

    tracing::info!(
        format = ?config.format,
        level = %config.level,
        file = ?config.file,
        "Logging initialized"
    );

    Ok(())
}

/// 주문 컨텍스트 필드가 포함된 span을 생성하는 매크로.
#[macro_export]
macro_rules! order_span {
    ($symbol:expr, $side:expr) => {
        tracing::info_span!("order", symbol = %$symbol, side = %$side)
    };
    ($symbol:expr, $side:expr, $order_type:expr) => {
        tracing::info_span!(
            "order",
            symbol = %$symbol,
            side = %$side,
            order_type = %$order_type
        )
    };
}
