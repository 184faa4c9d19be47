//! Trader API 서버 진입점.

use std::sync::Arc;
use tracing::{error, info};

use trader_api::{serve, AppState};
use trader_core::{init_logging, AppConfig, LogConfig};
use trader_exchange::BinanceFuturesClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    let config = AppConfig::load_default()?;
    init_logging(LogConfig::from_logging_config(&config.logging)?)?;

    info!("Starting Trader API server...");

    let client = BinanceFuturesClient::from_env(&config.exchange).map_err(|e| {
        error!(error = %e, "Failed to create exchange client");
        e
    })?;

    let addr = config.server.socket_addr().map_err(|e| {
        error!(
            host = %config.server.host,
            port = config.server.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. TRADER__SERVER__HOST, TRADER__SERVER__PORT를 확인하세요."
        );
        e
    })?;

    serve(Arc::new(AppState::new(client)), addr).await
}
