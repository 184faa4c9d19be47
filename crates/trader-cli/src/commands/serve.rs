//! HTTP 서버 실행 명령.

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use trader_api::{serve, AppState};
use trader_core::AppConfig;
use trader_exchange::BinanceFuturesClient;

/// 바인드 주소 결정 (`--port`가 설정 값보다 우선).
pub fn bind_addr(config: &AppConfig, port: Option<u16>) -> Result<SocketAddr> {
    let mut server = config.server.clone();
    if let Some(port) = port {
        server.port = port;
    }
    Ok(server.socket_addr()?)
}

/// `serve` 명령 실행.
pub async fn run_serve(config: &AppConfig, port: Option<u16>) -> Result<()> {
    let addr = bind_addr(config, port)?;

    let client = BinanceFuturesClient::from_env(&config.exchange).map_err(|e| {
        error!(error = %e, "Failed to create exchange client");
        e
    })?;

    println!("Starting server on {}...", addr);
    info!(%addr, "Starting order gateway server");

    serve(Arc::new(AppState::new(client)), addr).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_port_override() {
        let config = AppConfig::default();

        assert_eq!(bind_addr(&config, None).unwrap().port(), 8000);
        assert_eq!(bind_addr(&config, Some(9100)).unwrap().port(), 9100);
    }
}
