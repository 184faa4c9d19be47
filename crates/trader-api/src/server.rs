//! HTTP 서버 구성 및 실행.

use axum::{http::StatusCode, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::routes::create_api_router;
use crate::state::AppState;

/// 거래소 호출 타임아웃에 더하는 여유 시간 (초)
pub const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// 요청 전체에 대한 타임아웃.
///
/// 거래소 호출이 먼저 끝나도록 거래소 타임아웃보다 항상 깁니다.
pub fn request_timeout(exchange_timeout_secs: u64) -> Duration {
    Duration::from_secs(exchange_timeout_secs.saturating_add(REQUEST_TIMEOUT_MARGIN_SECS))
}

/// 미들웨어가 적용된 애플리케이션 라우터 생성.
pub fn create_app(state: Arc<AppState>) -> Router {
    let timeout = request_timeout(state.client.config().timeout_secs);
    info!(timeout_secs = timeout.as_secs(), "Request timeout configured");

    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // 전역 타임아웃 - 408 상태 코드 반환
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
}

/// 서버 실행 (Ctrl+C 또는 SIGTERM까지).
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> anyhow::Result<()> {
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// 종료 시그널 대기.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::create_test_state;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use trader_exchange::{BinanceFuturesClient, BinanceFuturesConfig, Credentials};

    #[test]
    fn test_request_timeout_exceeds_exchange_timeout() {
        assert_eq!(request_timeout(10), Duration::from_secs(15));
        assert_eq!(request_timeout(60), Duration::from_secs(65));
        assert_eq!(request_timeout(u64::MAX), Duration::from_secs(u64::MAX));
    }

    #[tokio::test]
    async fn test_exchange_timeout_is_internal_error_not_request_timeout() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/fapi/v1/order")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(2_500));
                w.write_all(br#"{"orderId":1,"status":"NEW"}"#)
            })
            .create_async()
            .await;

        let credentials = Credentials::new(Some("test_api_key".to_string()), "test_secret").unwrap();
        let config = BinanceFuturesConfig::new(credentials)
            .with_base_url(&server.url())
            .with_timeout_secs(1);
        let state = AppState::new(BinanceFuturesClient::new(config).unwrap());
        let app = create_app(Arc::new(state));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/order")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{"symbol":"BTCUSDT","side":"BUY","order_type":"MARKET","quantity":1}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_app_routes() {
        let app = create_app(Arc::new(create_test_state("http://127.0.0.1:1")));

        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request_with_detail() {
        let app = create_app(Arc::new(create_test_state("http://127.0.0.1:1")));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/order")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(error["detail"].as_str().unwrap().contains("Invalid request body"));
    }
}
