//! Binance USD-M Futures REST 클라이언트.
//!
//! 서명된 요청 한 번을 보내고 결과를 `ExchangeResult`로 변환합니다.
//! 재시도나 백오프는 하지 않습니다.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn, Instrument};
use trader_core::{order_span, DecimalExt, ExchangeConfig, OrderIntent};

use super::auth::{RequestSigner, SignedRequest};
use super::config::{BinanceFuturesConfig, Credentials};
use crate::clock::{Clock, SystemClock};
use crate::{ExchangeError, ExchangeResult};

/// 주문 생성 엔드포인트
pub const ORDER_ENDPOINT: &str = "/fapi/v1/order";

/// API 키 헤더
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

/// Binance Futures 클라이언트.
///
/// 생성 이후 불변이므로 `Arc`로 감싸 여러 요청에서 공유할 수 있습니다.
#[derive(Debug)]
pub struct BinanceFuturesClient {
    config: BinanceFuturesConfig,
    client: Client,
    clock: Arc<dyn Clock>,
}

impl BinanceFuturesClient {
    /// 시스템 시계로 새 클라이언트 생성.
    pub fn new(config: BinanceFuturesConfig) -> ExchangeResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock::new()))
    }

    /// 지정한 시계로 새 클라이언트 생성.
    pub fn with_clock(config: BinanceFuturesConfig, clock: Arc<dyn Clock>) -> ExchangeResult<Self> {
        let mut headers = HeaderMap::new();
        match config.credentials.api_key() {
            Some(api_key) => {
                let value = HeaderValue::from_str(api_key).map_err(|e| {
                    ExchangeError::Configuration(format!("invalid API key header: {}", e))
                })?;
                // HeaderName::from_static은 소문자만 허용
                headers.insert(HeaderName::from_static("x-mbx-apikey"), value);
            }
            None => warn!("API key not set; requests will be sent without {}", API_KEY_HEADER),
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        debug!(base_url = %config.base_url, timeout_secs = config.timeout_secs, "Binance Futures client created");

        Ok(Self {
            config,
            client,
            clock,
        })
    }

    /// 환경 변수 자격증명과 거래소 설정으로 생성.
    pub fn from_env(exchange: &ExchangeConfig) -> ExchangeResult<Self> {
        let credentials = Credentials::from_env()?;
        Self::new(BinanceFuturesConfig::from_exchange_config(credentials, exchange))
    }

    /// 클라이언트 설정.
    pub fn config(&self) -> &BinanceFuturesConfig {
        &self.config
    }

    /// 호출 시점의 타임스탬프로 파라미터 서명.
    pub fn sign_request(&self, params: &[(&str, String)]) -> ExchangeResult<SignedRequest> {
        let signer = RequestSigner::new(self.config.credentials.expose_secret());
        signer.sign_params(params, self.clock.timestamp_ms())
    }

    /// 서명된 요청 전송.
    ///
    /// 2xx 이외의 상태는 응답 본문 원문과 함께 `ExchangeError::Api`로,
    /// 전송 실패는 `ExchangeError::Network`로 반환합니다.
    pub async fn send_signed_request(
        &self,
        method: Method,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> ExchangeResult<Value> {
        let signed = self.sign_request(params)?;
        let url = signed.url(&self.config.base_url, endpoint);

        info!(%method, endpoint, "Sending signed request");

        let response = self
            .client
            .request(method.clone(), &url)
            .send()
            .await
            .map_err(|e| {
                error!(%method, endpoint, error = %e, "Request failed");
                ExchangeError::from(e)
            })?;

        let status = response.status();
        info!(endpoint, status = status.as_u16(), "Received response");

        let body = response.text().await.map_err(|e| {
            error!(endpoint, error = %e, "Failed to read response body");
            ExchangeError::Network(e.to_string())
        })?;

        if !status.is_success() {
            error!(endpoint, status = status.as_u16(), body = %body, "API error");
            return Err(ExchangeError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!(endpoint, error = %e, body = %body, "Failed to parse response");
            ExchangeError::from(e)
        })
    }

    /// 주문 파라미터 생성.
    ///
    /// 순서: `symbol, side, type, quantity` 이후 LIMIT이면 `price, timeInForce`.
    pub fn build_order_params(intent: &OrderIntent) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("symbol", intent.symbol().to_string()),
            ("side", intent.side().as_str().to_string()),
            ("type", intent.order_type().as_str().to_string()),
            ("quantity", intent.quantity().to_param_string()),
        ];

        if let Some(price) = intent.price() {
            params.push(("price", price.to_param_string()));
        }
        if let Some(tif) = intent.time_in_force() {
            params.push(("timeInForce", tif.as_str().to_string()));
        }

        params
    }

    /// 주문 실행.
    ///
    /// 거래소 응답 JSON을 그대로 반환합니다.
    pub async fn place_order(&self, intent: &OrderIntent) -> ExchangeResult<Value> {
        let span = order_span!(intent.symbol(), intent.side(), intent.order_type());

        async move {
            let params = Self::build_order_params(intent);
            info!(quantity = %intent.quantity(), price = ?intent.price(), "Placing order");

            match self
                .send_signed_request(Method::POST, ORDER_ENDPOINT, &params)
                .await
            {
                Ok(response) => {
                    match response.get("orderId") {
                        Some(order_id) => info!(order_id = %order_id, "Order placed"),
                        None => info!("Order placed"),
                    }
                    Ok(response)
                }
                Err(e) => {
                    error!(error = %e, "Order failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }
}
