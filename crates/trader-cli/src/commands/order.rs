//! 주문 실행 명령.
//!
//! 누락된 인자는 표준 입력으로 묻고, 검증된 주문을 거래소로 전송한 뒤
//! 결과를 성공/실패 블록으로 출력합니다.

use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::io::{BufRead, Write};
use tracing::{error, info};
use trader_api::{order_error_status, routes::CreateOrderRequest};
use trader_core::ExchangeConfig;
use trader_exchange::{BinanceFuturesClient, ExchangeError};

use super::prompt::Prompter;

const SYMBOL_PROMPT: &str = "Enter Trading Pair (e.g., BTCUSDT)";
const SIDE_PROMPT: &str = "Enter Side [BUY/SELL]";
const ORDER_TYPE_PROMPT: &str = "Enter Order Type [MARKET/LIMIT]";
const QUANTITY_PROMPT: &str = "Enter Order Quantity";
const PRICE_PROMPT: &str = "Enter Target Price";
const CREDENTIALS_HINT: &str =
    "Set BINANCE_API_SECRET (or BINANCE_SECRET_KEY) and BINANCE_API_KEY in the environment or .env";

/// `order` 명령 인자.
#[derive(Debug, Clone, Default, Args)]
pub struct OrderArgs {
    /// 거래 심볼 (예: BTCUSDT)
    #[arg(long)]
    pub symbol: Option<String>,

    /// 주문 방향 (BUY, SELL)
    #[arg(long)]
    pub side: Option<String>,

    /// 주문 유형 (MARKET, LIMIT)
    #[arg(long)]
    pub order_type: Option<String>,

    /// 주문 수량
    #[arg(long)]
    pub quantity: Option<Decimal>,

    /// 지정가 (LIMIT 전용)
    #[arg(short, long)]
    pub price: Option<Decimal>,
}

/// 주문 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderOutcome {
    /// 거래소 응답
    Success(Value),
    /// HTTP 상태 코드(400/500)와 상세 메시지
    Failure { status: u16, detail: String },
}

impl OrderOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, OrderOutcome::Success(_))
    }

    /// 에러를 실패 결과로 변환합니다.
    ///
    /// 설정 에러처럼 재시도해도 해결되지 않는 에러에는 조치 안내를 덧붙입니다.
    pub fn from_error(err: &ExchangeError) -> Self {
        let detail = if err.is_fatal() {
            format!("{}\n{}", err, CREDENTIALS_HINT)
        } else {
            err.to_string()
        };

        OrderOutcome::Failure {
            status: order_error_status(err).as_u16(),
            detail,
        }
    }
}

/// 인자와 프롬프트 입력으로 주문 요청을 완성합니다.
///
/// 방향과 유형은 대문자로 변환됩니다. LIMIT 주문에 가격이 없으면 가격을 묻습니다.
pub fn resolve_request<R: BufRead, W: Write>(
    args: OrderArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<CreateOrderRequest> {
    let symbol = match args.symbol {
        Some(symbol) => symbol,
        None => prompter.text(SYMBOL_PROMPT)?,
    };
    let side = match args.side {
        Some(side) => side,
        None => prompter.text(SIDE_PROMPT)?,
    }
    .to_uppercase();
    let order_type = match args.order_type {
        Some(order_type) => order_type,
        None => prompter.text(ORDER_TYPE_PROMPT)?,
    }
    .to_uppercase();
    let quantity = match args.quantity {
        Some(quantity) => quantity,
        None => prompter.decimal(QUANTITY_PROMPT)?,
    };

    let price = match args.price {
        None if order_type == "LIMIT" => Some(prompter.decimal(PRICE_PROMPT)?),
        price => price,
    };

    Ok(CreateOrderRequest {
        symbol,
        side,
        order_type,
        quantity,
        price,
    })
}

/// 주문 요청 요약.
pub fn format_summary(request: &CreateOrderRequest) -> String {
    let price = request
        .price
        .map(|p| p.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "=== Placing Order... ===\nSymbol: {}\nSide: {}\nType: {}\nQty: {}\nPrice: {}",
        request.symbol, request.side, request.order_type, request.quantity, price
    )
}

/// 주문 결과 출력 블록.
pub fn format_outcome(outcome: &OrderOutcome) -> String {
    match outcome {
        OrderOutcome::Success(data) => format!(
            "=== Success ===\nOrder Successfully Placed!\nOrder ID: {}\nStatus: {}\nExecuted Qty: {}\nAvg Price: {}",
            field(data, "orderId"),
            field(data, "status"),
            field(data, "executedQty"),
            field(data, "avgPrice"),
        ),
        OrderOutcome::Failure { status, detail } => format!(
            "=== Error ===\nOrder Failed!\nStatus Code: {}\nDetails: {}",
            status, detail
        ),
    }
}

fn field(data: &Value, key: &str) -> String {
    match data.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

/// 검증 후 주문 실행.
///
/// 에러는 API와 동일한 규칙(400/500)으로 분류됩니다.
pub async fn execute_order(
    client: &BinanceFuturesClient,
    request: &CreateOrderRequest,
) -> OrderOutcome {
    let result = match request.to_intent() {
        Ok(intent) => client.place_order(&intent).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => OrderOutcome::Success(response),
        Err(e) => OrderOutcome::from_error(&e),
    }
}

/// `order` 명령 실행. 성공 여부를 반환합니다.
pub async fn run_order(exchange: &ExchangeConfig, args: OrderArgs) -> Result<bool> {
    let request = {
        let stdin = std::io::stdin();
        let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
        resolve_request(args, &mut prompter)?
    };

    println!("{}", format_summary(&request));
    info!(
        symbol = %request.symbol,
        side = %request.side,
        order_type = %request.order_type,
        quantity = %request.quantity,
        price = ?request.price,
        "CLI order request"
    );

    let outcome = match BinanceFuturesClient::from_env(exchange) {
        Ok(client) => execute_order(&client, &request).await,
        Err(e) => {
            error!(error = %e, fatal = e.is_fatal(), "Failed to create exchange client");
            OrderOutcome::from_error(&e)
        }
    };

    println!("{}", format_outcome(&outcome));
    Ok(outcome.is_success())
}
