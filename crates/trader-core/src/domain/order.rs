//! 주문 타입 및 검증.
//!
//! 이 모듈은 주문 게이트웨이의 주문 관련 타입을 정의합니다:
//! - `Side` - 주문 방향 (매수/매도)
//! - `OrderType` - 주문 유형 (시장가, 지정가)
//! - `TimeInForce` - 주문 유효 기간
//! - `OrderIntent` - 검증을 통과한 주문 의도
//!
//! `OrderIntent`는 `OrderIntent::new` / `OrderIntent::parse`를 통해서만 생성되므로
//! "지정가 주문에만 가격이 존재한다"는 불변식이 타입 수준에서 보장됩니다.

use crate::types::{DecimalExt, Price, Quantity};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// 주문 검증 에러.
///
/// 검증 에러는 네트워크 호출 이전에 발생하며, 호출자에게 클라이언트 에러로 노출됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    /// 심볼이 비어 있음
    #[error("Symbol must not be empty.")]
    EmptySymbol,

    /// 지원하지 않는 주문 방향
    #[error("Invalid side '{0}': expected BUY or SELL.")]
    InvalidSide(String),

    /// 지원하지 않는 주문 유형
    #[error("Invalid order type '{0}': expected MARKET or LIMIT.")]
    InvalidOrderType(String),

    /// 수량이 0 이하
    #[error("Quantity must be greater than 0 (got {0}).")]
    NonPositiveQuantity(Quantity),

    /// 가격이 0 이하
    #[error("Price must be greater than 0 (got {0}).")]
    NonPositivePrice(Price),

    /// 지정가 주문에 가격 누락
    #[error("Price is required for LIMIT orders.")]
    PriceRequired,

    /// 시장가 주문에 가격 지정
    #[error("Price should not be provided for MARKET orders.")]
    PriceNotAllowed,
}

/// 주문 방향 (매수 또는 매도).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// 매수
    Buy,
    /// 매도
    Sell,
}

impl Side {
    /// 거래소 파라미터 값을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = OrderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(OrderValidationError::InvalidSide(other.to_string())),
        }
    }
}

/// 주문 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    /// 시장가 주문 - 현재 시장 가격으로 즉시 체결
    Market,
    /// 지정가 주문 - 지정 가격 이상/이하에서 체결
    Limit,
}

impl OrderType {
    /// 거래소 파라미터 값을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
        }
    }
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = OrderValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            other => Err(OrderValidationError::InvalidOrderType(other.to_string())),
        }
    }
}

/// 주문 유효 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TimeInForce {
    /// 취소될 때까지 유효 (Good Till Cancelled)
    GTC,
}

impl TimeInForce {
    /// 거래소 파라미터 값을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::GTC => "GTC",
        }
    }
}

/// 검증된 주문 의도.
///
/// 네트워크 호출 이전에 모든 필드 규칙과 교차 필드 규칙을 통과한 값만 표현합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderIntent {
    symbol: String,
    side: Side,
    order_type: OrderType,
    quantity: Quantity,
    #[serde(skip_serializing_if = "Option::is_none")]
    price: Option<Price>,
}

impl OrderIntent {
    /// 타입이 지정된 입력으로 주문 의도를 생성합니다.
    ///
    /// # Errors
    /// 필드 규칙 또는 가격/주문 유형 교차 규칙을 위반하면 `OrderValidationError`를 반환합니다.
    pub fn new(
        symbol: impl Into<String>,
        side: Side,
        order_type: OrderType,
        quantity: Quantity,
        price: Option<Price>,
    ) -> Result<Self, OrderValidationError> {
        let symbol = symbol.into().trim().to_string();
        if symbol.is_empty() {
            return Err(OrderValidationError::EmptySymbol);
        }

        if !quantity.is_positive() {
            return Err(OrderValidationError::NonPositiveQuantity(quantity));
        }

        if let Some(p) = price {
            if !p.is_positive() {
                return Err(OrderValidationError::NonPositivePrice(p));
            }
        }

        match (order_type, price) {
            (OrderType::Limit, None) => return Err(OrderValidationError::PriceRequired),
            (OrderType::Market, Some(_)) => return Err(OrderValidationError::PriceNotAllowed),
            _ => {}
        }

        Ok(Self {
            symbol,
            side,
            order_type,
            quantity,
            price,
        })
    }

    /// 문자열 입력(API 본문, CLI 인자)으로 주문 의도를 생성합니다.
    ///
    /// `side`는 `BUY`/`SELL`, `order_type`은 `MARKET`/`LIMIT`만 허용합니다 (대소문자 구분).
    pub fn parse(
        symbol: &str,
        side: &str,
        order_type: &str,
        quantity: Quantity,
        price: Option<Price>,
    ) -> Result<Self, OrderValidationError> {
        let side = side.parse::<Side>()?;
        let order_type = order_type.parse::<OrderType>()?;
        Self::new(symbol, side, order_type, quantity, price)
    }

    /// 거래 심볼.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// 주문 방향.
    pub fn side(&self) -> Side {
        self.side
    }

    /// 주문 유형.
    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    /// 주문 수량.
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// 지정가 (지정가 주문에서만 `Some`).
    pub fn price(&self) -> Option<Price> {
        self.price
    }

    /// 지정가 주문의 유효 기간 (시장가 주문은 `None`).
    pub fn time_in_force(&self) -> Option<TimeInForce> {
        match self.order_type {
            OrderType::Limit => Some(TimeInForce::GTC),
            OrderType::Market => None,
        }
    }
}
