//! 주문 수량/가격을 위한 Decimal 유틸리티.
//!
//! 거래소로 전송되는 숫자는 부동소수점 오차 없이 그대로 직렬화되어야 하므로
//! 모든 금액은 `rust_decimal::Decimal`로 다룹니다.

use rust_decimal::Decimal;

/// 금융 정밀도를 위한 가격 타입.
pub type Price = Decimal;

/// 주문 수량을 위한 타입.
pub type Quantity = Decimal;

/// Decimal 연산을 위한 확장 트레이트.
pub trait DecimalExt {
    /// 0보다 큰지 확인합니다.
    fn is_positive(&self) -> bool;

    /// 거래소 파라미터용 문자열로 변환합니다 (예: `1.500` → `"1.5"`).
    fn to_param_string(&self) -> String;
}

impl DecimalExt for Decimal {
    fn is_positive(&self) -> bool {
        *self > Decimal::ZERO
    }

    fn to_param_string(&self) -> String {
        self.normalize().to_string()
    }
}
