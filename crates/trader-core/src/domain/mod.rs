//! 주문 게이트웨이의 도메인 모델.

mod order;

pub use order::*;
