//! 거래소 연결.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Binance USD-M Futures 서명 요청 커넥터
//! - 요청 서명 (HMAC-SHA256) 및 타임스탬프용 시계
//! - 전송 결과를 분류하는 에러 타입

pub mod clock;
pub mod connector;
pub mod error;

pub use clock::{Clock, SystemClock};
pub use connector::*;
pub use error::*;
