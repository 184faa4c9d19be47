//! CLI 도구 모음.
//!
//! - `order`: 대화형/인자 기반 주문 실행
//! - `serve`: HTTP 주문 게이트웨이 실행

pub mod commands;

pub use commands::*;
