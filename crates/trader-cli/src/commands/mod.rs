//! CLI 명령어 구현 모듈.

pub mod order;
pub mod prompt;
pub mod serve;

pub use order::{run_order, OrderArgs, OrderOutcome};
pub use serve::run_serve;
