//! 서명 타임스탬프용 시계.
//!
//! 거래소는 서버 허용 범위를 벗어난 `timestamp`를 거부하므로
//! 요청마다 호출 시점의 시각을 읽어야 합니다. 테스트에서는 시계를 주입해
//! 타임스탬프를 결정적으로 만듭니다.

use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};

/// 현재 시각 제공자.
pub trait Clock: Debug + Send + Sync {
    /// 현재 UNIX 타임스탬프(밀리초).
    fn timestamp_ms(&self) -> u64;
}

/// 시스템 벽시계.
///
/// 반환값은 호출마다 고유하며 단조 증가합니다. 같은 밀리초 안에서 여러 번
/// 호출되면 직전 값 + 1을 반환하므로, 연속 호출이 몰리면 벽시계보다 최대
/// 호출 횟수만큼(ms) 앞설 수 있습니다.
#[derive(Debug, Default)]
pub struct SystemClock {
    last_ms: AtomicU64,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }

    fn wall_clock_ms() -> u64 {
        // 1970년 이전 시각은 0으로 고정
        u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

impl Clock for SystemClock {
    fn timestamp_ms(&self) -> u64 {
        let now = Self::wall_clock_ms();
        let mut last = self.last_ms.load(Ordering::Acquire);
        loop {
            let next = now.max(last.saturating_add(1));
            match self.last_ms.compare_exchange_weak(
                last,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(actual) => last = actual,
            }
        }
    }
}
