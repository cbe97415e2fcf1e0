use std::fmt::{self, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// 自 1970-01-01T00:00:00Z 起经过的毫秒数
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    /// 读取系统时钟
    pub fn now() -> Self {
        let millis = match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(since) => i64::try_from(since.as_millis()).unwrap_or(i64::MAX),
            // 时钟早于 epoch
            Err(err) => i64::try_from(err.duration().as_millis())
                .map(|m| -m)
                .unwrap_or(i64::MIN),
        };
        Timestamp(millis)
    }
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }
    pub fn as_millis(&self) -> i64 {
        self.0
    }
}

/// 两次时间差, 时钟回拨时为 0 并标记 anomaly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed {
    millis: u64,
    anomaly: bool,
}

impl Elapsed {
    pub fn between(start: Timestamp, end: Timestamp) -> Self {
        let diff = end.0.saturating_sub(start.0);
        if diff < 0 {
            warn!(
                "clock went backwards by {}ms during the measurement",
                diff.unsigned_abs()
            );
            Elapsed {
                millis: 0,
                anomaly: true,
            }
        } else {
            Elapsed {
                millis: diff as u64,
                anomaly: false,
            }
        }
    }
    pub fn millis(&self) -> u64 {
        self.millis
    }
    pub fn is_anomaly(&self) -> bool {
        self.anomaly
    }
}

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.millis)
    }
}
