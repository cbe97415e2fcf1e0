use crate::clock::{Elapsed, Timestamp};
use crate::http::session::{RequestDescriptor, Session, TARGET_URL};
use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use std::io::{self, Write};

/// 一次请求的结果, 只记录不上报
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 收到完整响应
    Completed { status: StatusCode },
    /// 连接被拒绝, 连接重置等传输层错误
    TransportFailed(String),
    /// 没有拿到请求句柄, 请求没有发出
    Skipped(String),
}

impl ProbeOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, ProbeOutcome::Completed { .. })
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ProbeOutcome::Completed { status } => write!(f, "completed with {}", status),
            ProbeOutcome::TransportFailed(err) => write!(f, "transport failed: {}", err),
            ProbeOutcome::Skipped(err) => write!(f, "skipped: {}", err),
        }
    }
}

/// 一次测量
#[derive(Debug, Clone)]
pub struct Measurement {
    pub start: Timestamp,
    pub end: Timestamp,
    pub elapsed: Elapsed,
    pub outcome: ProbeOutcome,
}

impl Measurement {
    /// 输出耗时(毫秒), 一行
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.elapsed)?;
        out.flush()
    }
}

/// 延迟探测器
pub struct LatencyProber {
    url: String, //探测地址
}

impl fmt::Display for LatencyProber {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "probe_url:{}", self.url)
    }
}

impl Default for LatencyProber {
    fn default() -> Self {
        Self::new()
    }
}

impl LatencyProber {
    pub fn new() -> Self {
        Self {
            url: TARGET_URL.to_string(),
        }
    }
    /// 设置探测地址
    pub fn set_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }
    pub fn url(&self) -> &str {
        &self.url
    }

    /// 测量一次请求耗时, 失败只记录在 outcome 里
    pub fn probe(&self, session: &Session) -> Measurement {
        let handle =
            RequestDescriptor::parse(&self.url).and_then(|descriptor| session.handle(&descriptor));

        let start = Timestamp::now();
        let outcome = match handle {
            Ok(handle) => match handle.perform() {
                Ok(status) => ProbeOutcome::Completed { status },
                Err(err) => ProbeOutcome::TransportFailed(format!("{:#}", err)),
            },
            Err(err) => ProbeOutcome::Skipped(format!("{:#}", err)),
        };
        let end = Timestamp::now();

        match &outcome {
            ProbeOutcome::Completed { .. } => info!("{}: {}", self.url, outcome),
            _ => warn!("{}: {}", self.url, outcome),
        }
        Measurement {
            start,
            end,
            elapsed: Elapsed::between(start, end),
            outcome,
        }
    }

    /// 打开独立的会话完成一次测量
    pub fn probe_once(&self) -> Measurement {
        let session = Session::open();
        self.probe(&session)
    }
}

#[cfg(test)]
mod prober_test {
    use super::*;

    #[test]
    fn test_default_target() {
        let prober = LatencyProber::new();
        assert_eq!(prober.url(), TARGET_URL);
        assert_eq!(prober.to_string(), format!("probe_url:{}", TARGET_URL));
    }
    #[test]
    fn test_set_url() {
        let prober = LatencyProber::new().set_url("http://127.0.0.1:1/x");
        assert_eq!(prober.url(), "http://127.0.0.1:1/x");
    }
    #[test]
    fn test_invalid_url_is_skipped_but_measured() {
        let measurement = LatencyProber::new().set_url("::nope::").probe_once();
        assert!(matches!(measurement.outcome, ProbeOutcome::Skipped(_)));
        assert!(measurement.end >= measurement.start);
        assert!(measurement.elapsed.millis() < 1000);
    }
    #[test]
    fn test_report_single_line() {
        let measurement = Measurement {
            start: Timestamp::from_millis(100),
            end: Timestamp::from_millis(142),
            elapsed: Elapsed::between(Timestamp::from_millis(100), Timestamp::from_millis(142)),
            outcome: ProbeOutcome::TransportFailed("connection refused".to_string()),
        };
        let mut out = Vec::new();
        measurement.report(&mut out).unwrap();
        assert_eq!(out, b"42\n");
    }
    #[test]
    fn test_outcome_display() {
        let outcome = ProbeOutcome::Completed {
            status: StatusCode::OK,
        };
        assert!(outcome.is_completed());
        assert_eq!(outcome.to_string(), "completed with 200 OK");
        assert!(!ProbeOutcome::Skipped("x".to_string()).is_completed());
    }
}
