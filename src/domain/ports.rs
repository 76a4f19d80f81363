use chrono::{DateTime, Local};

/// 取得「現在」的來源，讓目前週期的計算可以在測試中固定時間
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// 系統時鐘
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// 固定時間的時鐘
#[derive(Debug, Clone)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
