use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MASK_CHAR: char = '*';

/// 遮蔽參數
///
/// `window` 為 `None` 時遮蔽字串中間的部分；指定 `(start, length)` 時遮蔽該區段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaskOptions {
    pub window: Option<(usize, usize)>,
    pub shorten: bool,
    pub mask_char: char,
}

impl Default for MaskOptions {
    fn default() -> Self {
        Self {
            window: None,
            shorten: false,
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl MaskOptions {
    pub fn window(start: usize, length: usize) -> Self {
        Self {
            window: Some((start, length)),
            ..Self::default()
        }
    }

    /// 遮蔽區段以兩個遮蔽字元取代
    pub fn shortened(mut self) -> Self {
        self.shorten = true;
        self
    }

    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }
}

/// 隨機字串參數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomOptions {
    pub length: i32,
    pub only_number: bool,
}

impl RandomOptions {
    pub fn alphanumeric(length: i32) -> Self {
        Self {
            length,
            only_number: false,
        }
    }

    pub fn numeric(length: i32) -> Self {
        Self {
            length,
            only_number: true,
        }
    }
}

/// 日曆週期
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        };
        f.write_str(name)
    }
}

impl FromStr for Period {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "today" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "quarter" => Ok(Period::Quarter),
            "year" => Ok(Period::Year),
            other => Err(format!("unknown period: {}", other)),
        }
    }
}

/// 一個日曆週期的起訖時間（兩端皆包含）
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = "Tz::Offset: fmt::Display"))]
pub struct DateRange<Tz: TimeZone> {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl<Tz: TimeZone> DateRange<Tz> {
    pub fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    pub fn contains<Tz2: TimeZone>(&self, instant: &DateTime<Tz2>) -> bool {
        *instant >= self.start && *instant <= self.end
    }

    pub fn into_tuple(self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.start, self.end)
    }
}

impl<Tz: TimeZone> PartialEq for DateRange<Tz> {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}

impl<Tz: TimeZone> Eq for DateRange<Tz> {}

impl<Tz: TimeZone> From<DateRange<Tz>> for (DateTime<Tz>, DateTime<Tz>) {
    fn from(range: DateRange<Tz>) -> Self {
        range.into_tuple()
    }
}
