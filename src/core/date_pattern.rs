use crate::core::dates::resolve_earliest;
use crate::utils::error::{Result, UtilError};
use chrono::format::{self, Item, Numeric, Pad, ParseResult, Parsed, StrftimeItems};
use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

/// 把 `yyyy/MM/dd HH:mm:ss.SSS` 這類格式轉成 chrono 的 strftime 片段
///
/// 支援的字母：`y M d H h m s S E a z Z X u`，單引號內為原樣文字，`''` 代表單引號。
/// 解析時只看開頭符合格式的部分，後面多出來的文字會被忽略。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePattern {
    pattern: String,
    segments: Vec<Segment>,
    has_year: bool,
    has_month: bool,
    has_day: bool,
    has_hour: bool,
    has_hour24: bool,
    has_minute: bool,
    has_ampm: bool,
    has_offset: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// 交給 chrono 的 strftime 格式
    Strftime(String),
    /// `S` 欄位：毫秒整數，輸出時補零到字母個數
    Millis(usize),
}

impl DatePattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        let mut compiled = DatePattern {
            pattern: pattern.to_string(),
            segments: Vec::new(),
            has_year: false,
            has_month: false,
            has_day: false,
            has_hour: false,
            has_hour24: false,
            has_minute: false,
            has_ampm: false,
            has_offset: false,
        };

        let chars: Vec<char> = pattern.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];

            if c == '\'' {
                i = compiled.push_quoted(&chars, i)?;
                continue;
            }

            if c.is_ascii_alphabetic() {
                let mut count = 1;
                while chars.get(i + count) == Some(&c) {
                    count += 1;
                }
                if c == 'S' {
                    compiled.segments.push(Segment::Millis(count));
                } else {
                    let directive =
                        compiled.field(c, count).ok_or_else(|| UtilError::InvalidPattern {
                            pattern: pattern.to_string(),
                            reason: format!("unsupported pattern letter '{}'", c),
                        })?;
                    compiled.push_strftime(directive);
                }
                i += count;
                continue;
            }

            compiled.push_literal(c);
            i += 1;
        }

        Ok(compiled)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn format<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> Result<String>
    where
        Tz::Offset: Display,
    {
        let mut buf = String::new();
        for segment in &self.segments {
            let written = match segment {
                Segment::Strftime(items) => write!(buf, "{}", date.format(items)),
                Segment::Millis(width) => {
                    write!(buf, "{:0width$}", date.timestamp_subsec_millis(), width = *width)
                }
            };
            written.map_err(|_| UtilError::InvalidPattern {
                pattern: self.pattern.clone(),
                reason: "pattern cannot be rendered for this date".to_string(),
            })?;
        }
        Ok(buf)
    }

    /// 解析日期字串；格式中沒有的欄位補預設值（1970 年、1 月、1 日、00:00）
    ///
    /// `h` 沒有搭配 `a` 時視為上午；`S` 讀一到九位數字，當作毫秒數。
    pub fn parse<Tz: TimeZone>(&self, input: &str, tz: &Tz) -> ParseResult<DateTime<Tz>> {
        let mut parsed = Parsed::new();
        let mut rest = input;

        for segment in &self.segments {
            rest = match segment {
                Segment::Strftime(items) => {
                    format::parse_and_remainder(&mut parsed, rest, StrftimeItems::new(items))?
                }
                Segment::Millis(_) => parse_millis(&mut parsed, rest)?,
            };
        }

        if !rest.is_empty() {
            tracing::debug!("Ignoring '{}' after pattern '{}'", rest, self.pattern);
        }

        if !self.has_year {
            parsed.set_year(1970)?;
        }
        if !self.has_month {
            parsed.set_month(1)?;
        }
        if !self.has_day {
            parsed.set_day(1)?;
        }
        if !self.has_hour {
            parsed.set_hour12(12)?;
        }
        if !self.has_hour24 && !self.has_ampm {
            parsed.set_ampm(false)?;
        }
        if !self.has_minute {
            parsed.set_minute(0)?;
        }

        if self.has_offset {
            return Ok(parsed.to_datetime()?.with_timezone(tz));
        }

        let date = parsed.to_naive_date()?;
        let time = parsed.to_naive_time()?;
        Ok(resolve_earliest(tz, date.and_time(time)))
    }

    fn field(&mut self, letter: char, count: usize) -> Option<&'static str> {
        let directive = match letter {
            'y' => {
                self.has_year = true;
                if count == 2 { "%y" } else { "%Y" }
            }
            'M' => {
                self.has_month = true;
                match count {
                    1 => "%-m",
                    2 => "%m",
                    3 => "%b",
                    _ => "%B",
                }
            }
            'd' => {
                self.has_day = true;
                if count == 1 { "%-d" } else { "%d" }
            }
            'H' => {
                self.has_hour = true;
                self.has_hour24 = true;
                if count == 1 { "%-H" } else { "%H" }
            }
            'h' => {
                self.has_hour = true;
                if count == 1 { "%-I" } else { "%I" }
            }
            'm' => {
                self.has_minute = true;
                if count == 1 { "%-M" } else { "%M" }
            }
            's' => {
                if count == 1 { "%-S" } else { "%S" }
            }
            'E' => {
                if count <= 3 { "%a" } else { "%A" }
            }
            'a' => {
                self.has_ampm = true;
                "%p"
            }
            'u' => "%u",
            // 時區名稱只用來輸出，解析時略過不採用
            'z' => "%Z",
            'Z' => {
                self.has_offset = true;
                "%z"
            }
            'X' if count <= 3 => {
                self.has_offset = true;
                if count == 3 { "%:z" } else { "%z" }
            }
            _ => return None,
        };
        Some(directive)
    }

    fn push_strftime(&mut self, directive: &str) {
        match self.segments.last_mut() {
            Some(Segment::Strftime(items)) => items.push_str(directive),
            _ => self.segments.push(Segment::Strftime(directive.to_string())),
        }
    }

    fn push_literal(&mut self, c: char) {
        if c == '%' {
            self.push_strftime("%%");
        } else {
            let mut buf = [0; 4];
            self.push_strftime(c.encode_utf8(&mut buf));
        }
    }

    /// 處理單引號包住的文字，回傳下一個要處理的位置
    fn push_quoted(&mut self, chars: &[char], start: usize) -> Result<usize> {
        if chars.get(start + 1) == Some(&'\'') {
            self.push_literal('\'');
            return Ok(start + 2);
        }

        let mut i = start + 1;
        loop {
            match chars.get(i) {
                None => {
                    return Err(UtilError::InvalidPattern {
                        pattern: self.pattern.clone(),
                        reason: "unterminated quoted text".to_string(),
                    })
                }
                Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                    self.push_literal('\'');
                    i += 2;
                }
                Some('\'') => return Ok(i + 1),
                Some(&c) => {
                    self.push_literal(c);
                    i += 1;
                }
            }
        }
    }
}

/// 讀取毫秒數字並寫入 `parsed`，回傳剩下的字串
///
/// `.1` 是 1 毫秒而不是 100 毫秒；超過 999 的值視為超出範圍。
fn parse_millis<'a>(parsed: &mut Parsed, input: &'a str) -> ParseResult<&'a str> {
    // 借 chrono 的數字掃描找出位數，錯誤也沿用 chrono 的 ParseError
    let mut scratch = Parsed::new();
    let digits = [Item::Numeric(Numeric::Nanosecond, Pad::None)];
    let rest = format::parse_and_remainder(&mut scratch, input, digits.iter())?;

    let millis = input[..input.len() - rest.len()]
        .bytes()
        .filter(u8::is_ascii_digit)
        .fold(0i64, |acc, b| acc * 10 + i64::from(b - b'0'));
    parsed.set_nanosecond(millis * 1_000_000)?;

    Ok(rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike, Utc};

    fn strftime(text: &str) -> Segment {
        Segment::Strftime(text.to_string())
    }

    #[test]
    fn test_compile_common_patterns() {
        let pattern = DatePattern::compile("yyyy/MM/dd HH:mm:ss.SSS").unwrap();
        assert_eq!(
            pattern.segments,
            vec![strftime("%Y/%m/%d %H:%M:%S."), Segment::Millis(3)]
        );

        let pattern = DatePattern::compile("yyyyMMdd").unwrap();
        assert_eq!(pattern.segments, vec![strftime("%Y%m%d")]);

        let pattern = DatePattern::compile("yyyy-MM-dd'T'HH:mm:ssXXX").unwrap();
        assert_eq!(pattern.segments, vec![strftime("%Y-%m-%dT%H:%M:%S%:z")]);
    }

    #[test]
    fn test_quotes_and_percent_are_literal() {
        let pattern = DatePattern::compile("h 'o''clock' a, 100%").unwrap();
        assert_eq!(pattern.segments, vec![strftime("%-I o'clock %p, 100%%")]);

        let pattern = DatePattern::compile("''yy''").unwrap();
        assert_eq!(pattern.segments, vec![strftime("'%y'")]);
    }

    #[test]
    fn test_rejects_unknown_letters_and_open_quotes() {
        assert!(matches!(
            DatePattern::compile("yyyy-QQ"),
            Err(UtilError::InvalidPattern { .. })
        ));
        assert!(DatePattern::compile("yyyy 'open").is_err());
    }

    #[test]
    fn test_millis_width_follows_letter_count() {
        let date = Utc.with_ymd_and_hms(2016, 10, 20, 18, 36, 58).unwrap()
            + chrono::Duration::milliseconds(5);

        let format = |pattern: &str| DatePattern::compile(pattern).unwrap().format(&date).unwrap();
        assert_eq!(format("ss.S"), "58.5");
        assert_eq!(format("ss.SS"), "58.05");
        assert_eq!(format("ss.SSS"), "58.005");
    }

    #[test]
    fn test_zone_name_is_formatted() {
        let date = Utc.with_ymd_and_hms(2016, 10, 20, 18, 36, 58).unwrap();
        let pattern = DatePattern::compile("yyyy-MM-dd HH:mm z").unwrap();
        assert_eq!(pattern.format(&date).unwrap(), "2016-10-20 18:36 UTC");

        // 時區名稱不影響解析結果
        let parsed = pattern.parse("2016-10-20 18:36 UTC", &Utc).unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2016, 10, 20, 18, 36, 0).unwrap());
    }

    #[test]
    fn test_parse_fills_missing_fields() {
        let pattern = DatePattern::compile("yyyy-MM").unwrap();
        let parsed = pattern.parse("2021-06", &Utc).unwrap();
        let expected = NaiveDate::from_ymd_opt(2021, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            .and_utc();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_parse_with_offset_converts_zone() {
        let pattern = DatePattern::compile("yyyy-MM-dd HH:mm Z").unwrap();
        let parsed = pattern.parse("2020-01-01 08:00 +0800", &Utc).unwrap();
        assert_eq!(pattern.format(&parsed).unwrap(), "2020-01-01 00:00 +0000");
    }

    #[test]
    fn test_parse_ignores_trailing_text() {
        let pattern = DatePattern::compile("yyyy-MM-dd").unwrap();
        let expected = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(pattern.parse("2020-01-01 extra", &Utc).unwrap(), expected);
        assert_eq!(pattern.parse("2020-01-01 18:36:58", &Utc).unwrap(), expected);

        // 開頭不符合時仍然失敗
        assert!(pattern.parse("x2020-01-01", &Utc).is_err());
        assert!(pattern.parse("2020-01", &Utc).is_err());
    }

    #[test]
    fn test_parse_short_millis() {
        let pattern = DatePattern::compile("yyyy/MM/dd HH:mm:ss.SSS").unwrap();

        let parsed = pattern.parse("2016/10/20 18:36:58.1", &Utc).unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 1);
        assert_eq!(parsed.second(), 58);

        let parsed = pattern.parse("2016/10/20 18:36:58.103", &Utc).unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 103);

        assert!(pattern.parse("2016/10/20 18:36:58.", &Utc).is_err());
        assert!(pattern.parse("2016/10/20 18:36:58.1000", &Utc).is_err());
    }

    #[test]
    fn test_twelve_hour_without_marker_is_morning() {
        let pattern = DatePattern::compile("hh:mm").unwrap();
        let parsed = pattern.parse("06:30", &Utc).unwrap();
        assert_eq!((parsed.hour(), parsed.minute()), (6, 30));

        let parsed = pattern.parse("12:15", &Utc).unwrap();
        assert_eq!((parsed.hour(), parsed.minute()), (0, 15));

        let pattern = DatePattern::compile("hh:mm a").unwrap();
        let parsed = pattern.parse("06:30 PM", &Utc).unwrap();
        assert_eq!(parsed.hour(), 18);
    }
}
