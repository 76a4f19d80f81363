//! 日期格式化、解析與日曆週期的起訖時間
//!
//! 週期的開始是當天 `00:00:00.000`，結束是當天 `23:59:59.999`，以傳入日期本身的時區計算。
//! 一週從星期一開始。

use crate::core::date_pattern::DatePattern;
use crate::core::strings::is_empty;
use crate::domain::model::{DateRange, Period};
use crate::domain::ports::{Clock, SystemClock};
use chrono::{
    DateTime, Datelike, Days, Duration, Local, LocalResult, Months, NaiveDate, NaiveDateTime,
    NaiveTime, TimeZone,
};
use std::fmt::Display;

const QUARTER_FIRST_MONTH: [u32; 4] = [1, 4, 7, 10];

// 夏令時間的缺口最多往前或往後找一天
const MAX_GAP_STEPS: usize = 24 * 60;

/// 格式化日期，沒有日期或格式無效時回傳空字串
pub fn format_date<Tz: TimeZone>(date: Option<&DateTime<Tz>>, pattern: &str) -> String
where
    Tz::Offset: Display,
{
    let Some(date) = date else {
        return String::new();
    };

    match DatePattern::compile(pattern).and_then(|p| p.format(date)) {
        Ok(formatted) => formatted,
        Err(e) => {
            tracing::warn!("Cannot format date: {}", e);
            String::new()
        }
    }
}

/// 格式化自 1970-01-01 00:00:00 UTC 起算的毫秒數（本地時區）
pub fn format_millis(millis: Option<i64>, pattern: &str) -> String {
    format_millis_in(millis, pattern, &Local)
}

pub fn format_millis_in<Tz: TimeZone>(millis: Option<i64>, pattern: &str, tz: &Tz) -> String
where
    Tz::Offset: Display,
{
    let date = millis.and_then(|ms| tz.timestamp_millis_opt(ms).single());
    format_date(date.as_ref(), pattern)
}

/// 解析日期字串（本地時區），空字串或解析失敗時回傳 `None`
pub fn parse_date<'a>(s: impl Into<Option<&'a str>>, pattern: &str) -> Option<DateTime<Local>> {
    parse_date_in(s, pattern, &Local)
}

pub fn parse_date_in<'a, Tz: TimeZone>(
    s: impl Into<Option<&'a str>>,
    pattern: &str,
    tz: &Tz,
) -> Option<DateTime<Tz>> {
    let s = s.into();
    if is_empty(s) {
        return None;
    }
    let s = s?;

    let compiled = match DatePattern::compile(pattern) {
        Ok(compiled) => compiled,
        Err(e) => {
            tracing::warn!("Cannot parse date: {}", e);
            return None;
        }
    };

    match compiled.parse(s, tz) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::debug!("Failed to parse '{}' with pattern '{}': {}", s, pattern, e);
            None
        }
    }
}

/// 判斷兩個日期是否為同一天（以第一個日期的時區為準）
pub fn is_same_day<Tz: TimeZone>(d1: Option<&DateTime<Tz>>, d2: Option<&DateTime<Tz>>) -> bool {
    match (d1, d2) {
        (Some(d1), Some(d2)) => d1.date_naive() == d2.with_timezone(&d1.timezone()).date_naive(),
        _ => false,
    }
}

/// 一天的開始
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use commons_util::core::dates::{begin_of_date, format_date};
///
/// let date = Utc.with_ymd_and_hms(2016, 10, 20, 18, 36, 58).unwrap();
/// let begin = begin_of_date(&date);
/// assert_eq!(format_date(Some(&begin), "yyyy/MM/dd HH:mm:ss.SSS"), "2016/10/20 00:00:00.000");
/// ```
pub fn begin_of_date<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    start_of_day(&date.timezone(), date.date_naive())
}

/// 一天的結束（`23:59:59.999`）
pub fn end_of_date<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    end_of_day(&date.timezone(), date.date_naive())
}

pub fn begin_of_date_str<'a>(s: impl Into<Option<&'a str>>, pattern: &str) -> Option<DateTime<Local>> {
    parse_date(s, pattern).map(|date| begin_of_date(&date))
}

pub fn end_of_date_str<'a>(s: impl Into<Option<&'a str>>, pattern: &str) -> Option<DateTime<Local>> {
    parse_date(s, pattern).map(|date| end_of_date(&date))
}

pub fn start_and_end_of_today() -> DateRange<Local> {
    range_of_current(Period::Day, &SystemClock)
}

pub fn start_and_end_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> DateRange<Tz> {
    DateRange::new(begin_of_date(date), end_of_date(date))
}

/// 日期所在星期（星期一到星期日）的開始和結束
pub fn start_and_end_of_week<Tz: TimeZone>(date: &DateTime<Tz>) -> DateRange<Tz> {
    let tz = date.timezone();
    let day = date.date_naive();

    // 星期一為 1，星期日為 7
    let day_of_week = day.weekday().number_from_monday();
    let monday = day - Days::new(u64::from(day_of_week - 1));
    let sunday = monday + Days::new(6);

    DateRange::new(start_of_day(&tz, monday), end_of_day(&tz, sunday))
}

pub fn start_and_end_of_current_week() -> DateRange<Local> {
    range_of_current(Period::Week, &SystemClock)
}

pub fn start_and_end_of_month<Tz: TimeZone>(date: &DateTime<Tz>) -> DateRange<Tz> {
    let day = date.date_naive();
    spanning_months(&date.timezone(), day.year(), day.month(), 1)
}

pub fn start_and_end_of_current_month() -> DateRange<Local> {
    range_of_current(Period::Month, &SystemClock)
}

/// 日期所在季度的開始和結束，季度從 1、4、7、10 月開始
pub fn start_and_end_of_quarter<Tz: TimeZone>(date: &DateTime<Tz>) -> DateRange<Tz> {
    let day = date.date_naive();
    let first_month = QUARTER_FIRST_MONTH[(day.month0() / 3) as usize];
    spanning_months(&date.timezone(), day.year(), first_month, 3)
}

pub fn start_and_end_of_current_quarter() -> DateRange<Local> {
    range_of_current(Period::Quarter, &SystemClock)
}

pub fn start_and_end_of_year<Tz: TimeZone>(date: &DateTime<Tz>) -> DateRange<Tz> {
    spanning_months(&date.timezone(), date.year(), 1, 12)
}

pub fn start_and_end_of_current_year() -> DateRange<Local> {
    range_of_current(Period::Year, &SystemClock)
}

pub fn range_of<Tz: TimeZone>(period: Period, date: &DateTime<Tz>) -> DateRange<Tz> {
    match period {
        Period::Day => start_and_end_of_day(date),
        Period::Week => start_and_end_of_week(date),
        Period::Month => start_and_end_of_month(date),
        Period::Quarter => start_and_end_of_quarter(date),
        Period::Year => start_and_end_of_year(date),
    }
}

pub fn range_of_current<C: Clock + ?Sized>(period: Period, clock: &C) -> DateRange<Local> {
    range_of(period, &clock.now())
}

/// 從 `year-month-01` 開始，跨 `months` 個月，結束於下一段開始的前一天
fn spanning_months<Tz: TimeZone>(tz: &Tz, year: i32, month: u32, months: u32) -> DateRange<Tz> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(NaiveDate::MIN);
    let last = first
        .checked_add_months(Months::new(months))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX);

    DateRange::new(start_of_day(tz, first), end_of_day(tz, last))
}

fn start_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Tz> {
    resolve_earliest(tz, day.and_time(NaiveTime::MIN))
}

fn end_of_day<Tz: TimeZone>(tz: &Tz, day: NaiveDate) -> DateTime<Tz> {
    let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    resolve_latest(tz, day.and_time(last_instant))
}

/// 本地時間轉成時區時間；落在缺口時往後找第一個存在的時間，重疊時取較早者
pub(crate) fn resolve_earliest<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    resolve(tz, naive, Duration::minutes(1))
}

/// 本地時間轉成時區時間；落在缺口時往前找最後一個存在的時間，重疊時取較晚者
pub(crate) fn resolve_latest<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> DateTime<Tz> {
    resolve(tz, naive, Duration::minutes(-1))
}

fn resolve<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime, step: Duration) -> DateTime<Tz> {
    let forward = step > Duration::zero();
    let mut candidate = naive;

    for _ in 0..=MAX_GAP_STEPS {
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return dt,
            LocalResult::Ambiguous(earliest, latest) => {
                return if forward { earliest } else { latest };
            }
            LocalResult::None => candidate += step,
        }
    }

    tz.from_utc_datetime(&naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use chrono_tz::America::Sao_Paulo;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    #[test]
    fn test_week_of_sunday_goes_back_to_monday() {
        // 2016-10-23 是星期日
        let range = start_and_end_of_week(&utc(2016, 10, 23, 12, 0, 0));
        assert_eq!(range.start, utc(2016, 10, 17, 0, 0, 0));
        assert_eq!(
            format_date(Some(&range.end), "yyyy-MM-dd HH:mm:ss.SSS"),
            "2016-10-23 23:59:59.999"
        );
    }

    #[test]
    fn test_month_end_in_leap_year() {
        let range = start_and_end_of_month(&utc(2020, 2, 10, 5, 0, 0));
        assert_eq!(range.start, utc(2020, 2, 1, 0, 0, 0));
        assert_eq!(format_date(Some(&range.end), "yyyy-MM-dd"), "2020-02-29");
    }

    #[test]
    fn test_quarter_boundaries() {
        let range = start_and_end_of_quarter(&utc(2021, 11, 30, 23, 0, 0));
        assert_eq!(range.start, utc(2021, 10, 1, 0, 0, 0));
        assert_eq!(format_date(Some(&range.end), "yyyy-MM-dd HH:mm:ss.SSS"), "2021-12-31 23:59:59.999");
    }

    #[test]
    fn test_boundaries_follow_date_offset() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        // 2020-12-31 20:00 UTC 在 +08:00 已經是 2021-01-01
        let date = utc(2020, 12, 31, 20, 0, 0).with_timezone(&tz);
        let range = start_and_end_of_year(&date);
        assert_eq!(format_date(Some(&range.start), "yyyy-MM-dd HH:mm:ss XXX"), "2021-01-01 00:00:00 +08:00");
    }

    #[test]
    fn test_is_same_day_across_offsets() {
        let tz = FixedOffset::east_opt(8 * 3600).unwrap();
        let a = tz.with_ymd_and_hms(2021, 3, 1, 1, 0, 0).unwrap();
        let b = tz.with_ymd_and_hms(2021, 3, 1, 23, 0, 0).unwrap();
        let c = tz.with_ymd_and_hms(2021, 3, 2, 0, 0, 0).unwrap();
        assert!(is_same_day(Some(&a), Some(&b)));
        assert!(!is_same_day(Some(&b), Some(&c)));
        assert!(!is_same_day(Some(&a), None));
    }

    #[test]
    fn test_resolve_without_transition_is_identity() {
        // 只有 +00:00 的時區不會有缺口，直接取到同一個時間
        let naive = NaiveDate::from_ymd_opt(2021, 3, 28).unwrap().and_hms_opt(1, 30, 0).unwrap();
        assert_eq!(resolve_earliest(&Utc, naive), naive.and_utc());
        assert_eq!(resolve_latest(&Utc, naive), naive.and_utc());
    }

    const ZONED: &str = "yyyy-MM-dd HH:mm:ss.SSS XXX";

    #[test]
    fn test_day_starting_in_dst_gap() {
        // 聖保羅 2018-11-04 00:00 直接跳到 01:00
        let date = Sao_Paulo.with_ymd_and_hms(2018, 11, 4, 12, 0, 0).unwrap();

        assert_eq!(
            format_date(Some(&begin_of_date(&date)), ZONED),
            "2018-11-04 01:00:00.000 -02:00"
        );
        assert_eq!(
            format_date(Some(&end_of_date(&date)), ZONED),
            "2018-11-04 23:59:59.999 -02:00"
        );

        let month = start_and_end_of_month(&date);
        assert_eq!(format_date(Some(&month.start), ZONED), "2018-11-01 00:00:00.000 -03:00");
    }

    #[test]
    fn test_resolve_steps_out_of_dst_gap() {
        let naive = NaiveDate::from_ymd_opt(2018, 11, 4).unwrap().and_hms_opt(0, 30, 0).unwrap();

        let earliest = resolve_earliest(&Sao_Paulo, naive);
        assert_eq!(format_date(Some(&earliest), ZONED), "2018-11-04 01:00:00.000 -02:00");

        let latest = resolve_latest(&Sao_Paulo, naive);
        assert_eq!(format_date(Some(&latest), ZONED), "2018-11-03 23:59:30.000 -03:00");
    }

    #[test]
    fn test_day_ending_in_repeated_hour() {
        // 2019-02-17 00:00 (-02:00) 退回 2019-02-16 23:00 (-03:00)，23 點走兩次
        let date = Sao_Paulo.with_ymd_and_hms(2019, 2, 16, 12, 0, 0).unwrap();
        let range = start_and_end_of_day(&date);

        assert_eq!(format_date(Some(&range.start), ZONED), "2019-02-16 00:00:00.000 -02:00");
        assert_eq!(format_date(Some(&range.end), ZONED), "2019-02-16 23:59:59.999 -03:00");

        let next_day = Sao_Paulo.with_ymd_and_hms(2019, 2, 17, 12, 0, 0).unwrap();
        assert_eq!(
            range.end + Duration::milliseconds(1),
            begin_of_date(&next_day)
        );

        let naive = NaiveDate::from_ymd_opt(2019, 2, 16).unwrap().and_hms_opt(23, 30, 0).unwrap();
        let earliest = resolve_earliest(&Sao_Paulo, naive);
        assert_eq!(format_date(Some(&earliest), ZONED), "2019-02-16 23:30:00.000 -02:00");
    }
}
