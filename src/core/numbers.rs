use crate::core::strings::is_empty;
use bigdecimal::BigDecimal;
use regex::Regex;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::OnceLock;

fn integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("valid integer regex"))
}

fn decimal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid decimal regex"))
}

/// 字串全是數字（不含正負號和小數點）
pub fn is_integer<'a>(s: impl Into<Option<&'a str>>) -> bool {
    s.into().is_some_and(|s| integer_regex().is_match(s))
}

/// 字串是數字，可以有一段小數
pub fn is_decimal<'a>(s: impl Into<Option<&'a str>>) -> bool {
    s.into().is_some_and(|s| decimal_regex().is_match(s))
}

fn parse_or<T>(s: Option<&str>, default_value: T) -> T
where
    T: FromStr,
    T::Err: Display,
{
    let Some(s) = s.filter(|s| !is_empty(*s)) else {
        return default_value;
    };

    match s.parse::<T>() {
        Ok(value) => value,
        Err(e) => {
            tracing::debug!("Failed to parse '{}', using default: {}", s, e);
            default_value
        }
    }
}

pub fn to_int<'a>(s: impl Into<Option<&'a str>>, default_value: i32) -> i32 {
    parse_or(s.into(), default_value)
}

pub fn to_long<'a>(s: impl Into<Option<&'a str>>, default_value: i64) -> i64 {
    parse_or(s.into(), default_value)
}

/// 轉成 `f32`，前後空白會先去掉
pub fn to_float<'a>(s: impl Into<Option<&'a str>>, default_value: f32) -> f32 {
    parse_or(s.into().map(str::trim), default_value)
}

/// 轉成 `f64`，前後空白會先去掉
pub fn to_double<'a>(s: impl Into<Option<&'a str>>, default_value: f64) -> f64 {
    parse_or(s.into().map(str::trim), default_value)
}

pub fn to_big_decimal<'a>(s: impl Into<Option<&'a str>>, default_value: BigDecimal) -> BigDecimal {
    parse_or(s.into(), default_value)
}

/// 取較小的值；相等時回傳 `a`
pub fn min<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        b
    } else {
        a
    }
}

/// 取較大的值；相等時回傳 `b`
pub fn max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b {
        a
    } else {
        b
    }
}
