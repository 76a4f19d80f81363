use crate::domain::model::RandomOptions;
use crate::utils::error::{Result, UtilError};
use rand::Rng;

const CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 字串為 `None` 或長度為 0
pub fn is_empty<'a>(s: impl Into<Option<&'a str>>) -> bool {
    s.into().map_or(true, str::is_empty)
}

pub fn is_not_empty<'a>(s: impl Into<Option<&'a str>>) -> bool {
    !is_empty(s)
}

/// 字串為 `None`、空字串或全是空白
pub fn is_blank<'a>(s: impl Into<Option<&'a str>>) -> bool {
    s.into().map_or(true, |s| s.trim().is_empty())
}

pub fn is_not_blank<'a>(s: impl Into<Option<&'a str>>) -> bool {
    !is_blank(s)
}

pub fn null_to_empty<'a>(s: impl Into<Option<&'a str>>) -> &'a str {
    s.into().unwrap_or("")
}

/// 產生隨機字串，使用目前執行緒的亂數來源
pub fn random_string(options: RandomOptions) -> Result<String> {
    random_string_with(&mut rand::thread_rng(), options)
}

/// 產生隨機字串，使用呼叫端提供的亂數來源
///
/// `only_number` 為 true 時只產生數字，而且第一位不會是 `0`；
/// 否則從 `[a-zA-Z0-9]` 中均勻取字元。
pub fn random_string_with<R: Rng + ?Sized>(rng: &mut R, options: RandomOptions) -> Result<String> {
    if options.length <= 0 {
        return Err(UtilError::invalid_argument(
            "length",
            format!("Length must be greater than 0 : {}", options.length),
        ));
    }
    let length = options.length as usize;

    let mut buf = String::with_capacity(length);
    if options.only_number {
        buf.push(char::from(b'0' + rng.gen_range(1..=9u8)));
        for _ in 1..length {
            buf.push(char::from(b'0' + rng.gen_range(0..=9u8)));
        }
    } else {
        for _ in 0..length {
            buf.push(char::from(CHARS[rng.gen_range(0..CHARS.len())]));
        }
    }

    Ok(buf)
}

pub fn random(length: i32) -> Result<String> {
    random_string(RandomOptions::alphanumeric(length))
}

pub fn random_number(length: i32) -> Result<String> {
    random_string(RandomOptions::numeric(length))
}

/// 把字串陣列用分隔符串連起來
///
/// 陣列為 `None` 時回傳空字串，分隔符為 `None` 時視為空字串。
pub fn join<S: AsRef<str>>(array: Option<&[S]>, separator: Option<&str>) -> String {
    match array {
        Some(items) => items
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join(separator.unwrap_or("")),
        None => String::new(),
    }
}

/// 拼接路徑，相鄰的片段之間只保留一個 `/`，空白或 `None` 的片段略過
///
/// ```
/// use commons_util::core::strings::join_path;
///
/// assert_eq!(
///     join_path(["http://www.demo.com/", "/user", "/get"]),
///     "http://www.demo.com/user/get"
/// );
/// ```
pub fn join_path<'a, I, S>(pieces: I) -> String
where
    I: IntoIterator<Item = S>,
    S: Into<Option<&'a str>>,
{
    let mut result = String::new();

    for piece in pieces {
        let piece: Option<&'a str> = piece.into();
        let Some(piece) = piece.filter(|p| is_not_blank(*p)) else {
            continue;
        };

        if result.is_empty() {
            result.push_str(piece);
            continue;
        }

        match (result.ends_with('/'), piece.starts_with('/')) {
            (true, true) => result.push_str(&piece[1..]),
            (false, false) => {
                result.push('/');
                result.push_str(piece);
            }
            _ => result.push_str(piece),
        }
    }

    result
}
