//! 遮蔽敏感字串
//!
//! 位置與長度都以字元（`char`）計算。

use crate::core::strings::is_empty;
use crate::domain::model::MaskOptions;

/// 遮蔽字串中間一半長度的字元
///
/// ```
/// use commons_util::core::mask::mask_string;
///
/// assert_eq!(
///     mask_string("1rwLQAFbHSh9bZ5GrRwUmKSk9cLft8D1b"),
///     "1rwLQAFb****************9cLft8D1b"
/// );
/// ```
pub fn mask_string<'a>(s: impl Into<Option<&'a str>>) -> String {
    mask_with(s, MaskOptions::default())
}

/// 遮蔽從 `start` 開始、長度為 `length` 的字元
pub fn mask_range<'a>(s: impl Into<Option<&'a str>>, start: usize, length: usize) -> String {
    mask_with(s, MaskOptions::window(start, length))
}

/// 依照參數遮蔽字串
///
/// 沒有指定遮蔽區段時，遮蔽中間一半長度的字元；`shorten` 且長度超過 10 時
/// 只保留前後各 4 個字元。遮蔽區段碰到或超過字串結尾時，整個字串都會被遮蔽。
/// `shorten` 且遮蔽長度大於 2 時，遮蔽區段只用兩個遮蔽字元表示。
pub fn mask_with<'a>(s: impl Into<Option<&'a str>>, options: MaskOptions) -> String {
    let s = s.into();
    let Some(s) = s.filter(|s| !s.is_empty()) else {
        return String::new();
    };

    let chars: Vec<char> = s.chars().collect();
    let len = chars.len();

    let (mut start, mut length) = match options.window {
        Some(window) => window,
        None => midpoint_window(len, options.shorten),
    };

    if start.saturating_add(length) >= len {
        start = 0;
        length = len;
    }

    let mask_len = if options.shorten && length > 2 { 2 } else { length };

    let mut masked = String::with_capacity(s.len());
    masked.extend(&chars[..start]);
    masked.extend(std::iter::repeat(options.mask_char).take(mask_len));
    masked.extend(&chars[start + length..]);
    masked
}

fn midpoint_window(len: usize, shorten: bool) -> (usize, usize) {
    let mask_length = if shorten && len > 10 {
        (len - 8).max(1)
    } else {
        (len / 2).max(1)
    };

    ((len - mask_length) / 2, mask_length)
}

/// 遮蔽手機號碼，保留前 3 碼
pub fn mask_mobile<'a>(mobile: impl Into<Option<&'a str>>) -> String {
    mask_range(mobile, 3, 4)
}

/// 遮蔽信箱
///
/// 只遮蔽 `@` 之前的使用者名稱，域名不變；沒有 `@` 時整個字串照 [`mask_string`] 遮蔽。
/// 空值原樣回傳。
pub fn mask_email<'a>(email: impl Into<Option<&'a str>>) -> Option<String> {
    let email = email.into()?;
    if is_empty(email) {
        return Some(email.to_string());
    }

    let masked = match email.find('@') {
        Some(at) => {
            let (name, domain) = email.split_at(at);
            format!("{}{}", mask_string(name), domain)
        }
        None => mask_string(email),
    };
    Some(masked)
}
