use commons_util::core::mask::{mask_email, mask_mobile, mask_range, mask_string, mask_with};
use commons_util::MaskOptions;

const TOKEN: &str = "1rwLQAFbHSh9bZ5GrRwUmKSk9cLft8D1b";

#[test]
fn test_mask_mobile() {
    assert_eq!(mask_range("13901270809", 3, 4), "139****0809");
    assert_eq!(mask_mobile("13901270809"), "139****0809");
    // 長度不足時整個遮蔽
    assert_eq!(mask_mobile("1390127"), "*******");
}

#[test]
fn test_mask_middle_half() {
    let masked = mask_string(TOKEN);
    assert_eq!(masked, "1rwLQAFb****************9cLft8D1b");
    assert_eq!(masked.chars().filter(|c| *c == '*').count(), TOKEN.len() / 2);
}

#[test]
fn test_mask_shortened() {
    assert_eq!(mask_with(TOKEN, MaskOptions::default().shortened()), "1rwL**8D1b");
    assert_eq!(
        mask_with("1rwLQAFbHSh9bZ5GrRwUmKSk9cL", MaskOptions::window(5, 6).shortened()),
        "1rwLQ**9bZ5GrRwUmKSk9cL"
    );
    // 短字串照一般規則遮蔽一半，再縮成兩個字元
    assert_eq!(mask_with("abcdefghij", MaskOptions::default().shortened()), "ab**hij");
    // 遮蔽長度不超過 2 時不縮短
    assert_eq!(mask_with("abcd", MaskOptions::default().shortened()), "a**d");
}

#[test]
fn test_mask_empty_input() {
    assert_eq!(mask_string(""), "");
    assert_eq!(mask_string(None), "");
    assert_eq!(mask_range(None, 3, 4), "");
}

#[test]
fn test_mask_email() {
    assert_eq!(
        mask_email("kanejin.cn@gmail.com").as_deref(),
        Some("ka*****.cn@gmail.com")
    );
    assert_eq!(mask_email("kanejin.cn").as_deref(), Some("ka*****.cn"));
    assert_eq!(mask_email("@gmail.com").as_deref(), Some("@gmail.com"));
    assert_eq!(mask_email("").as_deref(), Some(""));
    assert_eq!(mask_email(None), None);
}
