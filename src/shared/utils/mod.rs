use chrono::{Datelike, NaiveDate};

/// 日付文字列を表示用の形式に変換する
///
/// # 引数
/// * `raw` - 日付文字列（YYYY-MM-DD形式）
///
/// # 戻り値
/// 表示用の日付文字列（例: "2024年1月1日"）
///
/// # 注意
/// 解析できない入力は変換せずそのまま返す（決定的なフォールバック）
pub fn format_date(raw: &str) -> String {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => format!("{}年{}月{}日", date.year(), date.month(), date.day()),
        Err(_) => raw.to_string(),
    }
}

/// ステータスコードを表示用のラベルに変換する
///
/// # 引数
/// * `raw` - ステータスコード（pending / accepted / refused）
///
/// # 戻り値
/// 表示用のラベル。未知のコードは変換せずそのまま返す
pub fn format_status(raw: &str) -> String {
    match raw {
        "pending" => "承認待ち".to_string(),
        "accepted" => "承認済み".to_string(),
        "refused" => "却下".to_string(),
        _ => raw.to_string(),
    }
}

/// フォーム入力文字列から整数を取り出す
///
/// # 引数
/// * `raw` - フォーム入力文字列
///
/// # 戻り値
/// 先頭の符号付き整数部分、または数値が見つからない場合はNone
///
/// # 解析規則
/// 1. 前後の空白を除去
/// 2. 先頭の符号（+/-）を許可
/// 3. 連続する数字を読み取り、残りは無視（"123abc" -> 123）
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();

    let (sign, rest) = if let Some(rest) = trimmed.strip_prefix('-') {
        (-1i64, rest)
    } else if let Some(rest) = trimmed.strip_prefix('+') {
        (1i64, rest)
    } else {
        (1i64, trimmed)
    };

    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }

    digits.parse::<i64>().ok().map(|n| sign * n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn test_format_date_valid() {
        // 有効な日付の変換テスト
        assert_eq!(format_date("2024-01-01"), "2024年1月1日");
        assert_eq!(format_date("2023-05-30"), "2023年5月30日");
        assert_eq!(format_date("2019-12-31"), "2019年12月31日");
    }

    #[test]
    fn test_format_date_invalid_passes_through() {
        // 解析できない入力はそのまま返す
        assert_eq!(format_date(""), "");
        assert_eq!(format_date("not-a-date"), "not-a-date");
        assert_eq!(format_date("2024-13-99"), "2024-13-99");
        assert_eq!(format_date("2024/01/01"), "2024/01/01");
    }

    #[test]
    fn test_format_status_known_codes() {
        // 既知のステータスコードの変換テスト
        assert_eq!(format_status("pending"), "承認待ち");
        assert_eq!(format_status("accepted"), "承認済み");
        assert_eq!(format_status("refused"), "却下");
    }

    #[test]
    fn test_format_status_unknown_passes_through() {
        // 未知のコードはそのまま返す
        assert_eq!(format_status("archived"), "archived");
        assert_eq!(format_status(""), "");
    }

    #[test]
    fn test_parse_int_prefix() {
        // 整数解析のテスト
        assert_eq!(parse_int_prefix("123"), Some(123));
        assert_eq!(parse_int_prefix("  42  "), Some(42));
        assert_eq!(parse_int_prefix("-7"), Some(-7));
        assert_eq!(parse_int_prefix("+15"), Some(15));
        assert_eq!(parse_int_prefix("123abc"), Some(123));
        assert_eq!(parse_int_prefix("0"), Some(0));
    }

    #[test]
    fn test_parse_int_prefix_invalid() {
        // 数値が見つからない場合のテスト
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix("."), None);
    }

    #[quickcheck]
    fn prop_format_date_never_panics(input: String) -> bool {
        // 任意の入力に対してパニックせず、常に何らかの文字列を返す
        let _ = format_date(&input);
        true
    }

    #[quickcheck]
    fn prop_format_status_unknown_is_identity(input: String) -> bool {
        // 既知のコード以外は入力をそのまま返す
        match input.as_str() {
            "pending" | "accepted" | "refused" => true,
            _ => format_status(&input) == input,
        }
    }

    #[quickcheck]
    fn prop_parse_int_prefix_roundtrip(n: i64) -> bool {
        // 整数の文字列表現は必ず元の値に戻る
        parse_int_prefix(&n.to_string()) == Some(n)
    }
}
