use serde::Deserialize;

/// 新規請求書フォームの入力値
///
/// すべてのフィールドを入力欄の文字列のまま保持し、数値への変換は
/// 提出時にまとめて行う
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NewBillForm {
    /// 経費カテゴリ
    #[serde(rename = "type", default)]
    pub bill_type: String,
    /// 経費の名称
    #[serde(default)]
    pub name: String,
    /// 金額（入力文字列のまま）
    #[serde(default)]
    pub amount: String,
    /// 日付（YYYY-MM-DD形式）
    #[serde(default)]
    pub date: String,
    /// 消費税額
    #[serde(default)]
    pub vat: String,
    /// 税率（入力文字列のまま、未入力可）
    #[serde(default)]
    pub pct: String,
    /// コメント
    #[serde(default)]
    pub commentary: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_deserializes_wire_names() {
        // フォーム入力のフィールド名テスト
        let json = r#"{
            "type": "交通費",
            "name": "電車代",
            "amount": "123",
            "date": "2024-01-01",
            "vat": "10",
            "pct": "20",
            "commentary": "出張"
        }"#;

        let form: NewBillForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.bill_type, "交通費");
        assert_eq!(form.name, "電車代");
        assert_eq!(form.amount, "123");
        assert_eq!(form.pct, "20");
    }

    #[test]
    fn test_form_tolerates_missing_fields() {
        // 未入力のフィールドは空文字列になる
        let json = r#"{"name": "電車代"}"#;
        let form: NewBillForm = serde_json::from_str(json).unwrap();

        assert_eq!(form.name, "電車代");
        assert_eq!(form.amount, "");
        assert_eq!(form.pct, "");
        assert_eq!(form.commentary, "");
    }
}
