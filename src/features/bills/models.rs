use serde::{Deserialize, Serialize};

use crate::shared::utils::{format_date, format_status};

/// 請求書のライフサイクル状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    /// 承認待ち
    Pending,
    /// 承認済み
    Accepted,
    /// 却下
    Refused,
}

/// 請求書データモデル
///
/// 提出時にフォーム入力とアップロード済み添付ファイルの情報から
/// メモリ上で組み立てられ、ストアへ一度だけ送信される
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Bill {
    /// 所有者のメールアドレス
    pub email: String,
    /// 経費カテゴリ
    #[serde(rename = "type")]
    pub bill_type: String,
    /// 経費の名称
    pub name: String,
    /// 金額（整数）
    pub amount: i64,
    /// 日付（YYYY-MM-DD形式）
    pub date: String,
    /// 消費税額（文字列のまま保持）
    pub vat: String,
    /// 税率（整数、未入力時は20）
    pub pct: i64,
    /// コメント
    pub commentary: String,
    /// 添付ファイルのURL（アップロード成功後のみ設定）
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    /// 添付ファイル名（アップロード成功後のみ設定）
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    /// ライフサイクル状態
    pub status: BillStatus,
}

/// ストアから取得したままの請求書レコード
///
/// 未知のステータスコードも保持できるよう、日付とステータスは
/// 文字列のまま扱う
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawBill {
    /// レコードID
    #[serde(default)]
    pub id: Option<String>,
    /// 所有者のメールアドレス
    #[serde(default)]
    pub email: String,
    /// 経費カテゴリ
    #[serde(rename = "type", default)]
    pub bill_type: String,
    /// 経費の名称
    #[serde(default)]
    pub name: String,
    /// 金額
    #[serde(default)]
    pub amount: i64,
    /// 日付（YYYY-MM-DD形式）
    #[serde(default)]
    pub date: String,
    /// 消費税額
    #[serde(default)]
    pub vat: String,
    /// 税率
    #[serde(default)]
    pub pct: i64,
    /// コメント
    #[serde(default)]
    pub commentary: String,
    /// 添付ファイルのURL
    #[serde(rename = "fileUrl", default)]
    pub file_url: Option<String>,
    /// 添付ファイル名
    #[serde(rename = "fileName", default)]
    pub file_name: Option<String>,
    /// ステータスコード（pending / accepted / refused）
    #[serde(default)]
    pub status: String,
}

/// 表示用に整形された請求書レコード
///
/// 日付とステータスのみ表示用の文字列に変換され、他のフィールドは
/// 取得したレコードと一対一に対応する
#[derive(Debug, Clone, Serialize)]
pub struct FormattedBill {
    /// レコードID
    pub id: Option<String>,
    /// 所有者のメールアドレス
    pub email: String,
    /// 経費カテゴリ
    #[serde(rename = "type")]
    pub bill_type: String,
    /// 経費の名称
    pub name: String,
    /// 金額
    pub amount: i64,
    /// 表示用の日付
    pub date: String,
    /// 消費税額
    pub vat: String,
    /// 税率
    pub pct: i64,
    /// コメント
    pub commentary: String,
    /// 添付ファイルのURL
    #[serde(rename = "fileUrl")]
    pub file_url: Option<String>,
    /// 添付ファイル名
    #[serde(rename = "fileName")]
    pub file_name: Option<String>,
    /// 表示用のステータスラベル
    pub status: String,
}

impl FormattedBill {
    /// 取得したレコードから表示用のコピーを作成する
    ///
    /// # 引数
    /// * `raw` - ストアから取得したレコード
    ///
    /// # 戻り値
    /// 日付とステータスを整形した表示用レコード
    pub fn from_raw(raw: &RawBill) -> Self {
        Self {
            id: raw.id.clone(),
            email: raw.email.clone(),
            bill_type: raw.bill_type.clone(),
            name: raw.name.clone(),
            amount: raw.amount,
            date: format_date(&raw.date),
            vat: raw.vat.clone(),
            pct: raw.pct,
            commentary: raw.commentary.clone(),
            file_url: raw.file_url.clone(),
            file_name: raw.file_name.clone(),
            status: format_status(&raw.status),
        }
    }
}

/// 請求書を日付の降順（新しい順）に並べ替える
///
/// 表示用の並び順であり、一覧取得の結果そのものは取得順を保持する。
/// YYYY-MM-DD形式の日付は辞書順の比較がそのまま日付順になる
pub fn sort_by_date_desc(bills: &mut [RawBill]) {
    bills.sort_by(|a, b| b.date.cmp(&a.date));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_bill_with_date(date: &str) -> RawBill {
        RawBill {
            id: None,
            email: "employee@test.tld".to_string(),
            bill_type: "交通費".to_string(),
            name: "電車代".to_string(),
            amount: 100,
            date: date.to_string(),
            vat: "10".to_string(),
            pct: 20,
            commentary: String::new(),
            file_url: None,
            file_name: None,
            status: "pending".to_string(),
        }
    }

    #[test]
    fn test_bill_serialization_uses_wire_names() {
        // 永続化時のフィールド名テスト
        let bill = Bill {
            email: "employee@test.tld".to_string(),
            bill_type: "交通費".to_string(),
            name: "電車代".to_string(),
            amount: 123,
            date: "2023-05-30".to_string(),
            vat: "20".to_string(),
            pct: 20,
            commentary: "出張".to_string(),
            file_url: Some("https://example.com/receipt.jpg".to_string()),
            file_name: Some("receipt.jpg".to_string()),
            status: BillStatus::Pending,
        };

        let json = serde_json::to_string(&bill).unwrap();
        assert!(json.contains("\"type\":\"交通費\""));
        assert!(json.contains("\"fileUrl\""));
        assert!(json.contains("\"fileName\""));
        assert!(json.contains("\"status\":\"pending\""));
        assert!(json.contains("\"amount\":123"));
    }

    #[test]
    fn test_bill_status_wire_format() {
        // ステータスは小文字でシリアライズされる
        assert_eq!(
            serde_json::to_string(&BillStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&BillStatus::Accepted).unwrap(),
            "\"accepted\""
        );
        assert_eq!(
            serde_json::to_string(&BillStatus::Refused).unwrap(),
            "\"refused\""
        );
    }

    #[test]
    fn test_raw_bill_tolerates_missing_fields() {
        // フィールドが欠けたレコードもデシリアライズできる
        let json = r#"{"date": "2024-01-01", "status": "pending"}"#;
        let raw: RawBill = serde_json::from_str(json).unwrap();

        assert_eq!(raw.date, "2024-01-01");
        assert_eq!(raw.status, "pending");
        assert_eq!(raw.amount, 0);
        assert_eq!(raw.file_url, None);
    }

    #[test]
    fn test_raw_bill_keeps_unknown_status() {
        // 未知のステータスコードも保持される
        let json = r#"{"date": "2024-01-01", "status": "archived"}"#;
        let raw: RawBill = serde_json::from_str(json).unwrap();
        assert_eq!(raw.status, "archived");
    }

    #[test]
    fn test_formatted_bill_from_raw() {
        // 表示用レコードへの変換テスト
        let raw = raw_bill_with_date("2024-01-01");
        let formatted = FormattedBill::from_raw(&raw);

        assert_eq!(formatted.date, "2024年1月1日");
        assert_eq!(formatted.status, "承認待ち");
        assert_eq!(formatted.amount, raw.amount);
        assert_eq!(formatted.name, raw.name);
    }

    #[test]
    fn test_sort_by_date_desc() {
        // 日付の降順ソートテスト
        let mut bills = vec![
            raw_bill_with_date("2021-01-01"),
            raw_bill_with_date("2023-05-30"),
            raw_bill_with_date("2019-12-31"),
        ];

        sort_by_date_desc(&mut bills);

        let dates: Vec<&str> = bills.iter().map(|b| b.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-05-30", "2021-01-01", "2019-12-31"]);
    }
}
