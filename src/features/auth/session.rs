// セッション情報への読み取り専用アクセス
//
// ログインフロー自体はホスト環境の責務であり、ここでは永続化された
// セッションレコードの読み取りのみを扱う。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::shared::errors::{AppError, AppResult};

/// セッションレコードを保存するキー
const USER_KEY: &str = "user";

/// セッションに記録されたユーザー情報
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    /// ユーザー種別（Employee / Admin）
    #[serde(rename = "type")]
    pub user_type: String,
    /// ユーザーのメールアドレス
    #[serde(default)]
    pub email: String,
}

/// 永続化されたキーバリューストアへの読み取りアクセス契約
pub trait SessionStorage: Send + Sync {
    /// キーに対応する値を取得する
    ///
    /// # 引数
    /// * `key` - 取得するキー
    ///
    /// # 戻り値
    /// 保存されている値、または存在しない場合はNone
    fn get_item(&self, key: &str) -> Option<String>;
}

/// 現在のセッションユーザーを取得する
///
/// # 引数
/// * `session` - セッションストレージ
///
/// # 戻り値
/// セッションに記録されたユーザー情報、または取得失敗時はエラー
pub fn current_user(session: &dyn SessionStorage) -> AppResult<SessionUser> {
    let raw = session
        .get_item(USER_KEY)
        .ok_or_else(|| AppError::session("ユーザー情報が保存されていません"))?;

    let user: SessionUser = serde_json::from_str(&raw)?;
    Ok(user)
}

/// メモリ上のセッションストレージ
///
/// ホスト環境がストレージを提供しない場合やテストで使用する
#[derive(Default)]
pub struct InMemorySessionStorage {
    items: Mutex<HashMap<String, String>>,
}

impl InMemorySessionStorage {
    /// 空のストレージを作成する
    pub fn new() -> Self {
        Self::default()
    }

    /// 値を保存する
    ///
    /// # 引数
    /// * `key` - 保存先のキー
    /// * `value` - 保存する値
    pub fn set_item(&self, key: &str, value: &str) {
        let mut items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.insert(key.to_string(), value.to_string());
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        let items = self.items.lock().unwrap_or_else(|e| e.into_inner());
        items.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_from_session() {
        // セッションからユーザー情報を取得するテスト
        let storage = InMemorySessionStorage::new();
        storage.set_item(
            "user",
            r#"{"type": "Employee", "email": "employee@test.tld"}"#,
        );

        let user = current_user(&storage).unwrap();
        assert_eq!(user.user_type, "Employee");
        assert_eq!(user.email, "employee@test.tld");
    }

    #[test]
    fn test_current_user_missing_record() {
        // レコードが存在しない場合はセッションエラー
        let storage = InMemorySessionStorage::new();

        let result = current_user(&storage);
        assert!(matches!(result, Err(AppError::Session(_))));
    }

    #[test]
    fn test_current_user_malformed_json() {
        // 不正なJSONの場合は解析エラー
        let storage = InMemorySessionStorage::new();
        storage.set_item("user", "不正なJSON");

        let result = current_user(&storage);
        assert!(matches!(result, Err(AppError::Json(_))));
    }

    #[test]
    fn test_current_user_without_email() {
        // emailフィールドなしのレコードは空文字列として扱う
        let storage = InMemorySessionStorage::new();
        storage.set_item("user", r#"{"type": "Employee"}"#);

        let user = current_user(&storage).unwrap();
        assert_eq!(user.email, "");
    }
}
