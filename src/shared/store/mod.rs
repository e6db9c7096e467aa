// リモート永続化ストアの抽象化
//
// ホスト環境が提供する非同期リソースクライアントの契約を定義する。
// コントローラはこの契約のみに依存し、具体的な実装（RESTサーバーや
// テスト用モック）には依存しない。

pub mod rest;

pub use rest::RestStore;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::features::bills::models::{Bill, RawBill};
use crate::shared::errors::AppResult;

/// 添付ファイルアップロードの入力
#[derive(Debug, Clone)]
pub struct AttachmentUpload {
    /// 添付ファイル名
    pub file_name: String,
    /// ファイルの内容
    pub data: Vec<u8>,
    /// 所有者のメールアドレス
    pub email: String,
}

/// 添付ファイルアップロードの結果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachmentReceipt {
    /// アップロードされたファイルのURL
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    /// 請求書レコードを参照するための不透明なキー
    pub key: String,
}

/// 請求書リソースへのアクセサ
///
/// # 操作
/// * `list` - 請求書一覧の取得
/// * `create` - 添付ファイルのアップロード（請求書レコードの作成）
/// * `update` - 請求書レコードの更新
#[async_trait]
pub trait BillsAccessor: Send + Sync {
    /// 請求書一覧を取得する
    async fn list(&self) -> AppResult<Vec<RawBill>>;

    /// 添付ファイルをアップロードし、レコードの参照キーを返す
    async fn create(&self, upload: AttachmentUpload) -> AppResult<AttachmentReceipt>;

    /// 請求書レコードを更新する
    ///
    /// # 引数
    /// * `bill` - 永続化する請求書
    /// * `selector` - 更新対象レコードの参照キー（未取得の場合はNone）
    async fn update(&self, bill: &Bill, selector: Option<&str>) -> AppResult<()>;
}

/// リモートストアの契約
///
/// エンティティ種別ごとのアクセサを公開する
pub trait Store: Send + Sync {
    /// 請求書リソースへのアクセサを取得する
    fn bills(&self) -> &dyn BillsAccessor;
}
