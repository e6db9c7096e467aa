// APIサーバーを介したストア契約の実装

use async_trait::async_trait;
use log::info;

use crate::features::bills::models::{Bill, RawBill};
use crate::shared::api_client::ApiClient;
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppResult;
use crate::shared::store::{AttachmentReceipt, AttachmentUpload, BillsAccessor, Store};

/// 請求書エンドポイントのパス
const BILLS_ENDPOINT: &str = "/api/v1/bills";

/// APIサーバーを利用するリモートストア
pub struct RestStore {
    bills: RestBillsAccessor,
}

impl RestStore {
    /// 環境変数の設定から新しいストアを作成
    pub fn new() -> AppResult<Self> {
        Self::new_with_config(ApiConfig::from_env(), None)
    }

    /// 設定と認証トークンを指定してストアを作成
    ///
    /// # 引数
    /// * `config` - API設定
    /// * `auth_token` - 認証トークン（任意）
    pub fn new_with_config(config: ApiConfig, auth_token: Option<String>) -> AppResult<Self> {
        let client = ApiClient::new_with_config(config)?;
        Ok(Self {
            bills: RestBillsAccessor { client, auth_token },
        })
    }
}

impl Store for RestStore {
    fn bills(&self) -> &dyn BillsAccessor {
        &self.bills
    }
}

/// 請求書エンドポイントへのアクセサ
struct RestBillsAccessor {
    client: ApiClient,
    auth_token: Option<String>,
}

#[async_trait]
impl BillsAccessor for RestBillsAccessor {
    async fn list(&self) -> AppResult<Vec<RawBill>> {
        info!("請求書一覧を取得します");
        self.client
            .get(BILLS_ENDPOINT, self.auth_token.as_deref())
            .await
    }

    async fn create(&self, upload: AttachmentUpload) -> AppResult<AttachmentReceipt> {
        info!("添付ファイルをアップロードします: filename={}", upload.file_name);
        self.client
            .upload_multipart(
                BILLS_ENDPOINT,
                &upload.file_name,
                upload.data,
                &upload.email,
                self.auth_token.as_deref(),
            )
            .await
    }

    async fn update(&self, bill: &Bill, selector: Option<&str>) -> AppResult<()> {
        let endpoint = match selector {
            Some(key) => format!("{BILLS_ENDPOINT}/{key}"),
            None => BILLS_ENDPOINT.to_string(),
        };
        info!("請求書を更新します: endpoint={endpoint}");

        // 更新後のレコードが返されるが、呼び出し側では使用しない
        let _: serde_json::Value = self
            .client
            .put(&endpoint, bill, self.auth_token.as_deref())
            .await?;
        Ok(())
    }
}
