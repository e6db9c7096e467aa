use crate::shared::config::environment::ApiConfig;
/// 汎用APIクライアント
///
/// 経費精算ポータルのAPIサーバーとの通信を行う汎用的なクライアント
/// 請求書一覧・添付ファイルアップロード・請求書更新の各エンドポイントで使用する
use crate::shared::errors::AppError;
use log::{debug, info, warn};
use reqwest::{multipart, Client, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    #[serde(rename = "requestId")]
    pub request_id: Option<String>,
}

/// 汎用APIクライアント
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 新しいAPIクライアントを作成
    pub fn new() -> Result<Self, AppError> {
        let config = ApiConfig::from_env();
        Self::new_with_config(config)
    }

    /// 設定を指定してAPIクライアントを作成
    pub fn new_with_config(config: ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str, auth_token: Option<&str>) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("GETリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self.client.get(&url);

        // 認証トークンがある場合は追加
        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        self.send_request_with_retry(request, "GET", endpoint).await
    }

    /// PUTリクエストを送信
    pub async fn put<B, T>(
        &self,
        endpoint: &str,
        body: &B,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        info!("PUTリクエスト送信: endpoint={endpoint}");

        let url = format!("{}{endpoint}", self.config.base_url);
        let mut request = self.client.put(&url).json(body);

        // 認証トークンがある場合は追加
        if let Some(token) = auth_token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        self.send_request_with_retry(request, "PUT", endpoint).await
    }

    /// 添付ファイルをマルチパートでアップロード
    ///
    /// # 引数
    /// * `endpoint` - アップロード先エンドポイント
    /// * `file_name` - 添付ファイル名
    /// * `file_data` - ファイルの内容
    /// * `email` - 所有者のメールアドレス
    /// * `auth_token` - 認証トークン（任意）
    ///
    /// # 戻り値
    /// アップロード結果のレスポンス
    pub async fn upload_multipart<T>(
        &self,
        endpoint: &str,
        file_name: &str,
        file_data: Vec<u8>,
        email: &str,
        auth_token: Option<&str>,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        info!("添付ファイルアップロード開始: filename={file_name}");

        let url = format!("{}{endpoint}", self.config.base_url);

        // リトライ機能付きでリクエスト送信
        let mut attempts = 0;
        loop {
            // マルチパートフォームデータを構築（リトライごとに再作成）
            // ファイルパートにはContent-Typeを設定しない（サーバー側で判定される）
            let form = multipart::Form::new()
                .part(
                    "file",
                    multipart::Part::bytes(file_data.clone()).file_name(file_name.to_string()),
                )
                .text("email", email.to_string());

            let mut request = self.client.post(&url).multipart(form);
            if let Some(token) = auth_token {
                request = request.header("Authorization", format!("Bearer {token}"));
            }

            match request.send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        let result: T = response.json().await.map_err(|e| {
                            AppError::Store(format!("レスポンス解析エラー: {e}"))
                        })?;

                        info!("添付ファイルアップロード成功: filename={file_name}");
                        return Ok(result);
                    } else {
                        let error_response = self.handle_error_response(response).await?;
                        return Err(AppError::Store(error_response.error.message));
                    }
                }
                Err(e) => {
                    if attempts < self.config.max_retries {
                        attempts += 1;
                        let delay = Duration::from_secs(2_u64.pow(attempts));
                        warn!(
                            "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                            self.config.max_retries
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    } else {
                        return Err(AppError::Store(format!(
                            "APIサーバーへの接続に失敗しました: {e}"
                        )));
                    }
                }
            }
        }
    }

    /// リトライ機能付きでリクエストを送信
    async fn send_request_with_retry<T>(
        &self,
        request: reqwest::RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let mut attempts = 0;
        loop {
            match request.try_clone() {
                Some(cloned_request) => match cloned_request.send().await {
                    Ok(response) => {
                        if response.status().is_success() {
                            let result: T = response.json().await.map_err(|e| {
                                AppError::Store(format!("レスポンス解析エラー: {e}"))
                            })?;

                            info!("{method}リクエスト成功: endpoint={endpoint}");
                            return Ok(result);
                        } else {
                            let error_response = self.handle_error_response(response).await?;
                            return Err(AppError::Store(error_response.error.message));
                        }
                    }
                    Err(e) => {
                        if attempts < self.config.max_retries {
                            attempts += 1;
                            let delay = Duration::from_secs(2_u64.pow(attempts));
                            warn!(
                                "APIリクエスト失敗、リトライします: attempt={attempts}/{}, delay={delay:?}",
                                self.config.max_retries
                            );
                            tokio::time::sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::Store(format!(
                                "APIサーバーへの接続に失敗しました: {e}"
                            )));
                        }
                    }
                },
                None => {
                    return Err(AppError::Store(
                        "リクエストのクローンに失敗しました".to_string(),
                    ));
                }
            }
        }
    }

    /// エラーレスポンスを処理し、詳細なエラー情報を提供
    ///
    /// 構造化エラーレスポンスのmessageはそのまま保持する。
    /// 非構造化レスポンスはHTTPステータスから "Erreur <status>" 形式のメッセージを組み立てる
    async fn handle_error_response(&self, response: Response) -> Result<ErrorResponse, AppError> {
        let status = response.status();
        let status_code = status.as_u16();

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        // JSONエラーレスポンスの解析を試行
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
            // APIサーバーからの構造化エラーレスポンス
            debug!(
                "APIサーバーから構造化エラーレスポンスを受信: code={}, message={}",
                error_response.error.code, error_response.error.message
            );
            Ok(error_response)
        } else {
            // JSONでない場合はステータスコードからエラーレスポンスを作成
            warn!(
                "APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}"
            );

            Ok(ErrorResponse {
                error: ErrorDetail {
                    code: format!("HTTP_{status_code}"),
                    message: format!("Erreur {status_code}"),
                    details: Some(serde_json::json!({
                        "http_status": status_code,
                        "raw_response": response_text,
                    })),
                    request_id: None,
                },
            })
        }
    }
}
