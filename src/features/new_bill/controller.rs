// 新規請求書作成画面のコントローラ

use log::{error, info, warn};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::features::auth::{current_user, SessionStorage};
use crate::features::bills::models::{Bill, BillStatus};
use crate::features::new_bill::file_validation::{
    validate_file_name, FileValidation, FileValidationObserver, ValidationMessage, ValidationState,
};
use crate::features::new_bill::models::NewBillForm;
use crate::routing::{Navigator, RoutePath};
use crate::shared::store::{AttachmentUpload, Store};
use crate::shared::utils::parse_int_prefix;

/// 新規請求書作成画面のコントローラ
///
/// ファイル選択時の検証とアップロード、フォーム提出時の請求書組み立てと
/// 保存を担当する。アップロード成功時の添付情報（fileUrl・fileName・key）は
/// コントローラが保持し、提出時の請求書へ引き継がれる
pub struct NewBillController {
    store: Option<Arc<dyn Store>>,
    navigator: Arc<dyn Navigator>,
    session: Arc<dyn SessionStorage>,
    observer: Option<Arc<dyn FileValidationObserver>>,
    state: ValidationState,
    message: Option<ValidationMessage>,
    file_url: Option<String>,
    file_name: Option<String>,
    bill_id: Option<String>,
}

impl NewBillController {
    /// 新しいコントローラを作成
    ///
    /// # 引数
    /// * `store` - リモートストア（未設定の場合はNone）
    /// * `navigator` - 画面遷移
    /// * `session` - セッションストレージ（ログイン中ユーザーの取得元）
    pub fn new(
        store: Option<Arc<dyn Store>>,
        navigator: Arc<dyn Navigator>,
        session: Arc<dyn SessionStorage>,
    ) -> Self {
        Self {
            store,
            navigator,
            session,
            observer: None,
            state: ValidationState::Idle,
            message: None,
            file_url: None,
            file_name: None,
            bill_id: None,
        }
    }

    /// 検証結果の通知先を設定する
    pub fn with_observer(mut self, observer: Arc<dyn FileValidationObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// 現在の検証状態
    pub fn state(&self) -> ValidationState {
        self.state
    }

    /// 現在表示中の検証メッセージ
    pub fn message(&self) -> Option<&ValidationMessage> {
        self.message.as_ref()
    }

    /// アップロード済み添付ファイルのURL
    pub fn file_url(&self) -> Option<&str> {
        self.file_url.as_deref()
    }

    /// アップロード済み添付ファイル名
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// アップロードで払い出されたレコードキー
    pub fn bill_id(&self) -> Option<&str> {
        self.bill_id.as_deref()
    }

    /// ファイル選択を処理する
    ///
    /// # 引数
    /// * `file_name` - 選択されたファイル名
    /// * `content` - ファイルの内容
    ///
    /// # 戻り値
    /// 表示用の検証メッセージ
    ///
    /// # 動作
    /// 選択のたびに前回のメッセージを消去してから検証する。受理された
    /// 場合のみアップロードを行い、拒否された場合はアップロードしない
    pub async fn handle_change_file(
        &mut self,
        file_name: &str,
        content: &[u8],
    ) -> ValidationMessage {
        // 前回の検証メッセージを消去する
        self.message = None;
        self.state = ValidationState::Idle;

        match validate_file_name(file_name) {
            FileValidation::Accepted { file_name, message } => {
                self.state = ValidationState::Accepted;
                self.message = Some(message.clone());
                if let Some(observer) = &self.observer {
                    observer.on_file_accepted(&file_name);
                }
                self.upload_attachment(&file_name, content).await;
                message
            }
            FileValidation::Rejected { message } => {
                self.state = ValidationState::Rejected;
                self.message = Some(message.clone());
                if let Some(observer) = &self.observer {
                    observer.on_file_rejected();
                }
                message
            }
        }
    }

    /// 受理済みファイルをストアへアップロードする
    ///
    /// 成功時はfileUrl・fileName・keyを保持する。失敗時はログに残し、
    /// 添付情報は未設定のまま残す
    async fn upload_attachment(&mut self, file_name: &str, content: &[u8]) {
        let Some(store) = &self.store else {
            return;
        };

        let email = match current_user(self.session.as_ref()) {
            Ok(user) => user.email,
            Err(e) => {
                // ユーザー情報が取れない場合はアップロードを見送る
                warn!("セッションからユーザー情報を取得できません: {e}");
                return;
            }
        };

        let upload = AttachmentUpload {
            file_name: file_name.to_string(),
            data: content.to_vec(),
            email,
        };

        match store.bills().create(upload).await {
            Ok(receipt) => {
                info!("添付ファイルをアップロードしました: key={}", receipt.key);
                self.bill_id = Some(receipt.key);
                self.file_url = Some(receipt.file_url);
                self.file_name = Some(file_name.to_string());
            }
            Err(e) => {
                // 失敗時はfileUrl・fileNameを未設定のまま残す
                error!("添付ファイルのアップロードに失敗しました: {}", e.details());
            }
        }
    }

    /// フォーム提出を処理する
    ///
    /// # 引数
    /// * `form` - フォームの入力値
    ///
    /// # 戻り値
    /// 保存タスクのハンドル（ストア未設定の場合はNone）
    ///
    /// # 動作
    /// フォーム入力とアップロード済み添付情報から請求書を組み立てて
    /// 保存を開始し、完了を待たずに一覧へ遷移する
    pub fn handle_submit(&self, form: &NewBillForm) -> Option<JoinHandle<()>> {
        let email = match current_user(self.session.as_ref()) {
            Ok(user) => user.email,
            Err(e) => {
                // ユーザー不明でも提出は継続する（所有者は空のまま）
                warn!("セッションからユーザー情報を取得できません: {e}");
                String::new()
            }
        };

        let amount = parse_int_prefix(&form.amount).unwrap_or_else(|| {
            warn!("金額を数値として解釈できません: amount={}", form.amount);
            0
        });
        // 税率は未入力・解釈不能の場合のみ既定値20になる
        let pct = parse_int_prefix(&form.pct).unwrap_or(20);

        let bill = Bill {
            email,
            bill_type: form.bill_type.clone(),
            name: form.name.clone(),
            amount,
            date: form.date.clone(),
            vat: form.vat.clone(),
            pct,
            commentary: form.commentary.clone(),
            file_url: self.file_url.clone(),
            file_name: self.file_name.clone(),
            status: BillStatus::Pending,
        };

        let handle = self.update_bill(bill);

        // 楽観的ナビゲーション: 保存の完了を待たずに一覧へ戻る
        self.navigator.navigate(RoutePath::Bills);

        handle
    }

    /// 請求書の保存を開始する
    ///
    /// # 引数
    /// * `bill` - 保存する請求書
    ///
    /// # 戻り値
    /// 保存タスクのハンドル（ストア未設定の場合はNone）
    pub fn update_bill(&self, bill: Bill) -> Option<JoinHandle<()>> {
        let store = Arc::clone(self.store.as_ref()?);
        let navigator = Arc::clone(&self.navigator);
        let selector = self.bill_id.clone();

        Some(tokio::spawn(async move {
            match store.bills().update(&bill, selector.as_deref()).await {
                Ok(()) => {
                    info!("請求書を保存しました");
                    navigator.navigate(RoutePath::Bills);
                }
                Err(e) => {
                    error!("請求書の保存に失敗しました: {}", e.details());
                }
            }
        }))
    }
}
