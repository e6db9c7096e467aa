// 請求書一覧画面のコントローラ

use log::{error, info};
use std::sync::Arc;

use crate::features::bills::models::{FormattedBill, RawBill};
use crate::routing::{Navigator, RoutePath};
use crate::shared::errors::AppResult;
use crate::shared::store::Store;

/// 請求書詳細の表示を担当するコラボレータ
///
/// モーダル表示などの具体的な描画はホスト側の実装に委ねる
pub trait BillDetailView: Send + Sync {
    /// 請求書の添付ファイルを表示する
    ///
    /// # 引数
    /// * `file_url` - 添付ファイルのURL（未添付の場合はNone）
    fn show_bill(&self, file_url: Option<&str>);
}

/// 請求書一覧画面のコントローラ
///
/// ストアから請求書一覧を取得して表示用に整形し、
/// 各行の操作ハンドラを公開する
pub struct BillsController {
    store: Option<Arc<dyn Store>>,
    navigator: Arc<dyn Navigator>,
    detail_view: Option<Arc<dyn BillDetailView>>,
}

impl BillsController {
    /// 新しいコントローラを作成
    ///
    /// # 引数
    /// * `store` - リモートストア（未設定の場合はNone）
    /// * `navigator` - 画面遷移
    /// * `detail_view` - 請求書詳細の表示先（任意）
    pub fn new(
        store: Option<Arc<dyn Store>>,
        navigator: Arc<dyn Navigator>,
        detail_view: Option<Arc<dyn BillDetailView>>,
    ) -> Self {
        Self {
            store,
            navigator,
            detail_view,
        }
    }

    /// 請求書一覧を取得し、表示用に整形する
    ///
    /// # 戻り値
    /// * ストアが未設定の場合はNone（データソースなし、エラーではない）
    /// * 取得成功時は整形済み一覧（取得順のまま、件数も一致）
    /// * 取得失敗時はストアのエラーメッセージをそのまま保持したエラー
    pub async fn get_bills(&self) -> Option<AppResult<Vec<FormattedBill>>> {
        let store = self.store.as_ref()?;

        match store.bills().list().await {
            Ok(raw_bills) => {
                info!("請求書一覧を取得しました: count={}", raw_bills.len());
                let formatted = raw_bills.iter().map(FormattedBill::from_raw).collect();
                Some(Ok(formatted))
            }
            Err(e) => {
                // エラーは握りつぶさず、ログに残した上で呼び出し側へ伝播する
                error!("請求書一覧の取得に失敗しました: {e}");
                Some(Err(e))
            }
        }
    }

    /// 請求書の詳細表示アイコンのクリックを処理する
    ///
    /// # 引数
    /// * `bill` - クリックされた行のレコード
    pub fn handle_click_icon_eye(&self, bill: &RawBill) {
        if let Some(view) = &self.detail_view {
            view.show_bill(bill.file_url.as_deref());
        }
    }

    /// 新規請求書作成ボタンのクリックを処理する
    ///
    /// 常に新規作成ルートへ一度だけ遷移する
    pub fn handle_click_new_bill(&self) {
        self.navigator.navigate(RoutePath::NewBill);
    }
}
