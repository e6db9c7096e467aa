// 経費精算ポータルのクライアント層
//
// 画面ごとのコントローラ（請求書一覧・新規作成）と、ルーティング、
// セッション、リモートストアの契約を提供する。描画はホスト側の
// 実装に委ね、ここでは状態遷移とデータの整形のみを扱う。

pub mod features;
pub mod routing;
pub mod shared;

pub use features::auth::{current_user, InMemorySessionStorage, SessionStorage, SessionUser};
pub use features::bills::{BillDetailView, BillsController};
pub use features::new_bill::{NewBillController, NewBillForm};
pub use routing::{Navigator, RoutePath, Router};
pub use shared::config::environment::{initialize_logging_system, load_environment_variables};
pub use shared::errors::{AppError, AppResult};
pub use shared::store::{RestStore, Store};
