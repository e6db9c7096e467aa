// ルーティング
//
// 論理ルート識別子とビューのマウント処理の対応付けを管理する。
// コントローラはNavigatorトレイト経由でのみ画面遷移を行う。

use log::{info, warn};
use std::collections::HashMap;

/// 画面遷移先を表す論理ルート識別子
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoutePath {
    /// ログイン画面
    Login,
    /// 請求書一覧画面
    Bills,
    /// 新規請求書作成画面
    NewBill,
}

impl RoutePath {
    /// ルートの固定パス文字列を取得する
    ///
    /// # 戻り値
    /// ルートに対応するパス文字列
    pub fn path(&self) -> &'static str {
        match self {
            RoutePath::Login => "/",
            RoutePath::Bills => "#employee/bills",
            RoutePath::NewBill => "#employee/bill/new",
        }
    }

    /// パス文字列からルートを解決する
    ///
    /// # 引数
    /// * `path` - パス文字列
    ///
    /// # 戻り値
    /// 対応するルート、または未知のパスの場合はNone
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/" => Some(RoutePath::Login),
            "#employee/bills" => Some(RoutePath::Bills),
            "#employee/bill/new" => Some(RoutePath::NewBill),
            _ => None,
        }
    }
}

/// 画面遷移の契約
///
/// 同期的に副作用（対応するビューのマウント）を起こす
pub trait Navigator: Send + Sync {
    /// 指定されたルートへ遷移する
    fn navigate(&self, route: RoutePath);
}

/// ルートに対応するビューのマウント処理
pub type MountAction = Box<dyn Fn() + Send + Sync>;

/// ルートとマウント処理の対応表を保持するルーター
#[derive(Default)]
pub struct Router {
    routes: HashMap<RoutePath, MountAction>,
}

impl Router {
    /// 空のルーターを作成する
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// ルートにマウント処理を登録する
    ///
    /// # 引数
    /// * `route` - ルート識別子
    /// * `action` - ビューのマウント処理
    pub fn register(&mut self, route: RoutePath, action: MountAction) {
        self.routes.insert(route, action);
    }
}

impl Navigator for Router {
    fn navigate(&self, route: RoutePath) {
        info!("画面遷移: route={}", route.path());

        match self.routes.get(&route) {
            Some(mount) => mount(),
            None => warn!("未登録のルートです: route={}", route.path()),
        }
    }
}
