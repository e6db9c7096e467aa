use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// リモートストア（一覧取得・作成・更新）のエラー
    ///
    /// サーバーから受け取ったメッセージをそのまま保持する
    #[error("{0}")]
    Store(String),

    /// バリデーション関連のエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// セッション関連のエラー
    #[error("セッションエラー: {0}")]
    Session(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定エラーなど）
    High,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// # 戻り値
    /// ユーザーに表示可能なエラーメッセージ
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Store(msg) => msg,
            AppError::Validation(msg) => msg,
            AppError::Session(_) => "セッション情報の取得に失敗しました",
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Json(_) => "データ形式の解析でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得
    ///
    /// # 戻り値
    /// エラーの詳細情報（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    ///
    /// # 戻り値
    /// エラーの重要度レベル
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Store(_) => ErrorSeverity::Medium,
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::Session(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Json(_) => ErrorSeverity::Medium,
        }
    }

    /// ストアエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - サーバーから受け取ったエラーメッセージ
    ///
    /// # 戻り値
    /// ストアエラー
    pub fn store<S: Into<String>>(message: S) -> Self {
        AppError::Store(message.into())
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    ///
    /// # 戻り値
    /// バリデーションエラー
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// セッションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - セッションエラーメッセージ
    ///
    /// # 戻り値
    /// セッションエラー
    pub fn session<S: Into<String>>(message: S) -> Self {
        AppError::Session(message.into())
    }

    /// 設定エラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - 設定エラーメッセージ
    ///
    /// # 戻り値
    /// 設定エラー
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}

/// AppErrorからStringへの変換（ホスト側へ文字列で返すため）
impl From<AppError> for String {
    fn from(error: AppError) -> Self {
        error.user_message().to_string()
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;
