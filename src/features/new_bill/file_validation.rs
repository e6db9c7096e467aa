// 添付ファイルの検証
//
// 拡張子の判定はクライアント側で即座に行い、受理されたファイルのみが
// アップロードの対象になる。

use log::debug;

/// 拒否時に表示する固定メッセージ
pub const REJECTION_MESSAGE: &str =
    "This file is not supported, please upload a JPG, JPEG or PNG file.";

/// 検証メッセージの表示トーン
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageTone {
    /// 受理（肯定的な色で表示）
    Success,
    /// 拒否（警告色で表示）
    Warning,
}

/// ユーザーへ表示する検証メッセージ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationMessage {
    /// メッセージ本文
    pub text: String,
    /// 表示トーン
    pub tone: MessageTone,
}

/// ファイル検証の状態
///
/// ファイル選択のたびに前回のメッセージが消去され、Idleを経由して
/// AcceptedまたはRejectedへ遷移する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationState {
    /// 未検証（ファイル未選択、または前回のメッセージ消去後）
    Idle,
    /// 受理済み
    Accepted,
    /// 拒否済み
    Rejected,
}

/// 検証結果の通知先
///
/// DOMカスタムイベントの代わりに、明示的なコールバックで
/// 外部のオブザーバへ受理・拒否を通知する
pub trait FileValidationObserver: Send + Sync {
    /// ファイルが受理されたときに呼ばれる
    ///
    /// # 引数
    /// * `file_name` - 受理されたファイル名
    fn on_file_accepted(&self, file_name: &str);

    /// ファイルが拒否されたときに呼ばれる
    fn on_file_rejected(&self);
}

/// ファイル名の検証結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileValidation {
    /// 受理（アップロード対象）
    Accepted {
        /// 受理されたファイル名
        file_name: String,
        /// 表示メッセージ
        message: ValidationMessage,
    },
    /// 拒否（アップロードは行わない）
    Rejected {
        /// 表示メッセージ
        message: ValidationMessage,
    },
}

impl FileValidation {
    /// 表示メッセージを取得する
    pub fn message(&self) -> &ValidationMessage {
        match self {
            FileValidation::Accepted { message, .. } => message,
            FileValidation::Rejected { message } => message,
        }
    }
}

/// ファイル名から拡張子を取り出す
///
/// # 引数
/// * `file_name` - ファイル名
///
/// # 戻り値
/// 最後のドット以降を小文字化した拡張子
fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// ファイル名を検証する
///
/// # 引数
/// * `file_name` - 選択されたファイル名
///
/// # 戻り値
/// 受理または拒否の検証結果
///
/// # 判定規則
/// 拡張子がjpg・jpeg・pngのいずれか（大文字小文字を区別しない）の
/// 場合のみ受理する。それ以外はすべて拒否となり、PDFも例外ではない
pub fn validate_file_name(file_name: &str) -> FileValidation {
    let extension = file_extension(file_name);

    match extension.as_str() {
        "jpg" | "jpeg" | "png" => FileValidation::Accepted {
            file_name: file_name.to_string(),
            message: ValidationMessage {
                text: format!("{file_name} uploaded successfully."),
                tone: MessageTone::Success,
            },
        },
        "pdf" => {
            // PDFは添付として選ばれやすいため個別に識別するが、結果は他の拒否と同じ
            debug!("PDFファイルが選択されました: filename={file_name}");
            rejected()
        }
        _ => rejected(),
    }
}

fn rejected() -> FileValidation {
    FileValidation::Rejected {
        message: ValidationMessage {
            text: REJECTION_MESSAGE.to_string(),
            tone: MessageTone::Warning,
        },
    }
}
