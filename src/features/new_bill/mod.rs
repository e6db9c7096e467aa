/// 新規請求書作成機能のモジュール
pub mod controller;
pub mod file_validation;
pub mod models;

pub use controller::NewBillController;
pub use file_validation::{
    validate_file_name, FileValidation, FileValidationObserver, MessageTone, ValidationMessage,
    ValidationState, REJECTION_MESSAGE,
};
pub use models::NewBillForm;
