/// 請求書一覧機能のモジュール
pub mod controller;
pub mod models;

pub use controller::{BillDetailView, BillsController};
pub use models::{sort_by_date_desc, Bill, BillStatus, FormattedBill, RawBill};
