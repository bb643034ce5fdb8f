pub mod category;
pub mod view;

pub use category::{Category, UnknownCategory};
pub use view::{UnknownView, View};

/// 行情資料的結構化內容，快取層視為不透明資料
pub type MarketData = serde_json::Value;
