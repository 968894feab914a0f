pub mod db;
pub mod db_utils;
pub use db::Db;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GroupUser {
    pub chat_id: i64,
    pub user_id: i64,
    pub warnings: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Filter {
    pub chat_id: i64,
    /// Normalized lookup key, see `engine::filters::normalize_key`.
    pub keyword: String,
    /// "text", "sticker" or "photo".
    pub kind: String,
    /// Reply text, or the Telegram file id for media kinds.
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BannedWord {
    pub chat_id: i64,
    pub word: String,
}

/// Per-group settings document. The countdown fields are present together or
/// not at all.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupSettings {
    pub chat_id: i64,
    pub countdown_name: Option<String>,
    /// Target instant as epoch seconds UTC.
    pub target_ts: Option<i64>,
    pub target_display: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BroadcastChat {
    pub chat_id: i64,
    pub chat_kind: String,
    pub title: String,
    /// Epoch seconds of the last interaction.
    pub last_active: i64,
}
