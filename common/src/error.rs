//! エラー型定義
//!
//! 画面・CLIに表示するメッセージはここの`Display`がそのまま使われる

use thiserror::Error;

/// PATCH対象フィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchField {
    Status,
    Notes,
}

impl PatchField {
    /// URLパス・JSONキーとして使う名前
    pub fn as_str(&self) -> &'static str {
        match self {
            PatchField::Status => "status",
            PatchField::Notes => "notes",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            PatchField::Status => "Status",
            PatchField::Notes => "Notes",
        }
    }
}

impl std::fmt::Display for PatchField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// 入力不備（通信前に検出）
    #[error("{0}")]
    Validation(String),

    /// 通信そのものの失敗
    #[error("Request failed: {0}")]
    Transport(String),

    /// 2xx以外のステータス
    #[error("Fetch failed: {status} {status_text}{}", body_suffix(.body))]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// JSONとして読めないレスポンス
    #[error("Non-JSON response: {status} {status_text} {body}")]
    NonJson {
        status: u16,
        status_text: String,
        body: String,
    },

    /// アップロードがエラーペイロード付きで拒否された
    #[error("{status} {status_text}\n{payload}")]
    Rejected {
        status: u16,
        status_text: String,
        payload: String,
    },

    #[error("{} update failed: {status} {body}", .field.title())]
    PatchFailed {
        field: PatchField,
        status: u16,
        body: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

fn body_suffix(body: &str) -> String {
    if body.is_empty() {
        String::new()
    } else {
        format!(" | body: {}", body)
    }
}

impl Error {
    /// PATCH失敗時のアラート文言
    pub fn alert_message(&self, field: PatchField) -> String {
        format!("Failed to update {}: {}", field, self)
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
