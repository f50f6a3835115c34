use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("入力エラー: {0}")]
    InvalidInput(String),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("対話入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Common(#[from] recruit_console_common::Error),
}

pub type Result<T> = std::result::Result<T, ConsoleError>;
