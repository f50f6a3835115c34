//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use recruit_console::config::Config;
use recruit_console::error::ConsoleError;
use recruit_console_common::{Error, PatchField, RawResponse};
use tempfile::tempdir;

/// 壊れた設定ファイル
#[test]
fn test_load_invalid_config() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(matches!(err, ConsoleError::JsonParse(_)));
}

/// 不正なオリジン
#[test]
fn test_invalid_api_base() {
    let mut config = Config::default();
    let err = config.set_api_base("ftp://example.com".into()).unwrap_err();
    assert!(matches!(err, ConsoleError::InvalidInput(_)));
    assert_eq!(config.api_base, None);
}

/// 共通エラーはそのままの文言で表示される
#[test]
fn test_common_error_is_transparent() {
    let err: ConsoleError = Error::Validation("Please choose a file.".into()).into();
    assert_eq!(err.to_string(), "Please choose a file.");
}

/// 非JSONのアップロード応答
#[test]
fn test_upload_non_json_response() {
    let raw = RawResponse::new(502, "Bad Gateway", "<html>upstream down</html>");
    let err = raw.into_upload().unwrap_err();

    assert_eq!(
        err.to_string(),
        "Non-JSON response: 502 Bad Gateway <html>upstream down</html>"
    );
}

/// 更新失敗のアラート文言
#[test]
fn test_patch_failure_alert() {
    let raw = RawResponse::new(500, "Internal Server Error", "db locked");
    let err = raw.into_ack(PatchField::Notes).unwrap_err();

    assert_eq!(
        err.alert_message(PatchField::Notes),
        "Failed to update notes: Notes update failed: 500 db locked"
    );
}

/// 本文なしのHTTPエラー
#[test]
fn test_http_error_without_body() {
    let raw = RawResponse::new(404, "Not Found", "");
    let err = raw.into_summary().unwrap_err();
    assert_eq!(err.to_string(), "Fetch failed: 404 Not Found");
}
