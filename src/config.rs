use crate::error::{ConsoleError, Result};
use recruit_console_common::{DEFAULT_API_BASE, DEFAULT_JOB_ID, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// バックエンドオリジンを上書きする環境変数
pub const API_BASE_ENV: &str = "RECRUIT_API_BASE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_base: Option<String>,
    pub page_size: u64,
    pub default_job_id: String,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: None,
            page_size: DEFAULT_PAGE_SIZE,
            default_job_id: DEFAULT_JOB_ID.into(),
            timeout_seconds: 120,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// ファイルがなければ既定値
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConsoleError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("recruit-console").join("config.json"))
    }

    /// 優先順位: 引数 > 環境変数 > 設定ファイル > 既定値
    pub fn resolve_api_base(&self, flag: Option<&str>) -> String {
        let env = std::env::var(API_BASE_ENV).ok();
        pick_api_base(flag, env.as_deref(), self.api_base.as_deref())
    }

    pub fn set_api_base(&mut self, base: String) -> Result<()> {
        let trimmed = base.trim();
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConsoleError::InvalidInput(format!(
                "APIオリジンは http:// または https:// で始めてください: {}",
                base
            )));
        }
        self.api_base = Some(trimmed.trim_end_matches('/').to_string());
        Ok(())
    }

    pub fn set_page_size(&mut self, page_size: u64) -> Result<()> {
        if page_size == 0 || page_size > 500 {
            return Err(ConsoleError::InvalidInput(format!(
                "ページサイズは1〜500で指定してください: {}",
                page_size
            )));
        }
        self.page_size = page_size;
        Ok(())
    }
}

fn pick_api_base(flag: Option<&str>, env: Option<&str>, file: Option<&str>) -> String {
    [flag, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE)
        .to_string()
}
