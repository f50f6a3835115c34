//! バックエンドREST APIクライアント
//!
//! レスポンスは`RawResponse`に読み切り、解釈はすべて共通ライブラリに任せる。
//! 通信失敗は`Error::Transport`に変換する。

use recruit_console_common::{
    require_file, patch_target, AnalyticsSummary, CandidatePage, Endpoints, Error, ListQuery,
    Patch, RawResponse, Result, UploadResult,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde_json::Value;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    endpoints: Endpoints,
}

impl BackendClient {
    pub fn new(endpoints: Endpoints, timeout: Duration) -> crate::error::Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// `GET /`
    pub async fn health(&self) -> Result<Value> {
        self.get(&self.endpoints.health()).await?.into_json()
    }

    /// 履歴書をアップロード
    ///
    /// ファイルが存在しなければ通信せずに`Validation`エラー
    pub async fn upload(&self, file: &Path, job_id: &str) -> Result<UploadResult> {
        let file = require_file(Some(file).filter(|f| f.is_file()))?;
        let bytes = tokio::fs::read(file)
            .await
            .map_err(|e| Error::Validation(format!("{}: {}", file.display(), e)))?;
        let file_name = file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "resume".to_string());

        let form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        let url = self.endpoints.upload(job_id);
        debug!(%url, "POST upload");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(transport)?;
        read(response).await.into_upload()
    }

    /// 候補者一覧。形が想定外なら警告ログを出して空一覧
    pub async fn list(&self, query: &ListQuery) -> Result<CandidatePage> {
        let listing = self.get(&self.endpoints.candidates(query)).await?.into_listing()?;
        for warning in &listing.warnings {
            warn!("{}", warning);
        }
        Ok(listing.page)
    }

    /// 候補者詳細（生JSON）
    pub async fn candidate(&self, id: u64) -> Result<Value> {
        self.get(&self.endpoints.candidate(id)).await?.into_json()
    }

    /// status / notes を更新。IDが無効なら何もせず`false`
    pub async fn patch(&self, id: Option<u64>, patch: &Patch) -> Result<bool> {
        let Some(id) = patch_target(id) else {
            debug!("patch skipped: no candidate id");
            return Ok(false);
        };
        let field = patch.field();
        let url = self.endpoints.candidate_field(id, field);
        debug!(%url, %field, "PATCH");

        let response = self
            .http
            .patch(&url)
            .json(&patch.body())
            .send()
            .await
            .map_err(transport)?;
        read(response).await.into_ack(field)?;
        Ok(true)
    }

    /// 集計
    pub async fn summary(&self, job_id: Option<&str>) -> Result<AnalyticsSummary> {
        self.get(&self.endpoints.analytics(job_id)).await?.into_summary()
    }

    async fn get(&self, url: &str) -> Result<RawResponse> {
        debug!(%url, "GET");
        let response = self.http.get(url).send().await.map_err(transport)?;
        Ok(read(response).await)
    }
}

fn transport(e: reqwest::Error) -> Error {
    Error::Transport(e.to_string())
}

/// 本文の読み取りに失敗しても空文字列で続行する
async fn read(response: Response) -> RawResponse {
    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!("failed to read response body: {}", e);
            String::new()
        }
    };
    debug!(status = status.as_u16(), bytes = body.len(), "response");
    RawResponse::new(status.as_u16(), status_text, body)
}
