//! バックエンドREST呼び出し（fetch）
//!
//! レスポンスは本文まで読み切って`RawResponse`にし、解釈は共通ライブラリに任せる。
//! fetch自体の失敗は`Error::Transport`。

use recruit_console_common::{
    patch_target, require_file, AnalyticsSummary, Endpoints, Error, ListQuery, Listing, Patch,
    RawResponse, Result, UploadResult, DEFAULT_API_BASE,
};
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, Request, RequestInit, RequestMode, Response};

/// ビルド時に`RECRUIT_API_BASE`で上書きできる
pub fn api_base() -> &'static str {
    option_env!("RECRUIT_API_BASE").unwrap_or(DEFAULT_API_BASE)
}

pub fn endpoints() -> Endpoints {
    Endpoints::new(api_base())
}

/// `GET {base}/`
pub async fn health() -> Result<Value> {
    get(&endpoints().health()).await?.into_json()
}

/// 履歴書アップロード（multipartの`file`フィールド、ジョブIDはクエリ）
pub async fn upload(file: Option<File>, job_id: &str) -> Result<UploadResult> {
    let file = require_file(file)?;

    let form = FormData::new().map_err(transport)?;
    form.append_with_blob_and_filename("file", &file, &file.name())
        .map_err(transport)?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&form);

    let request = Request::new_with_str_and_init(&endpoints().upload(job_id), &opts)
        .map_err(transport)?;
    send(request).await?.into_upload()
}

pub async fn list(query: &ListQuery) -> Result<Listing> {
    get(&endpoints().candidates(query)).await?.into_listing()
}

/// status/notesの部分更新。IDが無効なら通信せず`Ok(false)`
pub async fn patch(id: Option<u64>, patch: &Patch) -> Result<bool> {
    let Some(id) = patch_target(id) else {
        return Ok(false);
    };

    let body = patch.body().to_string();
    let opts = RequestInit::new();
    opts.set_method("PATCH");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(&body));

    let url = endpoints().candidate_field(id, patch.field());
    let request = Request::new_with_str_and_init(&url, &opts).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    send(request).await?.into_ack(patch.field())?;
    Ok(true)
}

pub async fn summary(job_id: Option<&str>) -> Result<AnalyticsSummary> {
    get(&endpoints().analytics(job_id)).await?.into_summary()
}

/// 候補者の生JSONを新しいタブで開く
pub fn open_candidate_json(id: u64) {
    let url = endpoints().candidate(id);
    if let Some(window) = web_sys::window() {
        if window.open_with_url_and_target(&url, "_blank").is_err() {
            gloo::console::warn!(format!("could not open {}", url));
        }
    }
}

async fn get(url: &str) -> Result<RawResponse> {
    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::Cors);

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
    send(request).await
}

async fn send(request: Request) -> Result<RawResponse> {
    let window = web_sys::window().ok_or_else(|| Error::Transport("no window".into()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(transport)?;

    // 本文が読めなくてもステータスは返す
    let body = match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };

    Ok(RawResponse::new(resp.status(), resp.status_text(), body))
}

fn transport(e: JsValue) -> Error {
    let reason = e
        .dyn_ref::<js_sys::Error>()
        .map(|err| String::from(err.message()))
        .or_else(|| e.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    Error::Transport(reason)
}
