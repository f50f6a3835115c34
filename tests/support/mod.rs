//! テスト用の疑似バックエンド
//!
//! 一覧・詳細・PATCH・集計・アップロードをメモリ上で再現する。
//! `hits` は受け付けたリクエスト数。

#![allow(dead_code)]

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use recruit_console::client::BackendClient;
use recruit_console_common::Endpoints;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
pub struct FakeBackend {
    pub candidates: Mutex<Vec<Value>>,
    pub hits: AtomicUsize,
    /// 設定されていればこのレスポンスを一覧・集計で返す
    pub override_body: Mutex<Option<(u16, String)>>,
}

impl FakeBackend {
    pub fn with_candidates(candidates: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            candidates: Mutex::new(candidates),
            ..Default::default()
        })
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn respond_with(&self, status: u16, body: &str) {
        *self.override_body.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn candidate(&self, id: u64) -> Option<Value> {
        self.candidates
            .lock()
            .unwrap()
            .iter()
            .find(|c| c["_id"] == json!(id))
            .cloned()
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn overridden(&self) -> Option<Response> {
        self.override_body.lock().unwrap().clone().map(|(status, body)| {
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, body).into_response()
        })
    }
}

/// `n` 件の候補者（IDは1始まり）
pub fn sample_candidates(n: u64) -> Vec<Value> {
    (1..=n)
        .map(|id| {
            let job_id = if id % 2 == 0 { "JOB-002" } else { "JOB-001" };
            json!({
                "_id": id,
                "job_id": job_id,
                "name": format!("Candidate {}", id),
                "email": format!("c{}@example.com", id),
                "total_score": (60 + id % 40).to_string(),
                "missing_skills": "SQL | Docker",
                "status": "",
                "notes": ""
            })
        })
        .collect()
}

/// 疑似バックエンドを起動し、接続済みクライアントを返す
pub async fn spawn(backend: Arc<FakeBackend>) -> BackendClient {
    let app = Router::new()
        .route("/", get(health))
        .route("/upload_resume/", post(upload))
        .route("/candidates/", get(list))
        .route("/candidates/:id", get(detail))
        .route("/candidates/:id/status", patch(set_status))
        .route("/candidates/:id/notes", patch(set_notes))
        .route("/analytics/summary", get(summary))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    client_for(&format!("http://{}", addr))
}

pub fn client_for(base: &str) -> BackendClient {
    BackendClient::new(Endpoints::new(base), Duration::from_secs(5)).unwrap()
}

async fn health(State(backend): State<Arc<FakeBackend>>) -> Json<Value> {
    backend.hit();
    Json(json!({"status": "ok", "service": "RecruitGenie API", "endpoints": ["/docs"]}))
}

async fn upload(
    State(backend): State<Arc<FakeBackend>>,
    Query(params): Query<HashMap<String, String>>,
    mut multipart: Multipart,
) -> Response {
    backend.hit();
    let job_id = params.get("job_id").cloned().unwrap_or_default();

    let mut file_name = None;
    let mut size = 0;
    let mut fields = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            file_name = field.file_name().map(str::to_string);
            size = field.bytes().await.map(|b| b.len()).unwrap_or_default();
        }
        fields.push(name);
    }

    match file_name {
        Some(name) if job_id != "REJECT" => Json(json!({
            "message": "Resume processed successfully!",
            "file": name,
            "result": {
                "job_id": job_id,
                "bytes": size,
                "form_fields": fields,
                "saved_filename": name
            }
        }))
        .into_response(),
        Some(_) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({"detail": "job rejected"})),
        )
            .into_response(),
        None => (StatusCode::BAD_REQUEST, "missing file").into_response(),
    }
}

async fn list(
    State(backend): State<Arc<FakeBackend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.hit();
    if let Some(response) = backend.overridden() {
        return response;
    }

    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(50);
    let offset: usize = params.get("offset").and_then(|o| o.parse().ok()).unwrap_or(0);

    let filtered: Vec<Value> = backend
        .candidates
        .lock()
        .unwrap()
        .iter()
        .filter(|c| params.get("job_id").map_or(true, |j| c["job_id"] == json!(j)))
        .filter(|c| params.get("status").map_or(true, |s| c["status"] == json!(s)))
        .cloned()
        .collect();

    let page: Vec<Value> = filtered.iter().skip(offset).take(limit).cloned().collect();
    Json(json!({
        "total": filtered.len(),
        "limit": limit,
        "offset": offset,
        "candidates": page
    }))
    .into_response()
}

async fn detail(State(backend): State<Arc<FakeBackend>>, Path(id): Path<u64>) -> Response {
    backend.hit();
    match backend.candidate(id) {
        Some(candidate) => Json(candidate).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Candidate not found"}))).into_response(),
    }
}

fn patch_field(backend: &FakeBackend, id: u64, field: &str, body: &Value) -> Response {
    backend.hit();
    let Some(value) = body.get(field).cloned() else {
        return (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": "missing field"}))).into_response();
    };

    let mut candidates = backend.candidates.lock().unwrap();
    match candidates.iter_mut().find(|c| c["_id"] == json!(id)) {
        Some(candidate) => {
            candidate[field] = value;
            Json(json!({"ok": true, "id": id})).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(json!({"detail": "Candidate not found"}))).into_response(),
    }
}

async fn set_status(
    State(backend): State<Arc<FakeBackend>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    patch_field(&backend, id, "status", &body)
}

async fn set_notes(
    State(backend): State<Arc<FakeBackend>>,
    Path(id): Path<u64>,
    Json(body): Json<Value>,
) -> Response {
    patch_field(&backend, id, "notes", &body)
}

async fn summary(
    State(backend): State<Arc<FakeBackend>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    backend.hit();
    if let Some(response) = backend.overridden() {
        return response;
    }
    Json(json!({
        "total": 10,
        "avg_score": 72.5,
        "status_counts": {"shortlisted": 3},
        "top_missing_skills": [{"skill": "SQL", "count": 4}],
        "job_id": params.get("job_id")
    }))
    .into_response()
}
