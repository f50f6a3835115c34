//! バックエンドのエンドポイントURL生成

use crate::error::PatchField;

/// バックエンドの既定オリジン
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8001";

/// アップロードフォームの既定ジョブID
pub const DEFAULT_JOB_ID: &str = "JOB-001";

/// 候補者一覧の検索条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub job_id: Option<String>,
    pub status: Option<String>,
    /// `(limit, offset)`。Noneならページングなし
    pub page: Option<(u64, u64)>,
}

impl ListQuery {
    pub fn with_job(mut self, job_id: impl Into<String>) -> Self {
        let job_id: String = job_id.into();
        self.job_id = Some(job_id).filter(|j| !j.trim().is_empty());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        let status: String = status.into();
        self.status = Some(status).filter(|s| !s.trim().is_empty());
        self
    }

    pub fn paged(mut self, limit: u64, offset: u64) -> Self {
        self.page = Some((limit, offset));
        self
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(job_id) = &self.job_id {
            params.push(("job_id", job_id.clone()));
        }
        if let Some(status) = &self.status {
            params.push(("status", status.clone()));
        }
        if let Some((limit, offset)) = self.page {
            params.push(("limit", limit.to_string()));
            params.push(("offset", offset.to_string()));
        }
        params
    }
}

/// オリジンを保持してURLを組み立てる
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl Endpoints {
    /// 末尾の `/` は取り除く
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// `GET /`
    pub fn health(&self) -> String {
        format!("{}/", self.base)
    }

    /// `POST /upload_resume/?job_id=`（ジョブIDはクエリのみ）
    pub fn upload(&self, job_id: &str) -> String {
        format!("{}/upload_resume/?job_id={}", self.base, urlencoding::encode(job_id))
    }

    /// `GET /candidates/`
    pub fn candidates(&self, query: &ListQuery) -> String {
        with_query(format!("{}/candidates/", self.base), &query.params())
    }

    /// `GET /candidates/{id}`
    pub fn candidate(&self, id: u64) -> String {
        format!("{}/candidates/{}", self.base, id)
    }

    /// `PATCH /candidates/{id}/status` または `/notes`
    pub fn candidate_field(&self, id: u64, field: PatchField) -> String {
        format!("{}/candidates/{}/{}", self.base, id, field.as_str())
    }

    /// `GET /analytics/summary[?job_id=]`
    pub fn analytics(&self, job_id: Option<&str>) -> String {
        let params: Vec<(&'static str, String)> = job_id
            .filter(|j| !j.trim().is_empty())
            .map(|j| vec![("job_id", j.to_string())])
            .unwrap_or_default();
        with_query(format!("{}/analytics/summary", self.base), &params)
    }

    /// `GET /resumes/file/{name}`
    pub fn resume_file(&self, name: &str) -> String {
        format!("{}/resumes/file/{}", self.base, urlencoding::encode(name))
    }
}

fn with_query(mut url: String, params: &[(&'static str, String)]) -> String {
    for (i, (key, value)) in params.iter().enumerate() {
        url.push(if i == 0 { '?' } else { '&' });
        url.push_str(key);
        url.push('=');
        url.push_str(&urlencoding::encode(value));
    }
    url
}
