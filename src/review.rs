//! 候補者一覧セッション
//!
//! 一覧の取得・ページ送り・status/notes更新をまとめて持つ。
//! 更新はサーバーが受理した後に該当候補者の該当フィールドだけを書き換える。

use crate::client::BackendClient;
use recruit_console_common::{apply_patch, Candidate, ListQuery, Pager, Patch};
use tracing::{debug, error};

pub struct ReviewSession {
    client: BackendClient,
    query: ListQuery,
    /// Noneならページングなしで全件取得
    pager: Option<Pager>,
    candidates: Vec<Candidate>,
    error: Option<String>,
}

impl ReviewSession {
    pub fn new(client: BackendClient, query: ListQuery, page_size: Option<u64>) -> Self {
        Self {
            client,
            query,
            pager: page_size.map(Pager::new),
            candidates: Vec::new(),
            error: None,
        }
    }

    /// 指定オフセットから始める
    pub fn starting_at(mut self, offset: u64) -> Self {
        if let Some(pager) = self.pager.as_mut() {
            pager.offset = offset;
        }
        self
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn pager(&self) -> Option<&Pager> {
        self.pager.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn effective_query(&self) -> ListQuery {
        match self.pager {
            Some(pager) => self.query.clone().paged(pager.page_size, pager.offset),
            None => self.query.clone(),
        }
    }

    /// 一覧を取得。失敗時はエラーを保持し一覧を空にする
    pub async fn load(&mut self) -> bool {
        self.error = None;
        match self.client.list(&self.effective_query()).await {
            Ok(page) => {
                debug!(count = page.candidates.len(), total = page.total, "candidates loaded");
                if let Some(pager) = self.pager.as_mut() {
                    pager.total = page.total;
                }
                self.candidates = page.candidates;
                true
            }
            Err(e) => {
                error!("fetch candidates failed: {}", e);
                self.error = Some(e.to_string());
                self.candidates.clear();
                false
            }
        }
    }

    pub async fn next_page(&mut self) -> bool {
        let moved = self.pager.as_mut().map_or(false, |pager| pager.next());
        if moved {
            self.load().await
        } else {
            false
        }
    }

    pub async fn prev_page(&mut self) -> bool {
        let moved = self.pager.as_mut().map_or(false, |pager| pager.prev());
        if moved {
            self.load().await
        } else {
            false
        }
    }

    /// 更新を送信し、受理されたらローカルに反映する
    ///
    /// 失敗時はアラート文言を返し、ローカル状態は変えない。
    /// IDが無効なら何もせず`Ok(false)`。
    pub async fn update(&mut self, id: Option<u64>, patch: Patch) -> Result<bool, String> {
        match self.client.patch(id, &patch).await {
            Ok(false) => Ok(false),
            Ok(true) => {
                let id = id.unwrap_or_default();
                Ok(apply_patch(&mut self.candidates, id, &patch))
            }
            Err(e) => {
                error!("patch {} failed: {}", patch.field(), e);
                Err(e.alert_message(patch.field()))
            }
        }
    }
}
