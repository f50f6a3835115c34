//! 候補者一覧のローカル状態操作
//!
//! - Pager: limit/offset によるページ送り
//! - Patch: status / notes の部分更新
//!
//! 更新はサーバーが受理した後にだけローカルへ反映する。反映は該当候補者の
//! 該当フィールドのみで、一覧の再取得は行わない（次の手動更新までサーバーと
//! ずれる可能性がある）。

use serde_json::{json, Value};

use crate::error::{Error, PatchField, Result};
use crate::types::{Candidate, CandidateStatus};

/// 1ページの既定件数
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// ページ送り状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    pub offset: u64,
    pub page_size: u64,
    pub total: u64,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: u64) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            total: 0,
        }
    }

    pub fn has_prev(&self) -> bool {
        self.offset != 0
    }

    pub fn has_next(&self) -> bool {
        self.next_offset() < self.total
    }

    /// 次ページの開始位置（上限で飽和）
    pub fn next_offset(&self) -> u64 {
        self.offset.saturating_add(self.page_size)
    }

    /// 次ページへ。移動したらtrue
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.offset = self.next_offset();
        true
    }

    /// 前ページへ。移動したらtrue
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.offset = self.offset.saturating_sub(self.page_size);
        true
    }

    /// 検索条件を変えたら先頭に戻す
    pub fn reset(&mut self) {
        self.offset = 0;
    }

    /// `Showing 1–50 of 120`
    pub fn range_label(&self) -> String {
        let first = self.offset.saturating_add(1).min(self.total);
        let last = self.next_offset().min(self.total);
        format!("Showing {}–{} of {}", first, last, self.total)
    }
}

/// 部分更新
#[derive(Debug, Clone, PartialEq)]
pub enum Patch {
    Status(CandidateStatus),
    Notes(String),
}

impl Patch {
    pub fn field(&self) -> PatchField {
        match self {
            Patch::Status(_) => PatchField::Status,
            Patch::Notes(_) => PatchField::Notes,
        }
    }

    /// PATCHの本文 `{"status": ..}` / `{"notes": ..}`
    pub fn body(&self) -> Value {
        match self {
            Patch::Status(status) => json!({ "status": status.as_str() }),
            Patch::Notes(notes) => json!({ "notes": notes }),
        }
    }

    /// 1件の候補者に反映する
    pub fn apply_to(&self, candidate: &mut Candidate) {
        match self {
            Patch::Status(status) => candidate.status = status.clone(),
            Patch::Notes(notes) => {
                candidate.notes = Some(notes.clone()).filter(|n| !n.is_empty());
            }
        }
    }
}

/// 更新対象として有効なID（未設定・0は対象外）
pub fn patch_target(id: Option<u64>) -> Option<u64> {
    id.filter(|id| *id != 0)
}

/// 受理済みの更新を一覧に反映する。該当IDがあればtrue
pub fn apply_patch(candidates: &mut [Candidate], id: u64, patch: &Patch) -> bool {
    let mut applied = false;
    for candidate in candidates.iter_mut().filter(|c| c.id == Some(id)) {
        patch.apply_to(candidate);
        applied = true;
    }
    applied
}

/// アップロード前のファイル選択チェック
pub fn require_file<T>(file: Option<T>) -> Result<T> {
    file.ok_or_else(|| Error::Validation("Please choose a file.".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Score;
    use serde_json::json;

    fn candidate(id: u64, status: &str) -> Candidate {
        Candidate {
            id: Some(id),
            name: Some(format!("c{}", id)),
            total_score: Some(Score::Number(70.0)),
            status: CandidateStatus::parse(status),
            ..Default::default()
        }
    }

    // =============================================
    // Pager テスト
    // =============================================

    #[test]
    fn test_pager_first_page() {
        let pager = Pager { offset: 0, page_size: 50, total: 120 };
        assert!(!pager.has_prev());
        assert!(pager.has_next());
        assert_eq!(pager.range_label(), "Showing 1–50 of 120");
    }

    #[test]
    fn test_pager_last_page() {
        let pager = Pager { offset: 100, page_size: 50, total: 120 };
        assert!(pager.has_prev());
        assert!(!pager.has_next());
        assert_eq!(pager.range_label(), "Showing 101–120 of 120");
    }

    #[test]
    fn test_pager_exact_boundary() {
        let pager = Pager { offset: 50, page_size: 50, total: 100 };
        assert!(!pager.has_next());
    }

    #[test]
    fn test_pager_empty() {
        let mut pager = Pager::default();
        assert!(!pager.has_prev());
        assert!(!pager.has_next());
        assert!(!pager.next());
        assert!(!pager.prev());
        assert_eq!(pager.range_label(), "Showing 0–0 of 0");
    }

    #[test]
    fn test_pager_next_then_prev_round_trip() {
        for offset in [0, 50, 100] {
            let mut pager = Pager { offset, page_size: 50, total: 175 };
            assert!(pager.next());
            assert!(pager.prev());
            assert_eq!(pager.offset, offset);
        }
    }

    /// 範囲外のオフセットでもオーバーフローしない
    #[test]
    fn test_pager_offset_near_max() {
        let mut pager = Pager { offset: u64::MAX, page_size: 50, total: 10 };
        assert!(!pager.has_next());
        assert!(!pager.next());
        assert_eq!(pager.next_offset(), u64::MAX);
        assert_eq!(pager.range_label(), "Showing 10–10 of 10");
    }

    #[test]
    fn test_pager_zero_page_size_clamped() {
        assert_eq!(Pager::new(0).page_size, 1);
    }

    // =============================================
    // Patch テスト
    // =============================================

    #[test]
    fn test_patch_body() {
        assert_eq!(
            Patch::Status(CandidateStatus::Shortlisted).body(),
            json!({"status": "shortlisted"})
        );
        assert_eq!(Patch::Status(CandidateStatus::Unset).body(), json!({"status": ""}));
        assert_eq!(Patch::Notes("call back".into()).body(), json!({"notes": "call back"}));
    }

    #[test]
    fn test_apply_status_changes_only_target() {
        let mut list = vec![candidate(1, ""), candidate(2, "review")];
        let before = list.clone();

        assert!(apply_patch(&mut list, 1, &Patch::Status(CandidateStatus::Shortlisted)));

        assert_eq!(list[0].status, CandidateStatus::Shortlisted);
        assert_eq!(list[0].name, before[0].name);
        assert_eq!(list[0].total_score, before[0].total_score);
        assert_eq!(list[1], before[1]);
    }

    #[test]
    fn test_apply_status_scenario() {
        let mut list: Vec<Candidate> =
            vec![serde_json::from_value(json!({"_id": 1, "status": ""})).unwrap()];

        apply_patch(&mut list, 1, &Patch::Status(CandidateStatus::Shortlisted));

        assert_eq!(
            serde_json::to_value(&list).unwrap(),
            json!([{"_id": 1, "status": "shortlisted"}])
        );
    }

    #[test]
    fn test_apply_notes() {
        let mut list = vec![candidate(1, ""), candidate(2, "")];
        assert!(apply_patch(&mut list, 2, &Patch::Notes("strong SQL".into())));
        assert_eq!(list[1].notes.as_deref(), Some("strong SQL"));
        assert_eq!(list[0].notes, None);

        assert!(apply_patch(&mut list, 2, &Patch::Notes(String::new())));
        assert_eq!(list[1].notes, None);
    }

    #[test]
    fn test_apply_unknown_id() {
        let mut list = vec![candidate(1, "")];
        let before = list.clone();
        assert!(!apply_patch(&mut list, 9, &Patch::Status(CandidateStatus::Reject)));
        assert_eq!(list, before);
    }

    #[test]
    fn test_patch_target() {
        assert_eq!(patch_target(Some(3)), Some(3));
        assert_eq!(patch_target(Some(0)), None);
        assert_eq!(patch_target(None), None);
    }

    #[test]
    fn test_require_file() {
        assert_eq!(require_file(Some("cv.pdf")).unwrap(), "cv.pdf");
        let err = require_file::<&str>(None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(err.to_string(), "Please choose a file.");
    }
}
