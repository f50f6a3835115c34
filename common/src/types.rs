//! バックエンドDTOの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - Candidate: 候補者1件（スコア・不足スキル・ステータス・メモ）
//! - CandidatePage: 候補者一覧レスポンス
//! - AnalyticsSummary: 集計結果
//! - UploadResult: アップロード結果（中身は不透明なJSON）
//!
//! デシリアライズは`lenient`経由で行い、型の揺れで失敗しない。

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::lenient;

/// スコア（数値で来ることも文字列で来ることもある）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Score {
    Number(f64),
    Text(String),
}

impl Score {
    /// 数値として読める場合の値
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Score::Number(n) => Some(*n),
            Score::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// 区切り文字列または文字列リスト
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TextOrList {
    Text(String),
    List(Vec<String>),
}

impl TextOrList {
    /// 要素に分解する（文字列は `|` `;` `,` で分割）
    pub fn items(&self) -> Vec<String> {
        match self {
            TextOrList::Text(s) => s
                .split(['|', ';', ','])
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect(),
            TextOrList::List(items) => items
                .iter()
                .map(|i| i.trim())
                .filter(|i| !i.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// 選考ステータス
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateStatus {
    #[default]
    Unset,
    Shortlisted,
    Review,
    Reject,
    /// 想定外の値（そのまま表示する）
    Other(String),
}

impl CandidateStatus {
    /// 選択肢として出す既知の値
    pub const CHOICES: [CandidateStatus; 4] = [
        CandidateStatus::Unset,
        CandidateStatus::Shortlisted,
        CandidateStatus::Review,
        CandidateStatus::Reject,
    ];

    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "" => CandidateStatus::Unset,
            "shortlisted" => CandidateStatus::Shortlisted,
            "review" => CandidateStatus::Review,
            "reject" => CandidateStatus::Reject,
            other => CandidateStatus::Other(other.to_string()),
        }
    }

    /// ワイヤ上の値
    pub fn as_str(&self) -> &str {
        match self {
            CandidateStatus::Unset => "",
            CandidateStatus::Shortlisted => "shortlisted",
            CandidateStatus::Review => "review",
            CandidateStatus::Reject => "reject",
            CandidateStatus::Other(s) => s,
        }
    }

    /// 表示ラベル（未設定は "unknown"）
    pub fn label(&self) -> &str {
        match self {
            CandidateStatus::Unset => "unknown",
            other => other.as_str(),
        }
    }
}

impl std::str::FromStr for CandidateStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "unknown" | "unset" | "none" => CandidateStatus::Unset,
            "shortlist" => CandidateStatus::Shortlisted,
            other => CandidateStatus::parse(other),
        })
    }
}

impl std::fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CandidateStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// 候補者
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Candidate {
    #[serde(rename = "_id", deserialize_with = "lenient::id", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(deserialize_with = "lenient::score", skip_serializing_if = "Option::is_none")]
    pub total_score: Option<Score>,

    #[serde(deserialize_with = "lenient::score", skip_serializing_if = "Option::is_none")]
    pub base_score: Option<Score>,

    #[serde(deserialize_with = "lenient::score", skip_serializing_if = "Option::is_none")]
    pub skill_score: Option<Score>,

    #[serde(deserialize_with = "lenient::score", skip_serializing_if = "Option::is_none")]
    pub penalty: Option<Score>,

    #[serde(deserialize_with = "lenient::text_or_list", skip_serializing_if = "Option::is_none")]
    pub missing_skills: Option<TextOrList>,

    /// 生成された面接質問
    #[serde(deserialize_with = "lenient::text_or_list", skip_serializing_if = "Option::is_none")]
    pub questions: Option<TextOrList>,

    #[serde(deserialize_with = "lenient::status")]
    pub status: CandidateStatus,

    #[serde(deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// 上記以外のフィールド（生JSON表示用に保持）
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Candidate {
    /// オブジェクト以外はNone。`_id`がなければ`id`を使う
    pub fn from_value(value: Value) -> Option<Self> {
        if !value.is_object() {
            return None;
        }
        let mut candidate: Candidate = serde_json::from_value(value).ok()?;
        if candidate.id.is_none() {
            candidate.id = candidate.extra.get("id").and_then(lenient::id_from_value);
        }
        Some(candidate)
    }
}

/// 候補者一覧レスポンス `{total, limit, offset, candidates}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CandidatePage {
    pub total: u64,
    pub limit: Option<u64>,
    pub offset: u64,
    pub candidates: Vec<Candidate>,
}

/// 不足スキルの集計1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillCount {
    #[serde(deserialize_with = "lenient::string")]
    pub skill: String,
    #[serde(deserialize_with = "lenient::count")]
    pub count: u64,
}

/// 集計結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsSummary {
    #[serde(deserialize_with = "lenient::count")]
    pub total: u64,
    #[serde(deserialize_with = "lenient::number")]
    pub avg_score: f64,
    #[serde(deserialize_with = "lenient::count_map")]
    pub status_counts: BTreeMap<String, u64>,
    #[serde(deserialize_with = "lenient::list")]
    pub top_missing_skills: Vec<SkillCount>,
}

/// アップロード結果（不透明なJSON）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct UploadResult(pub Value);

impl UploadResult {
    /// 2スペースインデントで整形
    pub fn pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.0)?)
    }

    pub fn message(&self) -> Option<&str> {
        self.0.get("message").and_then(Value::as_str)
    }

    /// バックエンドに保存されたファイル名（`result.saved_filename` を優先、次に `file`）
    pub fn saved_filename(&self) -> Option<&str> {
        self.0
            .get("result")
            .and_then(|r| r.get("saved_filename"))
            .and_then(Value::as_str)
            .or_else(|| self.0.get("file").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_candidate_deserialize_mixed_types() {
        let value = json!({
            "_id": "4",
            "job_id": "JOB-001",
            "name": "Ada Lovelace",
            "phone": 5551234,
            "total_score": "81",
            "base_score": 60,
            "penalty": null,
            "missing_skills": "SQL | Docker",
            "questions": ["Q1", "Q2"],
            "status": "shortlisted",
            "notes": ""
        });

        let candidate = Candidate::from_value(value).expect("オブジェクトなので変換できる");
        assert_eq!(candidate.id, Some(4));
        assert_eq!(candidate.phone.as_deref(), Some("5551234"));
        assert_eq!(candidate.total_score, Some(Score::Text("81".into())));
        assert_eq!(candidate.total_score.as_ref().and_then(Score::as_f64), Some(81.0));
        assert_eq!(candidate.base_score, Some(Score::Number(60.0)));
        assert_eq!(candidate.penalty, None);
        assert_eq!(candidate.status, CandidateStatus::Shortlisted);
        assert_eq!(candidate.notes, None);
        assert_eq!(
            candidate.missing_skills.as_ref().map(TextOrList::items),
            Some(vec!["SQL".to_string(), "Docker".to_string()])
        );
    }

    #[test]
    fn test_candidate_wrong_types_degrade() {
        let value = json!({
            "_id": {"nested": true},
            "name": ["not", "a", "name"],
            "total_score": false,
            "status": 42
        });

        let candidate = Candidate::from_value(value).expect("型が違っても失敗しない");
        assert_eq!(candidate.id, None);
        assert_eq!(candidate.name, None);
        assert_eq!(candidate.total_score, None);
        assert_eq!(candidate.status, CandidateStatus::Other("42".into()));
    }

    #[test]
    fn test_candidate_keeps_unknown_fields() {
        let candidate = Candidate::from_value(json!({"_id": 1, "resume_path": "a.pdf"})).unwrap();
        assert_eq!(candidate.extra.get("resume_path"), Some(&json!("a.pdf")));

        let back = serde_json::to_value(&candidate).unwrap();
        assert_eq!(back["_id"], json!(1));
        assert_eq!(back["resume_path"], json!("a.pdf"));
        assert_eq!(back["status"], json!(""));
    }

    #[test]
    fn test_candidate_from_non_object() {
        assert!(Candidate::from_value(json!(3)).is_none());
        assert!(Candidate::from_value(json!("x")).is_none());
    }

    #[test]
    fn test_candidate_id_alias() {
        let candidate = Candidate::from_value(json!({"id": "7", "name": "Ann"})).unwrap();
        assert_eq!(candidate.id, Some(7));

        let candidate = Candidate::from_value(json!({"_id": 3, "id": 9})).unwrap();
        assert_eq!(candidate.id, Some(3));
    }

    #[test]
    fn test_status_parse_and_label() {
        assert_eq!(CandidateStatus::parse(""), CandidateStatus::Unset);
        assert_eq!(CandidateStatus::parse("review"), CandidateStatus::Review);
        assert_eq!(CandidateStatus::parse("on-hold"), CandidateStatus::Other("on-hold".into()));
        assert_eq!(CandidateStatus::Unset.label(), "unknown");
        assert_eq!(CandidateStatus::Other("on-hold".into()).label(), "on-hold");
        assert_eq!("Shortlist".parse::<CandidateStatus>().unwrap(), CandidateStatus::Shortlisted);
        assert_eq!("unknown".parse::<CandidateStatus>().unwrap(), CandidateStatus::Unset);
    }

    #[test]
    fn test_analytics_summary_deserialize() {
        let summary: AnalyticsSummary = serde_json::from_value(json!({
            "total": 10,
            "avg_score": 72.5,
            "status_counts": {"shortlisted": 3, "bogus": "x"},
            "top_missing_skills": [{"skill": "SQL", "count": 4}, 7]
        }))
        .unwrap();

        assert_eq!(summary.total, 10);
        assert_eq!(summary.avg_score, 72.5);
        assert_eq!(summary.status_counts.len(), 1);
        assert_eq!(summary.status_counts["shortlisted"], 3);
        assert_eq!(
            summary.top_missing_skills,
            vec![SkillCount { skill: "SQL".into(), count: 4 }]
        );
    }

    #[test]
    fn test_analytics_summary_missing_fields() {
        let summary: AnalyticsSummary = serde_json::from_value(json!({})).unwrap();
        assert_eq!(summary, AnalyticsSummary::default());
    }

    #[test]
    fn test_upload_result_accessors() {
        let result = UploadResult(json!({
            "message": "Resume processed successfully!",
            "file": "cv.pdf",
            "result": {"saved_filename": "cv-saved.pdf", "total_score": 70}
        }));
        assert_eq!(result.message(), Some("Resume processed successfully!"));
        assert_eq!(result.saved_filename(), Some("cv-saved.pdf"));

        let bare = UploadResult(json!({"file": "cv.pdf"}));
        assert_eq!(bare.saved_filename(), Some("cv.pdf"));
        assert_eq!(UploadResult(json!({"detail": "bad"})).saved_filename(), None);
    }

    #[test]
    fn test_upload_result_pretty() {
        let result = UploadResult(json!({"ok": true}));
        assert_eq!(result.pretty().unwrap(), "{\n  \"ok\": true\n}");
    }
}
