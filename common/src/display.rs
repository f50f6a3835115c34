//! 表示用の整形
//!
//! 値がない場合は必ずプレースホルダ `-` か空リストにする。

use crate::types::{AnalyticsSummary, Candidate, Score, TextOrList};

/// 値なしの表示
pub const PLACEHOLDER: &str = "-";

/// 不足スキル欄の最大文字数
pub const MISSING_SKILLS_LIMIT: usize = 120;

/// 整数なら小数点なし、それ以外はそのまま
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

pub fn text_cell(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub fn score_cell(score: Option<&Score>) -> String {
    match score {
        Some(Score::Number(n)) => format_number(*n),
        Some(Score::Text(s)) => text_cell(Some(s)),
        None => PLACEHOLDER.to_string(),
    }
}

/// 不足スキル欄
///
/// `missing_skills` があればそれを、なければ `questions` を使う。
/// 区切り文字はカンマに揃え、`limit` 文字で切り詰める。
pub fn missing_skills_cell(candidate: &Candidate, limit: Option<usize>) -> String {
    let source = [&candidate.missing_skills, &candidate.questions]
        .into_iter()
        .flatten()
        .map(TextOrList::items)
        .find(|items| !items.is_empty());

    let Some(items) = source else {
        return PLACEHOLDER.to_string();
    };

    let joined = items.join(", ");
    match limit {
        Some(limit) => truncate(&joined, limit),
        None => joined,
    }
}

fn truncate(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((end, _)) => s[..end].to_string(),
        None => s.to_string(),
    }
}

/// 集計画面の表示行
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub total_line: String,
    pub average_line: String,
    /// `(ステータス, 件数)` をキー順に
    pub status_counts: Vec<(String, u64)>,
    /// `SQL — 4` 形式
    pub missing_skills: Vec<String>,
}

impl SummaryView {
    pub fn new(summary: &AnalyticsSummary) -> Self {
        Self {
            total_line: format!("Total candidates: {}", summary.total),
            average_line: format!("Average score: {}", format_number(summary.avg_score)),
            status_counts: summary
                .status_counts
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            missing_skills: summary
                .top_missing_skills
                .iter()
                .map(|s| format!("{} — {}", text_cell(Some(&s.skill)), s.count))
                .collect(),
        }
    }

    /// ステータス件数を整形JSONで
    pub fn status_counts_json(summary: &AnalyticsSummary) -> String {
        serde_json::to_string_pretty(&summary.status_counts).unwrap_or_else(|_| "{}".to_string())
    }
}
