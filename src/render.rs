//! 端末向けの整形出力

use recruit_console_common::display::{MISSING_SKILLS_LIMIT, PLACEHOLDER};
use recruit_console_common::{
    missing_skills_cell, score_cell, text_cell, AnalyticsSummary, Candidate, Pager, SummaryView,
};

const HEADERS: [&str; 8] = ["#", "Job", "Name", "Email", "Total", "Missing skills", "Status", "Notes"];

/// 1行分のセル
pub fn candidate_row(candidate: &Candidate) -> [String; 8] {
    [
        candidate
            .id
            .map(|id| id.to_string())
            .unwrap_or_else(|| PLACEHOLDER.to_string()),
        text_cell(candidate.job_id.as_deref()),
        text_cell(candidate.name.as_deref()),
        text_cell(candidate.email.as_deref()),
        score_cell(candidate.total_score.as_ref()),
        missing_skills_cell(candidate, Some(MISSING_SKILLS_LIMIT)),
        candidate.status.label().to_string(),
        text_cell(candidate.notes.as_deref()),
    ]
}

/// 候補者テーブル。空なら "No candidates found."
pub fn candidate_table(candidates: &[Candidate]) -> String {
    if candidates.is_empty() {
        return "No candidates found.".to_string();
    }

    let rows: Vec<[String; 8]> = candidates.iter().map(candidate_row).collect();
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 8], widths: &[usize; 8]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

/// ページ情報の行
pub fn pager_line(pager: &Pager) -> String {
    let mut line = pager.range_label();
    if pager.has_prev() {
        line.push_str(&format!("  [prev: --offset {}]", pager.offset.saturating_sub(pager.page_size)));
    }
    if pager.has_next() {
        line.push_str(&format!("  [next: --offset {}]", pager.next_offset()));
    }
    line
}

/// 集計レポート
pub fn summary_report(summary: &AnalyticsSummary) -> String {
    let view = SummaryView::new(summary);
    let mut out = format!("{}\n{}\n\nStatus counts\n", view.total_line, view.average_line);

    if view.status_counts.is_empty() {
        out.push_str(&format!("  {}\n", PLACEHOLDER));
    }
    let width = view.status_counts.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    for (status, count) in &view.status_counts {
        let pad = width - status.chars().count();
        out.push_str(&format!("  {}{}  {}\n", status, " ".repeat(pad), count));
    }

    out.push_str("\nTop missing skills\n");
    if view.missing_skills.is_empty() {
        out.push_str(&format!("  {}\n", PLACEHOLDER));
    }
    for line in &view.missing_skills {
        out.push_str(&format!("  - {}\n", line));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use recruit_console_common::{CandidateStatus, Score, SkillCount, TextOrList};
    use std::collections::BTreeMap;

    #[test]
    fn test_candidate_row_placeholders() {
        let row = candidate_row(&Candidate::default());
        assert_eq!(row[0], "-");
        assert_eq!(row[2], "-");
        assert_eq!(row[4], "-");
        assert_eq!(row[5], "-");
        assert_eq!(row[6], "unknown");
    }

    #[test]
    fn test_candidate_table() {
        let candidates = vec![Candidate {
            id: Some(1),
            job_id: Some("JOB-001".into()),
            name: Some("Ada".into()),
            total_score: Some(Score::Text("81".into())),
            missing_skills: Some(TextOrList::Text("SQL|Go".into())),
            status: CandidateStatus::Review,
            ..Default::default()
        }];

        let table = candidate_table(&candidates);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("#  Job"));
        assert!(lines[2].contains("Ada"));
        assert!(lines[2].contains("SQL, Go"));
        assert!(lines[2].contains("review"));
    }

    #[test]
    fn test_candidate_table_empty() {
        assert_eq!(candidate_table(&[]), "No candidates found.");
    }

    #[test]
    fn test_pager_line() {
        let pager = Pager { offset: 50, page_size: 50, total: 120 };
        assert_eq!(
            pager_line(&pager),
            "Showing 51–100 of 120  [prev: --offset 0]  [next: --offset 100]"
        );
    }

    #[test]
    fn test_pager_line_offset_past_end() {
        let pager = Pager { offset: u64::MAX, page_size: 50, total: 10 };
        assert_eq!(
            pager_line(&pager),
            format!("Showing 10–10 of 10  [prev: --offset {}]", u64::MAX - 50)
        );
    }

    #[test]
    fn test_summary_report() {
        let summary = AnalyticsSummary {
            total: 10,
            avg_score: 72.5,
            status_counts: BTreeMap::from([("shortlisted".to_string(), 3)]),
            top_missing_skills: vec![SkillCount { skill: "SQL".into(), count: 4 }],
        };

        let report = summary_report(&summary);
        assert!(report.contains("Total candidates: 10"));
        assert!(report.contains("Average score: 72.5"));
        assert!(report.contains("shortlisted  3"));
        assert!(report.contains("- SQL — 4"));
    }
}
