//! 対話式トリアージ
//!
//! 1ページ分の候補者を順に表示し、ステータス・メモを対話で更新する。

use crate::error::Result;
use crate::render;
use crate::review::ReviewSession;
use dialoguer::{Input, Select};
use recruit_console_common::{text_cell, missing_skills_cell, score_cell, CandidateStatus, Patch};

/// 対話アクション
#[derive(Debug, Clone, PartialEq)]
pub enum TriageAction {
    /// ステータスを設定
    Status(CandidateStatus),
    /// メモを書き換え
    Notes,
    /// この候補者をスキップ
    Skip,
    /// 終了
    Quit,
}

/// 選択肢（表示順）
pub const ACTION_LABELS: [&str; 7] = [
    "shortlisted",
    "review",
    "reject",
    "unknown (clear)",
    "edit notes",
    "skip",
    "quit",
];

pub fn action_for(index: usize) -> TriageAction {
    match index {
        0 => TriageAction::Status(CandidateStatus::Shortlisted),
        1 => TriageAction::Status(CandidateStatus::Review),
        2 => TriageAction::Status(CandidateStatus::Reject),
        3 => TriageAction::Status(CandidateStatus::Unset),
        4 => TriageAction::Notes,
        5 => TriageAction::Skip,
        _ => TriageAction::Quit,
    }
}

pub async fn run_triage(session: &mut ReviewSession) -> Result<()> {
    if !session.load().await {
        if let Some(error) = session.error() {
            println!("Error: {}", error);
        }
        return Ok(());
    }

    // 表示用にID・概要を先に控えておく（更新中に一覧を借用しないため）
    let targets: Vec<(Option<u64>, String, Option<String>)> = session
        .candidates()
        .iter()
        .map(|c| {
            let summary = format!(
                "{} <{}>  score {}  status {}\n  missing: {}",
                text_cell(c.name.as_deref()),
                text_cell(c.email.as_deref()),
                score_cell(c.total_score.as_ref()),
                c.status.label(),
                missing_skills_cell(c, None),
            );
            (c.id, summary, c.notes.clone())
        })
        .collect();

    if targets.is_empty() {
        println!("No candidates found.");
        return Ok(());
    }

    for (count, (id, summary, notes)) in targets.iter().enumerate() {
        println!("\n[{}/{}] #{}", count + 1, targets.len(), id.map(|i| i.to_string()).unwrap_or_else(|| "-".into()));
        println!("  {}", summary);

        let index = Select::new()
            .with_prompt("action")
            .items(&ACTION_LABELS)
            .default(5)
            .interact()?;

        let patch = match action_for(index) {
            TriageAction::Status(status) => Patch::Status(status),
            TriageAction::Notes => {
                let text: String = Input::new()
                    .with_prompt("notes")
                    .with_initial_text(notes.clone().unwrap_or_default())
                    .allow_empty(true)
                    .interact_text()?;
                Patch::Notes(text)
            }
            TriageAction::Skip => {
                println!("  → スキップ");
                continue;
            }
            TriageAction::Quit => break,
        };

        match session.update(*id, patch).await {
            Ok(true) => println!("  ✔ 更新しました"),
            Ok(false) => println!("  → IDがないため更新できません"),
            Err(alert) => println!("  ✖ {}", alert),
        }
    }

    println!("\n{}", render::candidate_table(session.candidates()));
    Ok(())
}
