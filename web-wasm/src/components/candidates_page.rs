//! 候補者一覧画面
//!
//! 絞り込み（ジョブID・ステータス）、ページ送り、status/notesの編集。
//! 行ごとに候補者のシグナルを持ち、サーバーが受理した更新はその行にだけ反映する。
//! 他の行は作り直さないので、編集中の入力は失われない。

use crate::api;
use crate::mount::MountGuard;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use recruit_console_common::{
    missing_skills_cell, patch_target, score_cell, text_cell, Candidate, CandidateStatus,
    ListQuery, Pager, Patch, Result, DEFAULT_PAGE_SIZE, MISSING_SKILLS_LIMIT,
};

/// ページサイズの選択肢（Noneは全件）
const PAGE_SIZES: [Option<u64>; 4] = [Some(20), Some(DEFAULT_PAGE_SIZE), Some(100), None];

fn page_size_value(size: Option<u64>) -> String {
    size.map(|s| s.to_string()).unwrap_or_else(|| "all".to_string())
}

/// 一覧の1行
#[derive(Clone)]
pub(crate) struct Row {
    /// `(取得回数, 位置)`。再取得のたびに全行を作り直す
    key: (u64, usize),
    number: u64,
    candidate: ArcRwSignal<Candidate>,
}

impl Row {
    pub(crate) fn new(key: (u64, usize), number: u64, candidate: Candidate) -> Self {
        Self {
            key,
            number,
            candidate: ArcRwSignal::new(candidate),
        }
    }
}

/// 更新結果を行に反映する。失敗時はアラート文言を返す
///
/// 反映しなかった場合も通知だけは出し、画面上の選択・入力を現在の値に戻す。
pub(crate) fn settle(
    candidate: &ArcRwSignal<Candidate>,
    patch: &Patch,
    outcome: Result<bool>,
) -> Option<String> {
    match outcome {
        Ok(true) => {
            candidate.update(|c| patch.apply_to(c));
            None
        }
        Ok(false) => {
            candidate.update(|_| {});
            None
        }
        Err(e) => {
            candidate.update(|_| {});
            Some(e.alert_message(patch.field()))
        }
    }
}

#[component]
pub fn CandidatesPage() -> impl IntoView {
    let guard = MountGuard::new();
    let rows = RwSignal::new(Vec::<Row>::new());
    let loads = RwSignal::new(0u64);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);
    let job_filter = RwSignal::new(String::new());
    let status_filter = RwSignal::new(String::new());
    let page_size = RwSignal::new(Some(DEFAULT_PAGE_SIZE));
    let pager = RwSignal::new(Pager::new(DEFAULT_PAGE_SIZE));

    let load = {
        let guard = guard.clone();
        Callback::new(move |_: ()| {
            let mut query = ListQuery::default()
                .with_job(job_filter.get_untracked())
                .with_status(status_filter.get_untracked());
            let mut first = 0;
            if let Some(size) = page_size.get_untracked() {
                first = pager.get_untracked().offset;
                query = query.paged(size, first);
            }

            loading.set(true);
            error.set(None);
            let guard = guard.clone();
            spawn_local(async move {
                let result = api::list(&query).await;
                if !guard.is_mounted() {
                    return;
                }
                match result {
                    Ok(listing) => {
                        for warning in &listing.warnings {
                            gloo::console::warn!(warning.clone());
                        }
                        pager.update(|p| p.total = listing.page.total);
                        loads.update(|n| *n += 1);
                        let generation = loads.get_untracked();
                        rows.set(
                            listing
                                .page
                                .candidates
                                .into_iter()
                                .enumerate()
                                .map(|(index, candidate)| {
                                    let number = first.saturating_add(index as u64 + 1);
                                    Row::new((generation, index), number, candidate)
                                })
                                .collect(),
                        );
                    }
                    Err(e) => {
                        gloo::console::error!(format!("fetch candidates failed: {}", e));
                        error.set(Some(e.to_string()));
                        rows.set(Vec::new());
                    }
                }
                loading.set(false);
            });
        })
    };

    let update = Callback::new(move |(candidate, patch): (ArcRwSignal<Candidate>, Patch)| {
        let guard = guard.clone();
        spawn_local(async move {
            let id = candidate.with_untracked(|c| c.id);
            let outcome = api::patch(id, &patch).await;
            if !guard.is_mounted() {
                return;
            }
            if let Some(message) = settle(&candidate, &patch, outcome) {
                gloo::console::error!(message.clone());
                gloo::dialogs::alert(&message);
            }
        });
    });

    let refresh = move || {
        pager.update(Pager::reset);
        load.run(());
    };

    load.run(());

    view! {
        <section class="page candidates-page">
            <h2>"Candidates"</h2>

            <div class="filters">
                <div class="form-group">
                    <label for="job-filter">"Job ID"</label>
                    <input
                        type="text"
                        id="job-filter"
                        placeholder="all jobs"
                        prop:value=move || job_filter.get()
                        on:input=move |ev| job_filter.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" {
                                refresh();
                            }
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="status-filter">"Status"</label>
                    <select
                        id="status-filter"
                        on:change=move |ev| {
                            status_filter.set(event_target_value(&ev));
                            refresh();
                        }
                    >
                        <option value="" selected=move || status_filter.get().is_empty()>"all"</option>
                        {CandidateStatus::CHOICES
                            .into_iter()
                            .filter(|s| *s != CandidateStatus::Unset)
                            .map(|s| {
                                let value = s.as_str().to_string();
                                let current = value.clone();
                                view! {
                                    <option value=value selected=move || status_filter.get() == current>
                                        {s.label().to_string()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <div class="form-group">
                    <label for="page-size">"Per page"</label>
                    <select
                        id="page-size"
                        on:change=move |ev| {
                            let size = event_target_value(&ev).parse::<u64>().ok();
                            page_size.set(size);
                            pager.set(Pager::new(size.unwrap_or(DEFAULT_PAGE_SIZE)));
                            load.run(());
                        }
                    >
                        {PAGE_SIZES
                            .into_iter()
                            .map(|size| {
                                view! {
                                    <option
                                        value=page_size_value(size)
                                        selected=move || page_size.get() == size
                                    >
                                        {page_size_value(size)}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </div>

                <button class="btn btn-secondary" disabled=move || loading.get() on:click=move |_| refresh()>
                    "Reload"
                </button>
            </div>

            <Show when=move || error.get().is_some()>
                <p class="error">"Error: " {move || error.get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !loading.get()
                fallback=|| view! { <p class="text-muted">"Loading candidates..."</p> }
            >
                <CandidateTable rows=rows on_update=update />
            </Show>

            <Show when=move || page_size.get().is_some()>
                <div class="pager">
                    <button
                        class="btn btn-small"
                        disabled=move || loading.get() || !pager.get().has_prev()
                        on:click=move |_| {
                            if pager.try_update(Pager::prev).unwrap_or(false) {
                                load.run(());
                            }
                        }
                    >
                        "‹ Prev"
                    </button>
                    <span class="pager-label">{move || pager.get().range_label()}</span>
                    <button
                        class="btn btn-small"
                        disabled=move || loading.get() || !pager.get().has_next()
                        on:click=move |_| {
                            if pager.try_update(Pager::next).unwrap_or(false) {
                                load.run(());
                            }
                        }
                    >
                        "Next ›"
                    </button>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn CandidateTable(
    rows: RwSignal<Vec<Row>>,
    on_update: Callback<(ArcRwSignal<Candidate>, Patch)>,
) -> impl IntoView {
    view! {
        <Show
            when=move || rows.with(|list| !list.is_empty())
            fallback=|| view! { <p class="text-muted">"No candidates found."</p> }
        >
            <table class="candidates">
                <thead>
                    <tr>
                        <th>"#"</th>
                        <th>"Job"</th>
                        <th>"Name"</th>
                        <th>"Email"</th>
                        <th>"Total"</th>
                        <th>"Missing skills"</th>
                        <th>"Status"</th>
                        <th>"Notes"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || rows.get()
                        key=|row| row.key
                        children=move |row| view! { <CandidateRow row=row on_update=on_update /> }
                    />
                </tbody>
            </table>
        </Show>
    }
}

#[component]
pub(crate) fn CandidateRow(
    row: Row,
    on_update: Callback<(ArcRwSignal<Candidate>, Patch)>,
) -> impl IntoView {
    let candidate = row.candidate;
    let initial = candidate.get_untracked();
    let id = initial.id;

    // 想定外のステータスも選択肢として残す
    let mut options = CandidateStatus::CHOICES.to_vec();
    if matches!(initial.status, CandidateStatus::Other(_)) {
        options.push(initial.status.clone());
    }

    let on_status = {
        let candidate = candidate.clone();
        move |ev: ev::Event| {
            let status = CandidateStatus::parse(&event_target_value(&ev));
            on_update.run((candidate.clone(), Patch::Status(status)));
        }
    };

    let on_notes_blur = {
        let candidate = candidate.clone();
        move |ev: ev::FocusEvent| {
            let value = event_target_value(&ev);
            let saved = candidate.with_untracked(|c| c.notes.clone().unwrap_or_default());
            if value != saved {
                on_update.run((candidate.clone(), Patch::Notes(value)));
            }
        }
    };

    let notes = {
        let candidate = candidate.clone();
        move || candidate.with(|c| c.notes.clone().unwrap_or_default())
    };

    view! {
        <tr>
            <td>{row.number}</td>
            <td>{text_cell(initial.job_id.as_deref())}</td>
            <td>{text_cell(initial.name.as_deref())}</td>
            <td>{text_cell(initial.email.as_deref())}</td>
            <td>{score_cell(initial.total_score.as_ref())}</td>
            <td class="missing-skills">{missing_skills_cell(&initial, Some(MISSING_SKILLS_LIMIT))}</td>
            <td>
                <select class="status" on:change=on_status>
                    {options
                        .into_iter()
                        .map(|status| {
                            let value = status.as_str().to_string();
                            let label = status.label().to_string();
                            let candidate = candidate.clone();
                            view! {
                                <option
                                    value=value
                                    prop:selected=move || candidate.with(|c| c.status == status)
                                >
                                    {label}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </td>
            <td>
                <textarea class="notes" rows="2" prop:value=notes on:blur=on_notes_blur></textarea>
            </td>
            <td>
                <button
                    class="btn btn-small btn-tertiary"
                    disabled=patch_target(id).is_none()
                    on:click=move |_| {
                        if let Some(id) = patch_target(id) {
                            api::open_candidate_json(id);
                        }
                    }
                >
                    "View JSON"
                </button>
            </td>
        </tr>
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::test_support::{find_all, flush, mount_test};
    use recruit_console_common::Error;
    use wasm_bindgen_test::*;
    use web_sys::{Event, EventInit, HtmlSelectElement, HtmlTextAreaElement};

    fn candidate(id: u64, status: CandidateStatus, notes: Option<&str>) -> Candidate {
        Candidate {
            id: Some(id),
            status,
            notes: notes.map(str::to_string),
            ..Default::default()
        }
    }

    fn rejected() -> Error {
        Error::Http {
            status: 500,
            status_text: "Internal Server Error".to_string(),
            body: "boom".to_string(),
        }
    }

    /// 行を描画し、送られた更新を記録する
    fn mount_rows(rows: Vec<Row>) -> (web_sys::HtmlElement, RwSignal<Vec<Patch>>) {
        let sent = RwSignal::new(Vec::<Patch>::new());
        let on_update = Callback::new(move |(_, patch): (ArcRwSignal<Candidate>, Patch)| {
            sent.update(|list| list.push(patch));
        });
        let parent = mount_test(move || {
            view! {
                <table>
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|row| view! { <CandidateRow row=row on_update=on_update /> })
                            .collect_view()}
                    </tbody>
                </table>
            }
        });
        (parent, sent)
    }

    fn change(target: &web_sys::EventTarget) {
        let init = EventInit::new();
        init.set_bubbles(true);
        let event = Event::new_with_event_init_dict("change", &init).unwrap();
        target.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    async fn wasm_status_reverts_after_failed_update() {
        let row = Row::new((1, 0), 1, candidate(7, CandidateStatus::Unset, None));
        let signal = row.candidate.clone();
        let (parent, sent) = mount_rows(vec![row]);
        flush().await;

        let select = find_all::<HtmlSelectElement>(&parent, "select.status").remove(0);
        assert_eq!(select.value(), "");

        select.set_value("reject");
        change(&select);
        flush().await;
        assert_eq!(sent.get_untracked(), vec![Patch::Status(CandidateStatus::Reject)]);

        let patch = Patch::Status(CandidateStatus::Reject);
        let alert = settle(&signal, &patch, Err(rejected()));
        flush().await;

        let alert = alert.unwrap();
        assert!(alert.starts_with("Failed to update "));
        assert!(alert.contains("boom"));
        assert_eq!(signal.get_untracked().status, CandidateStatus::Unset);
        assert_eq!(select.value(), "");
    }

    #[wasm_bindgen_test]
    async fn wasm_status_applied_after_successful_update() {
        let row = Row::new((1, 0), 1, candidate(7, CandidateStatus::Unset, None));
        let signal = row.candidate.clone();
        let (parent, _) = mount_rows(vec![row]);
        flush().await;

        let patch = Patch::Status(CandidateStatus::Reject);
        assert!(settle(&signal, &patch, Ok(true)).is_none());
        flush().await;

        let select = find_all::<HtmlSelectElement>(&parent, "select.status").remove(0);
        assert_eq!(signal.get_untracked().status, CandidateStatus::Reject);
        assert_eq!(select.value(), "reject");
    }

    /// 対象外の候補者（更新なし）は何も変えない
    #[wasm_bindgen_test]
    async fn wasm_skipped_update_keeps_state() {
        let row = Row::new((1, 0), 1, candidate(7, CandidateStatus::Review, Some("ok")));
        let signal = row.candidate.clone();
        let (parent, _) = mount_rows(vec![row]);
        flush().await;

        let patch = Patch::Notes("changed".to_string());
        assert!(settle(&signal, &patch, Ok(false)).is_none());
        flush().await;

        let notes = find_all::<HtmlTextAreaElement>(&parent, "textarea.notes").remove(0);
        assert_eq!(signal.get_untracked().notes.as_deref(), Some("ok"));
        assert_eq!(notes.value(), "ok");
    }

    /// 別の行の更新で編集中の入力が消えない
    #[wasm_bindgen_test]
    async fn wasm_update_leaves_other_rows_untouched() {
        let first = Row::new((1, 0), 1, candidate(1, CandidateStatus::Unset, None));
        let second = Row::new((1, 1), 2, candidate(2, CandidateStatus::Unset, None));
        let signal = first.candidate.clone();
        let (parent, _) = mount_rows(vec![first, second]);
        flush().await;

        let notes = find_all::<HtmlTextAreaElement>(&parent, "textarea.notes");
        assert_eq!(notes.len(), 2);
        notes[1].set_value("typing in progress");

        let patch = Patch::Notes("call back Monday".to_string());
        assert!(settle(&signal, &patch, Ok(true)).is_none());
        flush().await;

        assert_eq!(notes[0].value(), "call back Monday");
        assert_eq!(notes[1].value(), "typing in progress");
    }
}
