//! 集計画面
//!
//! 取得に失敗した場合は読み込み中表示のまま（コンソールにログのみ）。

use crate::api;
use crate::mount::MountGuard;
use leptos::prelude::*;
use leptos::task::spawn_local;
use recruit_console_common::{AnalyticsSummary, SummaryView};

#[component]
pub fn AnalyticsPage() -> impl IntoView {
    let guard = MountGuard::new();
    let job_filter = RwSignal::new(String::new());
    let summary = RwSignal::new(None::<AnalyticsSummary>);

    let load = Callback::new(move |_: ()| {
        let job_id = job_filter.get_untracked();
        let guard = guard.clone();
        spawn_local(async move {
            let job_id = Some(job_id.trim()).filter(|j| !j.is_empty());
            match api::summary(job_id).await {
                // 集計は丸ごと置き換える
                Ok(value) if guard.is_mounted() => summary.set(Some(value)),
                Ok(_) => {}
                Err(e) => gloo::console::error!(format!("fetch analytics failed: {}", e)),
            }
        });
    });

    load.run(());

    view! {
        <section class="page analytics-page">
            <h2>"Analytics"</h2>

            <div class="filters">
                <div class="form-group">
                    <label for="analytics-job">"Job ID"</label>
                    <input
                        type="text"
                        id="analytics-job"
                        placeholder="all jobs"
                        prop:value=move || job_filter.get()
                        on:input=move |ev| job_filter.set(event_target_value(&ev))
                    />
                </div>
                <button class="btn btn-secondary" on:click=move |_| load.run(())>
                    "Reload"
                </button>
            </div>

            {move || match summary.get() {
                Some(summary) => view! { <SummaryPanel summary=summary /> }.into_any(),
                None => view! { <p class="text-muted">"Loading analytics..."</p> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn SummaryPanel(summary: AnalyticsSummary) -> impl IntoView {
    let view_model = SummaryView::new(&summary);
    let status_json = SummaryView::status_counts_json(&summary);

    let missing_skills = if view_model.missing_skills.is_empty() {
        view! { <p class="text-muted">"-"</p> }.into_any()
    } else {
        view! {
            <ul class="missing-skills">
                {view_model
                    .missing_skills
                    .into_iter()
                    .map(|line| view! { <li>{line}</li> })
                    .collect_view()}
            </ul>
        }
        .into_any()
    };

    view! {
        <div class="summary">
            <p class="summary-line">{view_model.total_line}</p>
            <p class="summary-line">{view_model.average_line}</p>

            <h3>"Status counts"</h3>
            <pre class="json">{status_json}</pre>

            <h3>"Top missing skills"</h3>
            {missing_skills}
        </div>
    }
}
