//! 履歴書アップロード画面

use crate::api;
use crate::mount::MountGuard;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use recruit_console_common::{RequestState, UploadResult, DEFAULT_JOB_ID};
use web_sys::{File, HtmlInputElement};

#[component]
pub fn UploadPage() -> impl IntoView {
    let guard = MountGuard::new();
    let (file, set_file) = signal_local(None::<File>);
    let (job_id, set_job_id) = signal(DEFAULT_JOB_ID.to_string());
    let state = RwSignal::new(RequestState::<UploadResult>::Idle);
    let is_loading = move || state.with(RequestState::is_loading);

    let on_file = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        set_file.set(input.files().and_then(|files| files.get(0)));
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        if state.with_untracked(RequestState::is_loading) {
            return;
        }

        // 前回の結果・エラーは送信のたびに消す
        state.set(RequestState::Loading);
        let selected = file.get_untracked();
        let job_id = job_id.get_untracked();
        let guard = guard.clone();

        spawn_local(async move {
            let result = api::upload(selected, &job_id).await;
            if let Err(e) = &result {
                gloo::console::error!(format!("upload failed: {}", e));
            }
            if guard.is_mounted() {
                state.set(RequestState::finish(result));
            }
        });
    };

    view! {
        <section class="page upload-page">
            <h2>"Upload Resume"</h2>

            <form class="upload-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="resume-file">"Resume file"</label>
                    <input
                        type="file"
                        id="resume-file"
                        accept=".pdf,.doc,.docx,.txt"
                        on:change=on_file
                    />
                </div>

                <div class="form-group">
                    <label for="job-id">"Job ID"</label>
                    <input
                        type="text"
                        id="job-id"
                        prop:value=move || job_id.get()
                        on:input=move |ev| {
                            set_job_id.set(event_target_value(&ev));
                        }
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled=is_loading>
                    {move || if is_loading() { "Uploading..." } else { "Upload" }}
                </button>
            </form>

            {move || {
                state
                    .with(|s| s.error().map(str::to_string))
                    .map(|message| view! { <pre class="error">{message}</pre> })
            }}

            {move || {
                state
                    .with(|s| s.ready().cloned())
                    .map(|result| view! { <UploadResultPanel result=result /> })
            }}
        </section>
    }
}

#[component]
fn UploadResultPanel(result: UploadResult) -> impl IntoView {
    let resume_link = result
        .saved_filename()
        .map(|name| api::endpoints().resume_file(name));

    view! {
        <div class="upload-result">
            <h3>"Result"</h3>
            {result.message().map(|message| view! { <p class="result-message">{message.to_string()}</p> })}
            <pre class="json">{result.pretty()}</pre>
            {resume_link.map(|href| {
                view! {
                    <a href=href target="_blank" rel="noopener noreferrer">
                        "Open stored resume →"
                    </a>
                }
            })}
        </div>
    }
}
