//! ホーム（バックエンド疎通確認）

use crate::api;
use crate::mount::MountGuard;
use leptos::prelude::*;
use leptos::task::spawn_local;
use recruit_console_common::RequestState;
use serde_json::Value;

#[component]
pub fn Home() -> impl IntoView {
    let guard = MountGuard::new();
    let health = RwSignal::new(RequestState::<Value>::Loading);

    spawn_local(async move {
        let result = api::health().await;
        if guard.is_mounted() {
            health.set(RequestState::finish(result));
        }
    });

    view! {
        <section class="page home-page">
            <h2>"Resume screening console"</h2>
            <p class="text-muted">"Backend: " {api::api_base()}</p>
            {move || match health.get() {
                RequestState::Ready(value) => {
                    let service = value
                        .get("service")
                        .and_then(Value::as_str)
                        .unwrap_or("backend")
                        .to_string();
                    view! { <p class="status ok">{format!("✔ {} is reachable", service)}</p> }
                        .into_any()
                }
                RequestState::Failed(message) => {
                    view! { <p class="status error">{format!("✖ {}", message)}</p> }.into_any()
                }
                _ => view! { <p class="status">"Checking backend..."</p> }.into_any(),
            }}
        </section>
    }
}
