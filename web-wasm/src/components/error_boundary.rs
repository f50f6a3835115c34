//! エラーバウンダリ
//!
//! 子ツリーの描画が`Err`を返したら「Something went wrong」パネルに差し替える。
//! 一度表示したら再マウントまで戻らない。非同期取得の失敗は各画面が自前で扱う。

use leptos::prelude::*;
use std::error::Error as StdError;

/// 表示用のエラー内容（メッセージと原因の連鎖）
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorReport {
    pub message: String,
    pub causes: Vec<String>,
}

impl ErrorReport {
    pub fn from_error(error: &(dyn StdError + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            message: error.to_string(),
            causes,
        }
    }
}

#[component]
pub fn Guarded(children: ChildrenFn) -> impl IntoView {
    let tripped = RwSignal::new(Vec::<ErrorReport>::new());
    let children = StoredValue::new(children);

    view! {
        <Show
            when=move || tripped.with(Vec::is_empty)
            fallback=move || view! { <Fallback reports=tripped /> }
        >
            <ErrorBoundary fallback=move |errors| {
                let reports: Vec<ErrorReport> = errors
                    .get_untracked()
                    .into_iter()
                    .map(|(_, error)| {
                        let inner = error.into_inner();
                        ErrorReport::from_error(inner.as_ref())
                    })
                    .collect();
                for report in &reports {
                    gloo::console::error!(format!("render error: {}", report.message));
                }
                tripped.set(reports);
            }>
                {children.with_value(|children| children())}
            </ErrorBoundary>
        </Show>
    }
}

#[component]
fn Fallback(reports: RwSignal<Vec<ErrorReport>>) -> impl IntoView {
    view! {
        <div class="error-boundary" role="alert">
            <h2>"Something went wrong"</h2>
            <For
                each=move || reports.get().into_iter().enumerate()
                key=|(index, _)| *index
                children=|(_, report)| {
                    view! {
                        <div class="error-report">
                            <p class="error-message">{report.message}</p>
                            <pre class="error-causes">
                                {report
                                    .causes
                                    .iter()
                                    .map(|cause| format!("caused by: {}\n", cause))
                                    .collect::<String>()}
                            </pre>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recruit_console_common::Error;

    #[test]
    fn test_report_collects_source_chain() {
        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let error = Error::from(json);
        let report = ErrorReport::from_error(&error);

        assert!(report.message.starts_with("JSON error:"));
        assert_eq!(report.causes.len(), 1);
    }

    #[test]
    fn test_report_without_source() {
        let error = Error::Validation("Please choose a file.".into());
        let report = ErrorReport::from_error(&error);

        assert_eq!(report.message, "Please choose a file.");
        assert!(report.causes.is_empty());
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::test_support::{find, flush, mount_test, text};
    use recruit_console_common::Error;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    async fn wasm_render_error_shows_fallback() {
        let failing = RwSignal::new(true);
        let parent = mount_test(move || {
            view! {
                <p class="shell">"shell"</p>
                <Guarded>
                    {move || {
                        if failing.get() {
                            Err(Error::Validation("broken view".into()))
                        } else {
                            Ok(view! { <p class="child">"fine"</p> })
                        }
                    }}
                </Guarded>
            }
        });
        flush().await;

        assert!(text(&parent).contains("Something went wrong"));
        assert!(text(&parent).contains("broken view"));
        assert!(find(&parent, ".shell").is_some());
        assert!(find(&parent, ".child").is_none());

        // 再マウントまで戻らない
        failing.set(false);
        flush().await;
        assert!(text(&parent).contains("Something went wrong"));
        assert!(find(&parent, ".child").is_none());
    }

    #[wasm_bindgen_test]
    async fn wasm_healthy_child_renders() {
        let parent = mount_test(|| {
            view! {
                <Guarded>
                    {|| Ok::<_, Error>(view! { <p class="child">"fine"</p> })}
                </Guarded>
            }
        });
        flush().await;

        assert!(find(&parent, ".child").is_some());
        assert!(!text(&parent).contains("Something went wrong"));
    }
}
