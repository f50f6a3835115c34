//! メインアプリケーションコンポーネント

use crate::components::{
    analytics_page::AnalyticsPage, candidates_page::CandidatesPage, error_boundary::Guarded,
    header::Header, home::Home, upload_page::UploadPage,
};
use leptos::ev;
use leptos::prelude::*;

/// 画面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Upload,
    Candidates,
    Analytics,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Upload, Page::Candidates, Page::Analytics];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Upload => "Upload",
            Page::Candidates => "Candidates",
            Page::Analytics => "Analytics",
        }
    }

    /// `#/candidates` 形式
    pub fn hash(&self) -> &'static str {
        match self {
            Page::Home => "#/",
            Page::Upload => "#/upload",
            Page::Candidates => "#/candidates",
            Page::Analytics => "#/analytics",
        }
    }

    pub fn from_hash(hash: &str) -> Self {
        Page::ALL
            .into_iter()
            .find(|page| page.hash() == hash)
            .unwrap_or(Page::Home)
    }
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default()
}

/// メインアプリケーションコンポーネント
///
/// 各画面はエラーバウンダリで包み、画面切り替えで再マウントする。
#[component]
pub fn App() -> impl IntoView {
    let (page, set_page) = signal(Page::from_hash(&current_hash()));

    // 再読み込みで同じ画面に戻れるようにURLへ反映
    Effect::new(move |_| {
        let hash = page.get().hash();
        if let Some(window) = web_sys::window() {
            if current_hash() != hash {
                let _ = window.location().set_hash(hash);
            }
        }
    });

    // 戻る・進む、手入力のURL変更
    let listener = window_event_listener(ev::hashchange, move |_| {
        let next = Page::from_hash(&current_hash());
        if page.get_untracked() != next {
            set_page.set(next);
        }
    });
    on_cleanup(move || listener.remove());

    view! {
        <div class="container">
            <Header page=page set_page=set_page />

            <main class="content">
                {move || match page.get() {
                    Page::Home => view! { <Guarded><Home /></Guarded> }.into_any(),
                    Page::Upload => view! { <Guarded><UploadPage /></Guarded> }.into_any(),
                    Page::Candidates => view! { <Guarded><CandidatesPage /></Guarded> }.into_any(),
                    Page::Analytics => view! { <Guarded><AnalyticsPage /></Guarded> }.into_any(),
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_hash_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_hash(page.hash()), page);
        }
        assert_eq!(Page::from_hash("#/unknown"), Page::Home);
        assert_eq!(Page::from_hash(""), Page::Home);
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use crate::test_support::{find, flush, mount_test};
    use wasm_bindgen_test::*;

    fn navigate(hash: &str) {
        let window = web_sys::window().unwrap();
        window.location().set_hash(hash).unwrap();
        let event = web_sys::Event::new("hashchange").unwrap();
        window.dispatch_event(&event).unwrap();
    }

    /// URLの変更で画面が切り替わる
    #[wasm_bindgen_test]
    async fn wasm_hash_change_switches_page() {
        navigate(Page::Home.hash());
        let parent = mount_test(App);
        flush().await;
        assert!(find(&parent, ".analytics-page").is_none());

        navigate(Page::Analytics.hash());
        flush().await;
        assert!(find(&parent, ".analytics-page").is_some());

        navigate(Page::Home.hash());
        flush().await;
        assert!(find(&parent, ".analytics-page").is_none());
    }
}
