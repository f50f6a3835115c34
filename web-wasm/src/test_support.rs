//! ブラウザ上のコンポーネントテスト用ヘルパー

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::wasm_bindgen_test_configure;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window()
        .and_then(|w| w.document())
        .expect("no document")
}

/// `<body>` 直下の新しい要素にマウントし、その要素を返す
pub fn mount_test<F, N>(f: F) -> HtmlElement
where
    F: FnOnce() -> N + 'static,
    N: IntoView + 'static,
{
    let _ = leptos::task::Executor::init_wasm_bindgen();

    let parent: HtmlElement = document()
        .create_element("div")
        .expect("create div")
        .unchecked_into();
    document()
        .body()
        .expect("no body")
        .append_child(&parent)
        .expect("append div");

    leptos::mount::mount_to(parent.clone(), f).forget();
    parent
}

/// 保留中のエフェクトとタスクを流す
pub async fn flush() {
    for _ in 0..4 {
        leptos::task::tick().await;
    }
}

pub fn find(parent: &HtmlElement, selector: &str) -> Option<Element> {
    parent.query_selector(selector).expect("bad selector")
}

pub fn find_all<T: JsCast>(parent: &HtmlElement, selector: &str) -> Vec<T> {
    let list = parent.query_selector_all(selector).expect("bad selector");
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|node| node.unchecked_into())
        .collect()
}

pub fn text(parent: &HtmlElement) -> String {
    parent.text_content().unwrap_or_default()
}
