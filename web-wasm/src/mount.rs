//! マウント状態の追跡
//!
//! 画面が外れた後に完了したリクエストの結果は反映しない。

use leptos::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Clone)]
pub struct MountGuard(Arc<AtomicBool>);

impl MountGuard {
    /// 現在のリアクティブスコープに紐づける
    pub fn new() -> Self {
        let mounted = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&mounted);
        on_cleanup(move || flag.store(false, Ordering::Relaxed));
        Self(mounted)
    }

    pub fn is_mounted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
