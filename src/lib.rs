//! recruit-console: 履歴書スクリーニング管理コンソール（CLI）

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod render;
pub mod review;
pub mod triage;
