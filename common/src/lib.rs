//! Recruit Console Common Library
//!
//! CLIとWeb(WASM)で共有される型・エンドポイント・レスポンス解釈

pub mod types;
pub mod lenient;
pub mod error;
pub mod endpoints;
pub mod response;
pub mod listing;
pub mod display;
pub mod lifecycle;

pub use types::{
    AnalyticsSummary, Candidate, CandidatePage, CandidateStatus, Score, SkillCount, TextOrList,
    UploadResult,
};
pub use error::{Error, PatchField, Result};
pub use endpoints::{Endpoints, ListQuery, DEFAULT_API_BASE, DEFAULT_JOB_ID};
pub use response::{RawResponse, Listing};
pub use listing::{Pager, Patch, apply_patch, patch_target, require_file, DEFAULT_PAGE_SIZE};
pub use display::{
    SummaryView, format_number, missing_skills_cell, score_cell, text_cell, MISSING_SKILLS_LIMIT,
};
pub use lifecycle::RequestState;
