//! UIコンポーネント

pub mod analytics_page;
pub mod candidates_page;
pub mod error_boundary;
pub mod header;
pub mod home;
pub mod upload_page;
