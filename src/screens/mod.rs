//! Console screens other than org units
//!
//! Each screen is plain request/response glue over [`crate::api::ApiClient`].

pub mod contracts;
pub mod ingestion;
pub mod onboarding;
pub mod query;
pub mod role;
pub mod taxonomy;
