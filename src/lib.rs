//! AFDB Console - operator console for the AFDB governance service
//!
//! This crate provides the console side of the service: the organizational
//! unit hierarchy (index, traversal, edit form, screen state) plus thin
//! request/response screens for taxonomy, contracts, ingestion, roles and
//! SemanticQL queries. All business logic lives in the service.

pub mod api;
pub mod config;
pub mod error;
pub mod notice;
pub mod org;
pub mod screens;
pub mod session;

// Re-export commonly used types
pub use api::ApiClient;
pub use config::Config;
pub use error::{ConsoleError, ConsoleResult};
pub use session::SessionStore;
