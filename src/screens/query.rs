//! SemanticQL screen
//!
//! The query language is opaque here: a string goes out, JSON comes back.

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::ConsoleResult;

pub const EXAMPLE_QUERY: &str = r#"FIND SIMILAR "PPAP Level 3 submission warrant" IN semantic_en TOP 10"#;

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequest {
    pub ql: String,
}

/// POST /semanticql
pub async fn run_query(client: &ApiClient, ql: &str) -> ConsoleResult<serde_json::Value> {
    let request = QueryRequest { ql: ql.to_string() };
    let result = client.post_json("/semanticql", &request).await?;
    tracing::debug!("SemanticQL query returned");
    Ok(result)
}

/// Pretty-printed result, as shown in the result pane
pub fn format_result(result: &serde_json::Value) -> String {
    serde_json::to_string_pretty(result).unwrap_or_else(|_| result.to_string())
}
