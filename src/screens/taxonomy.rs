//! Taxonomy screen
//!
//! Lists and adds category paths such as `Manufacturing/QA/PPAP`

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};

const PATHS: &str = "/taxonomy/paths";

#[derive(Debug, Serialize, Deserialize)]
pub struct AddPathRequest {
    pub path: String,
}

/// GET /taxonomy/paths
pub async fn list_paths(client: &ApiClient) -> ConsoleResult<Vec<String>> {
    client.get_json(PATHS).await
}

/// POST /taxonomy/paths, then reload the list
pub async fn add_path(client: &ApiClient, path: &str) -> ConsoleResult<Vec<String>> {
    let path = normalize_path(path)?;
    client.post(PATHS, &AddPathRequest { path: path.clone() }).await?;
    tracing::info!("Added taxonomy path {}", path);
    list_paths(client).await
}

/// Trim whitespace around each segment and drop empty segments
pub fn normalize_path(path: &str) -> ConsoleResult<String> {
    let segments: Vec<&str> = path
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if segments.is_empty() {
        return Err(ConsoleError::MalformedInput(
            "taxonomy path must not be empty".to_string(),
        ));
    }
    Ok(segments.join("/"))
}
