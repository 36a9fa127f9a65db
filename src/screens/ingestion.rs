//! Document upload

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionManifest {
    pub source_app: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_unit_hint: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadRequest {
    pub manifest: IngestionManifest,
    pub artifacts: Vec<Artifact>,
}

/// Read a text file into an artifact named after the file
pub async fn read_artifact(path: &Path) -> ConsoleResult<Artifact> {
    let id = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            ConsoleError::MalformedInput(format!("'{}' has no file name", path.display()))
        })?
        .to_string();
    let text = tokio::fs::read_to_string(path).await?;
    Ok(Artifact { id, text })
}

/// POST /ingest with one artifact per file
pub async fn upload(
    client: &ApiClient,
    manifest: IngestionManifest,
    artifacts: Vec<Artifact>,
) -> ConsoleResult<serde_json::Value> {
    if artifacts.is_empty() {
        return Err(ConsoleError::MalformedInput(
            "nothing to upload".to_string(),
        ));
    }
    let count = artifacts.len();
    let request = UploadRequest {
        manifest,
        artifacts,
    };
    let result = client.post_json("/ingest", &request).await?;
    tracing::info!(
        "Ingested {} artifact(s) from {}",
        count,
        request.manifest.source_app
    );
    Ok(result)
}
