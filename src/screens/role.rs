//! Role assumption
//!
//! Assuming a role yields a session id; it is stored in the client's
//! [`crate::session::SessionStore`] so every later request carries it.

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};

/// Roles the console offers for selection
pub const KNOWN_ROLES: [&str; 3] = ["QA-Inspector", "QA-Lead", "Support-Agent"];

/// Assume role request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumeRoleRequest {
    pub person_id: String,
    pub roles: Vec<String>,
    /// Org unit ids the session is scoped to
    pub scope_ids: Vec<u32>,
}

/// Assume role response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumeRoleResponse {
    pub session_id: String,
}

/// POST /assume_role; on success the session becomes current
pub async fn assume_role(
    client: &ApiClient,
    request: &AssumeRoleRequest,
) -> ConsoleResult<AssumeRoleResponse> {
    if request.person_id.trim().is_empty() {
        return Err(ConsoleError::MalformedInput(
            "person id must not be empty".to_string(),
        ));
    }
    for role in &request.roles {
        if !KNOWN_ROLES.contains(&role.as_str()) {
            tracing::warn!("Assuming role '{}' which the console does not list", role);
        }
    }

    let response: AssumeRoleResponse = client.post_json("/assume_role", request).await?;
    client
        .session()
        .set_session(response.session_id.clone(), request.roles.clone())
        .await;
    tracing::info!(
        "Role assumed for {}: session {}",
        request.person_id,
        response.session_id
    );
    Ok(response)
}

/// Forget the current session (logout)
pub async fn end_session(client: &ApiClient) {
    client.session().clear().await;
}
