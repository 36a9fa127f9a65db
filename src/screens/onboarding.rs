//! First-run setup
//!
//! Registers the starter data contract and assumes the initial role so the
//! operator ends up with a working session.

use crate::api::ApiClient;
use crate::error::ConsoleResult;
use crate::screens::contracts::{register_contract, DataContract};
use crate::screens::role::{assume_role, AssumeRoleRequest};

#[derive(Debug, Clone)]
pub struct OnboardingRequest {
    pub company: String,
    /// Path of the root org unit, e.g. `Manufacturing/QA`
    pub root_unit: String,
    pub person_id: String,
    pub roles: Vec<String>,
    pub scope_ids: Vec<u32>,
}

impl Default for OnboardingRequest {
    fn default() -> Self {
        Self {
            company: "Acme Corp".to_string(),
            root_unit: "Manufacturing/QA".to_string(),
            person_id: "u1".to_string(),
            roles: vec!["QA-Inspector".to_string()],
            scope_ids: vec![1],
        }
    }
}

/// Contract every new company starts with
pub fn starter_contract() -> DataContract {
    DataContract {
        producer: "confluence".to_string(),
        schema_hash: "deadbeef".to_string(),
        pii_fields: vec!["email".to_string()],
    }
}

#[derive(Debug, Clone)]
pub struct OnboardingReport {
    pub session_id: String,
    pub contracts: usize,
}

pub async fn run(client: &ApiClient, request: &OnboardingRequest) -> ConsoleResult<OnboardingReport> {
    tracing::info!(
        "Onboarding {} with root unit {}",
        request.company,
        request.root_unit
    );

    let contracts = register_contract(client, starter_contract()).await?;
    let session = assume_role(
        client,
        &AssumeRoleRequest {
            person_id: request.person_id.clone(),
            roles: request.roles.clone(),
            scope_ids: request.scope_ids.clone(),
        },
    )
    .await?;

    Ok(OnboardingReport {
        session_id: session.session_id,
        contracts: contracts.len(),
    })
}
