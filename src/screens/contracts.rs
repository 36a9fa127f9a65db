//! Data contract screen

use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::error::{ConsoleError, ConsoleResult};

const CONTRACTS: &str = "/contracts";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataContract {
    pub producer: String,
    pub schema_hash: String,
    #[serde(default)]
    pub pii_fields: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterContractRequest {
    pub contract: DataContract,
}

/// Split a comma separated PII field list, dropping blanks
pub fn parse_pii_fields(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// GET /contracts
pub async fn list_contracts(client: &ApiClient) -> ConsoleResult<Vec<DataContract>> {
    client.get_json(CONTRACTS).await
}

/// POST /contracts, then reload the table
pub async fn register_contract(
    client: &ApiClient,
    contract: DataContract,
) -> ConsoleResult<Vec<DataContract>> {
    if contract.producer.trim().is_empty() {
        return Err(ConsoleError::MalformedInput(
            "producer must not be empty".to_string(),
        ));
    }
    let producer = contract.producer.clone();
    client
        .post(CONTRACTS, &RegisterContractRequest { contract })
        .await?;
    tracing::info!("Registered data contract for {}", producer);
    list_contracts(client).await
}

/// Table rows: producer, schema hash, PII fields
pub fn table_rows(contracts: &[DataContract]) -> Vec<[String; 3]> {
    contracts
        .iter()
        .map(|c| {
            [
                c.producer.clone(),
                c.schema_hash.clone(),
                c.pii_fields.join(", "),
            ]
        })
        .collect()
}
