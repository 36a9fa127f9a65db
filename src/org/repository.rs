//! Org unit endpoints of the governance service

use async_trait::async_trait;

use super::unit::{OrgUnit, UpsertUnitRequest};
use crate::api::ApiClient;
use crate::error::ConsoleResult;

pub const UNITS_PATH: &str = "/org/units";
pub const UPSERT_PATH: &str = "/org/units/upsert";

/// Source of the flat unit list and sink for single-unit edits.
///
/// Whether an upsert creates or updates is decided by the service.
#[async_trait]
pub trait UnitRepository: Send + Sync {
    async fn list_units(&self) -> ConsoleResult<Vec<OrgUnit>>;

    async fn upsert_unit(&self, request: &UpsertUnitRequest) -> ConsoleResult<()>;
}

/// [`UnitRepository`] over HTTP
#[derive(Clone)]
pub struct HttpUnitRepository {
    client: ApiClient,
}

impl HttpUnitRepository {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UnitRepository for HttpUnitRepository {
    async fn list_units(&self) -> ConsoleResult<Vec<OrgUnit>> {
        let units: Vec<OrgUnit> = self.client.get_json(UNITS_PATH).await?;
        tracing::debug!("Fetched {} org units", units.len());
        Ok(units)
    }

    async fn upsert_unit(&self, request: &UpsertUnitRequest) -> ConsoleResult<()> {
        self.client.post(UPSERT_PATH, request).await?;
        tracing::info!("Upserted org unit {} ({})", request.id, request.name);
        Ok(())
    }
}
