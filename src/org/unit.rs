//! Organizational unit wire types

use serde::{Deserialize, Deserializer, Serialize};

/// A named node in the governance hierarchy
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrgUnit {
    pub id: i64,
    pub name: String,
    /// Parent unit ids in the order the service returned them; empty for a root
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parent_ids: Vec<i64>,
}

impl OrgUnit {
    pub fn new(id: i64, name: impl Into<String>, parent_ids: Vec<i64>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_ids,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    /// Parent ids as the comma separated text the edit form shows
    pub fn parents_text(&self) -> String {
        self.parent_ids
            .iter()
            .map(|p| p.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<i64>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of `POST /org/units/upsert`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertUnitRequest {
    pub id: i64,
    pub name: String,
    pub parents: Vec<i64>,
}
