//! In-progress org unit edit

use super::index::HierarchyIndex;
use super::unit::UpsertUnitRequest;
use crate::error::{ConsoleResult, OptionExt};

/// Result of reading the comma separated parent list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedParents {
    pub parents: Vec<i64>,
    /// Non-blank tokens that are not integers; dropped from `parents`
    pub rejected: Vec<String>,
}

/// Split on commas, trim, keep the tokens that parse as integers
pub fn parse_parents(text: &str) -> ParsedParents {
    let mut parsed = ParsedParents::default();
    for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        match token.parse::<i64>() {
            Ok(id) => parsed.parents.push(id),
            Err(_) => parsed.rejected.push(token.to_string()),
        }
    }
    parsed
}

/// A request ready to send, plus the parent tokens that were dropped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpsertDraft {
    pub request: UpsertUnitRequest,
    pub rejected_parents: Vec<String>,
}

/// Edit form state: the fields exactly as the operator typed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditForm {
    pub selected_id: Option<i64>,
    pub id: String,
    pub name: String,
    pub parents_text: String,
}

impl EditForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the form from an existing unit.
    ///
    /// A stale selection (unit no longer in the index) records the selection
    /// but leaves the fields as they were. Returns whether the form was seeded.
    pub fn select_unit(&mut self, id: i64, index: &HierarchyIndex) -> bool {
        self.selected_id = Some(id);
        match index.get(id) {
            Some(unit) => {
                self.id = unit.id.to_string();
                self.name = unit.name.clone();
                self.parents_text = unit.parents_text();
                true
            }
            None => {
                tracing::debug!("Selected org unit {} is not in the current list", id);
                false
            }
        }
    }

    /// Build the upsert request from the current field values
    pub fn to_draft(&self) -> ConsoleResult<UpsertDraft> {
        let id = self
            .id
            .trim()
            .parse::<i64>()
            .ok()
            .ok_or_malformed(format!("unit id '{}' is not an integer", self.id.trim()))?;
        let ParsedParents { parents, rejected } = parse_parents(&self.parents_text);

        Ok(UpsertDraft {
            request: UpsertUnitRequest {
                id,
                name: self.name.clone(),
                parents,
            },
            rejected_parents: rejected,
        })
    }
}
