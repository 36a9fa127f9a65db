//! Organizational unit hierarchy
//!
//! Units form a general directed graph: a unit may declare several parents,
//! parents may be missing from the list, and nothing rules out cycles. This
//! module turns the flat list into a navigable forest and drives edits.

pub mod form;
pub mod index;
pub mod repository;
pub mod screen;
pub mod tree;
pub mod unit;

pub use form::{parse_parents, EditForm, ParsedParents, UpsertDraft};
pub use index::HierarchyIndex;
pub use repository::{HttpUnitRepository, UnitRepository};
pub use screen::{LoadOutcome, LoadTicket, OrgUnitsScreen, ScreenState};
pub use tree::{build_forest, render_outline, TreeNode, TreeOptions};
pub use unit::{OrgUnit, UpsertUnitRequest};
