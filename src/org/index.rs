//! Lookup structures derived from the flat unit list
//!
//! The index is rebuilt from scratch whenever the list changes; there is no
//! incremental maintenance.

use std::collections::{HashMap, HashSet, VecDeque};

use super::unit::OrgUnit;

/// `by_id` and `children_of` views over one snapshot of the unit list
#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    units: Vec<OrgUnit>,
    /// Position in `units`; a later duplicate id overwrites an earlier one
    by_id: HashMap<i64, usize>,
    children_of: HashMap<i64, Vec<i64>>,
}

impl HierarchyIndex {
    pub fn build(units: Vec<OrgUnit>) -> Self {
        let mut by_id = HashMap::with_capacity(units.len());
        let mut children_of: HashMap<i64, Vec<i64>> = HashMap::new();

        for (pos, unit) in units.iter().enumerate() {
            if by_id.insert(unit.id, pos).is_some() {
                tracing::debug!("Duplicate org unit id {}, keeping the later record", unit.id);
            }
            // Dangling parents still get an entry; they are just never reached
            for &parent in &unit.parent_ids {
                children_of.entry(parent).or_default().push(unit.id);
            }
        }

        Self {
            units,
            by_id,
            children_of,
        }
    }

    pub fn units(&self) -> &[OrgUnit] {
        &self.units
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&OrgUnit> {
        self.by_id.get(&id).map(|&pos| &self.units[pos])
    }

    /// Ids of units declaring `parent` as a parent, in list order
    pub fn children(&self, parent: i64) -> &[i64] {
        self.children_of
            .get(&parent)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Units without parents, in the order the service returned them
    pub fn roots(&self) -> Vec<&OrgUnit> {
        self.units.iter().filter(|u| u.is_root()).collect()
    }

    /// Units no root can reach: cycle members and units below dangling parents
    pub fn unreachable(&self) -> Vec<i64> {
        let mut visited: HashSet<i64> = HashSet::with_capacity(self.units.len());
        let mut queue: VecDeque<i64> = self.roots().iter().map(|u| u.id).collect();

        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            queue.extend(self.children(id).iter().copied());
        }

        let mut seen = HashSet::new();
        self.units
            .iter()
            .map(|u| u.id)
            .filter(|id| !visited.contains(id) && seen.insert(*id))
            .collect()
    }
}
