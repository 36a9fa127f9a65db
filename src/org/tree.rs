//! Depth-first rendering of the unit hierarchy
//!
//! A unit with several parents is rendered once under each of them. The walk
//! keeps the set of ids on the current root-to-node path and never descends
//! into an id that is already on it, so cyclic parent declarations terminate.

use std::collections::HashSet;

use super::index::HierarchyIndex;
use crate::config::TreeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Number of levels rendered below and including the roots
    pub max_depth: usize,
    /// Total nodes rendered across the whole forest
    pub max_nodes: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self::from(&TreeConfig::default())
    }
}

impl From<&TreeConfig> for TreeOptions {
    fn from(config: &TreeConfig) -> Self {
        Self {
            max_depth: config.max_depth.max(1),
            max_nodes: config.max_nodes.max(1),
        }
    }
}

/// One (unit, path) occurrence in the rendered forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub id: i64,
    pub name: String,
    pub depth: usize,
    pub children: Vec<TreeNode>,
    /// Some children were left out because of a cycle, the depth limit or
    /// the node budget
    pub truncated: bool,
}

impl TreeNode {
    pub fn label(&self) -> String {
        format!("{} (id:{})", self.name, self.id)
    }

    /// Nodes in this subtree, including self
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::count).sum::<usize>()
    }
}

/// Walk state shared by every branch of one forest
struct Walk<'a> {
    index: &'a HierarchyIndex,
    options: &'a TreeOptions,
    path: HashSet<i64>,
    /// Nodes that may still be rendered
    budget: usize,
}

/// Render every root of `index` into a nested forest
pub fn build_forest(index: &HierarchyIndex, options: &TreeOptions) -> Vec<TreeNode> {
    let mut walk = Walk {
        index,
        options,
        path: HashSet::new(),
        budget: options.max_nodes,
    };

    let mut forest = Vec::new();
    for root in index.roots() {
        if walk.budget == 0 {
            tracing::warn!(
                "Node budget {} exhausted, remaining roots not rendered",
                options.max_nodes
            );
            break;
        }
        if let Some(node) = walk.node(root.id, 0) {
            forest.push(node);
        }
    }
    forest
}

impl Walk<'_> {
    fn node(&mut self, id: i64, depth: usize) -> Option<TreeNode> {
        // Dangling child reference: nothing to render
        let unit = self.index.get(id)?;
        self.budget -= 1;

        let mut node = TreeNode {
            id,
            name: unit.name.clone(),
            depth,
            children: Vec::new(),
            truncated: false,
        };

        let child_ids = self.index.children(id);
        if child_ids.is_empty() {
            return Some(node);
        }
        if depth + 1 >= self.options.max_depth {
            tracing::debug!(
                "Depth limit {} reached below unit {}",
                self.options.max_depth,
                id
            );
            node.truncated = true;
            return Some(node);
        }

        self.path.insert(id);
        for &child in child_ids {
            if self.path.contains(&child) {
                tracing::debug!("Cycle: unit {} is already an ancestor of unit {}", child, id);
                node.truncated = true;
                continue;
            }
            if self.budget == 0 {
                node.truncated = true;
                break;
            }
            if let Some(child_node) = self.node(child, depth + 1) {
                node.children.push(child_node);
            }
        }
        self.path.remove(&id);

        Some(node)
    }
}

/// Plain indented outline of the forest, one label per line
pub fn render_outline(forest: &[TreeNode]) -> String {
    let mut out = String::new();
    for node in forest {
        write_node(&mut out, node);
    }
    out
}

fn write_node(out: &mut String, node: &TreeNode) {
    out.push_str(&"  ".repeat(node.depth));
    out.push_str(&node.label());
    if node.truncated {
        out.push_str(" …");
    }
    out.push('\n');
    for child in &node.children {
        write_node(out, child);
    }
}
