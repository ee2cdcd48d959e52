//! Project structure tree: hierarchical ids and node types.

use std::collections::BTreeMap;
use std::str::FromStr;

use log::warn;
use serde::{Deserialize, Serialize};

/// Type-safe enumeration of structure node types.
///
/// The node type is the external tag that selects a task's
/// [`Details`](crate::models::Details) variant; payload shape never does.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Long-lived area of responsibility
    Area,

    /// Deliverable component within an area
    Component,

    /// Concrete, finishable unit of work
    Job,

    /// Unstructured node with a free-form body
    #[default]
    Freeform,
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "area" => Ok(NodeType::Area),
            "component" => Ok(NodeType::Component),
            "job" => Ok(NodeType::Job),
            "freeform" => Ok(NodeType::Freeform),
            _ => Err(format!("Invalid node type: {s}")),
        }
    }
}

impl NodeType {
    /// Display name used in the structure and task text formats.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Area => "Area",
            NodeType::Component => "Component",
            NodeType::Job => "Job",
            NodeType::Freeform => "Freeform",
        }
    }
}

/// A node in the project structure tree.
///
/// The `id` is a dot-segmented hierarchical path (for example `"1.2.3"`)
/// whose parent is the path with the last segment removed. Children are
/// stored unordered (string-keyed) and sorted numerically by segment for
/// display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StructureNode {
    /// Hierarchical path id
    pub id: String,

    /// Declared type of the node
    pub node_type: NodeType,

    /// Child nodes keyed by their full id
    #[serde(default)]
    pub children: BTreeMap<String, StructureNode>,
}

impl StructureNode {
    /// Creates a leaf node.
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            children: BTreeMap::new(),
        }
    }
}

/// The project structure tree: top-level nodes keyed by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StructureTree {
    /// Root-level nodes keyed by their full id
    #[serde(default)]
    pub roots: BTreeMap<String, StructureNode>,
}

/// Returns the parent id of a hierarchical id: the id with its last
/// dot-segment removed. Returns `None` for single-segment (root-level) ids.
pub fn parent_id(id: &str) -> Option<&str> {
    id.rfind('.').map(|pos| &id[..pos])
}

/// Orders dot-segmented ids numerically by segment, so `"1.2.10"` sorts
/// after `"1.2.3"` rather than between `"1.2.1"` and `"1.2.2"`.
pub fn compare_ids(a: &str, b: &str) -> std::cmp::Ordering {
    let segments = |id: &str| -> Vec<u64> {
        id.split('.')
            .map(|seg| seg.parse().unwrap_or(u64::MAX))
            .collect()
    };
    segments(a).cmp(&segments(b))
}

impl StructureTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no nodes exist.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Looks up a node anywhere in the tree by its full id.
    pub fn get(&self, id: &str) -> Option<&StructureNode> {
        fn search<'a>(
            nodes: &'a BTreeMap<String, StructureNode>,
            id: &str,
        ) -> Option<&'a StructureNode> {
            if let Some(node) = nodes.get(id) {
                return Some(node);
            }
            nodes.values().find_map(|node| search(&node.children, id))
        }
        search(&self.roots, id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut StructureNode> {
        fn search<'a>(
            nodes: &'a mut BTreeMap<String, StructureNode>,
            id: &str,
        ) -> Option<&'a mut StructureNode> {
            if nodes.contains_key(id) {
                return nodes.get_mut(id);
            }
            nodes
                .values_mut()
                .find_map(|node| search(&mut node.children, id))
        }
        search(&mut self.roots, id)
    }

    /// Resolves the declared type of the node with the given id.
    pub fn node_type(&self, id: &str) -> Option<NodeType> {
        self.get(id).map(|node| node.node_type)
    }

    /// Inserts a node, attaching it under the parent derived from its id.
    ///
    /// When the computed parent id is absent from the tree the node is
    /// inserted at the root level instead of being dropped. The fallback
    /// is silent at the API level; a warning is logged so hosts can
    /// surface it.
    pub fn insert(&mut self, node: StructureNode) {
        match parent_id(&node.id).map(|p| p.to_string()) {
            Some(parent) => {
                if let Some(parent_node) = self.get_mut(&parent) {
                    parent_node.children.insert(node.id.clone(), node);
                } else {
                    warn!(
                        "structure node {} has no parent {}; inserting at root level",
                        node.id, parent
                    );
                    self.roots.insert(node.id.clone(), node);
                }
            }
            None => {
                self.roots.insert(node.id.clone(), node);
            }
        }
    }

    /// Depth-first traversal in display order: children sorted numerically
    /// by segment. Yields each node with its depth.
    pub fn walk(&self) -> Vec<(&StructureNode, usize)> {
        fn visit<'a>(
            nodes: &'a BTreeMap<String, StructureNode>,
            depth: usize,
            out: &mut Vec<(&'a StructureNode, usize)>,
        ) {
            let mut ordered: Vec<&StructureNode> = nodes.values().collect();
            ordered.sort_by(|a, b| compare_ids(&a.id, &b.id));
            for node in ordered {
                out.push((node, depth));
                visit(&node.children, depth + 1, out);
            }
        }
        let mut out = Vec::new();
        visit(&self.roots, 0, &mut out);
        out
    }
}
