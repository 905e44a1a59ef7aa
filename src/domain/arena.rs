//! Arena-backed node storage for parsed field hierarchies.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

/// Identity of a node: its slot in the owning [`NodeCollection`].
pub type NodeId = Index;

/// One field name found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Arena index assigned at creation
    pub id: NodeId,
    /// Field name as written, whitespace removed
    pub name: String,
    /// Nesting level, 0 for members of the outer group
    pub depth: usize,
    /// Anchor of the enclosing group, None for depth 0
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Flat, parent-referencing node storage.
///
/// Nodes live in a generational arena; a separate id list records creation
/// order, which is the document order used for rendering. Nodes are never
/// removed individually, only all at once via [`NodeCollection::clear`].
#[derive(Debug, Default)]
pub struct NodeCollection {
    arena: Arena<Node>,
    order: Vec<NodeId>,
}

impl NodeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node, checking it against its parent.
    ///
    /// The parent id must resolve to a live slot of this arena and sit exactly
    /// one level above `depth`; a parentless node must be at depth 0. An id
    /// taken from another collection is only caught when its slot and
    /// generation are not live here.
    #[instrument(level = "trace", skip(self))]
    pub fn push(
        &mut self,
        name: &str,
        depth: usize,
        parent: Option<NodeId>,
    ) -> DomainResult<NodeId> {
        match parent {
            Some(parent_id) => {
                let parent_node =
                    self.arena
                        .get(parent_id)
                        .ok_or_else(|| DomainError::MissingParent {
                            name: name.to_string(),
                            parent: format!("{:?}", parent_id),
                        })?;
                if parent_node.depth + 1 != depth {
                    return Err(DomainError::DepthMismatch {
                        name: name.to_string(),
                        depth,
                        parent_depth: parent_node.depth,
                    });
                }
            }
            None if depth != 0 => {
                return Err(DomainError::OrphanNode {
                    name: name.to_string(),
                    depth,
                });
            }
            None => {}
        }

        let id = self.arena.insert_with(|id| Node {
            id,
            name: name.to_string(),
            depth,
            parent,
        });
        self.order.push(id);
        Ok(id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in creation (document) order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(move |&id| self.arena.get(id))
    }

    /// Depth-0 nodes in document order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.iter().filter(|n| n.is_root()).map(|n| n.id).collect()
    }

    /// Direct children of `id` in document order.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        self.iter()
            .filter(|n| n.parent == Some(id))
            .map(|n| n.id)
            .collect()
    }

    /// Deepest nesting level plus one, 0 for an empty collection.
    pub fn levels(&self) -> usize {
        self.iter().map(|n| n.depth + 1).max().unwrap_or(0)
    }

    /// Nodes without children.
    pub fn leaf_nodes(&self) -> Vec<&Node> {
        self.iter()
            .filter(|n| !self.iter().any(|c| c.parent == Some(n.id)))
            .collect()
    }

    /// Append a node without any linkage checks, to build broken collections.
    #[cfg(test)]
    pub(crate) fn push_unchecked(
        &mut self,
        name: &str,
        depth: usize,
        parent: impl FnOnce(NodeId) -> Option<NodeId>,
    ) -> NodeId {
        let id = self.arena.insert_with(|id| Node {
            id,
            name: name.to_string(),
            depth,
            parent: parent(id),
        });
        self.order.push(id);
        id
    }

    /// Drop every node and the order bookkeeping.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.order.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_nested_pushes_when_querying_then_links_are_kept() {
        let mut nodes = NodeCollection::new();
        let employee = nodes.push("employee", 0, None).unwrap();
        let id = nodes.push("id", 1, Some(employee)).unwrap();
        let location = nodes.push("location", 0, None).unwrap();

        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes.roots(), vec![employee, location]);
        assert_eq!(nodes.children_of(employee), vec![id]);
        assert_eq!(nodes.get(id).unwrap().parent, Some(employee));
        assert_eq!(nodes.levels(), 2);
        let leaves: Vec<_> = nodes.leaf_nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(leaves, vec!["id", "location"]);
    }

    #[test]
    fn given_parent_from_other_collection_when_pushing_then_invariant_error() {
        let mut other = NodeCollection::new();
        other.push("a", 0, None).unwrap();
        let foreign = other.push("b", 0, None).unwrap();

        let mut nodes = NodeCollection::new();
        nodes.push("x", 0, None).unwrap();
        let result = nodes.push("y", 1, Some(foreign));

        let err = result.unwrap_err();
        assert!(err.is_internal());
        assert!(matches!(err, DomainError::MissingParent { .. }));
    }

    #[test]
    fn given_wrong_depth_when_pushing_then_depth_mismatch() {
        let mut nodes = NodeCollection::new();
        let a = nodes.push("a", 0, None).unwrap();

        let err = nodes.push("b", 2, Some(a)).unwrap_err();

        assert_eq!(
            err,
            DomainError::DepthMismatch {
                name: "b".into(),
                depth: 2,
                parent_depth: 0
            }
        );
    }

    #[test]
    fn given_parentless_nested_node_when_pushing_then_orphan_error() {
        let mut nodes = NodeCollection::new();
        let err = nodes.push("b", 1, None).unwrap_err();
        assert!(matches!(err, DomainError::OrphanNode { depth: 1, .. }));
    }

    #[test]
    fn given_filled_collection_when_clearing_then_empty() {
        let mut nodes = NodeCollection::new();
        let a = nodes.push("a", 0, None).unwrap();
        nodes.push("b", 1, Some(a)).unwrap();

        nodes.clear();

        assert!(nodes.is_empty());
        assert!(!nodes.contains(a));
        assert!(nodes.roots().is_empty());
    }
}
