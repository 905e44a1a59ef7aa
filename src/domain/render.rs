//! Outline rendering of a parsed node collection.

use std::collections::{HashMap, HashSet};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use termtree::Tree;
use tracing::{instrument, warn};

use crate::domain::arena::{Node, NodeCollection, NodeId};
use crate::domain::error::{DomainError, DomainResult};

pub const DEFAULT_MARKER: char = '-';

/// Order in which siblings are emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    /// Input order, left to right
    #[default]
    Document,
    /// Sorted by (depth, name) before traversal
    Alphabetical,
}

/// Parent to children lookup, built once per render.
struct ChildIndex {
    roots: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
}

impl ChildIndex {
    fn build<'a>(
        nodes: &NodeCollection,
        candidates: impl Iterator<Item = &'a Node>,
    ) -> DomainResult<Self> {
        let mut roots = Vec::new();
        let mut children: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for node in candidates {
            match node.parent {
                None => roots.push(node.id),
                Some(parent) if nodes.contains(parent) => {
                    children.entry(parent).or_default().push(node.id)
                }
                Some(parent) => {
                    return Err(DomainError::MissingParent {
                        name: node.name.clone(),
                        parent: format!("{:?}", parent),
                    })
                }
            }
        }
        Ok(Self { roots, children })
    }

    fn children(&self, id: NodeId) -> &[NodeId] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Renders node collections as depth-prefixed outlines.
#[derive(Debug, Clone)]
pub struct Renderer {
    marker: char,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl Renderer {
    pub fn new(marker: char) -> Self {
        Self { marker }
    }

    /// One outline line per node, in strict pre-order.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn render(&self, nodes: &NodeCollection, order: OrderMode) -> DomainResult<Vec<String>> {
        let lines = self
            .traverse(nodes, order)?
            .into_iter()
            .filter_map(|id| nodes.get(id))
            .map(|node| self.render_line(node))
            .collect();
        Ok(lines)
    }

    /// `depth` markers, then the name; a space separates them below the top level.
    pub fn render_line(&self, node: &Node) -> String {
        let prefix: String = std::iter::repeat(self.marker).take(node.depth).collect();
        if node.depth == 0 {
            format!("{}{}", prefix, node.name)
        } else {
            format!("{} {}", prefix, node.name)
        }
    }

    /// Box-drawing tree below a synthetic `label` root.
    #[instrument(level = "debug", skip(self, nodes))]
    pub fn to_tree(
        &self,
        nodes: &NodeCollection,
        order: OrderMode,
        label: &str,
    ) -> DomainResult<Tree<String>> {
        let index = self.index(nodes, order)?;

        fn build_tree(nodes: &NodeCollection, index: &ChildIndex, id: NodeId) -> Tree<String> {
            let name = nodes.get(id).map(|n| n.name.clone()).unwrap_or_default();
            let leaves: Vec<_> = index
                .children(id)
                .iter()
                .map(|&child| build_tree(nodes, index, child))
                .collect();
            Tree::new(name).with_leaves(leaves)
        }

        let leaves: Vec<_> = index
            .roots
            .iter()
            .map(|&root| build_tree(nodes, &index, root))
            .collect();
        Ok(Tree::new(label.to_string()).with_leaves(leaves))
    }

    fn index(&self, nodes: &NodeCollection, order: OrderMode) -> DomainResult<ChildIndex> {
        match order {
            OrderMode::Document => ChildIndex::build(nodes, nodes.iter()),
            OrderMode::Alphabetical => ChildIndex::build(
                nodes,
                nodes
                    .iter()
                    .sorted_by(|a, b| (a.depth, &a.name).cmp(&(b.depth, &b.name))),
            ),
        }
    }

    /// Node ids in output order.
    ///
    /// Children are pushed in reverse so the stack pops them left to right.
    fn traverse(&self, nodes: &NodeCollection, order: OrderMode) -> DomainResult<Vec<NodeId>> {
        let index = self.index(nodes, order)?;
        let mut visited = HashSet::with_capacity(nodes.len());
        let mut output = Vec::with_capacity(nodes.len());
        let mut stack: Vec<NodeId> = index.roots.iter().rev().copied().collect();

        while let Some(current) = stack.pop() {
            // each id sits in exactly one child list, so this only fires on a corrupt index
            if !visited.insert(current) {
                warn!("node {:?} reached twice, skipping", current);
                continue;
            }
            output.push(current);
            for &child in index.children(current).iter().rev() {
                stack.push(child);
            }
        }

        if output.len() != nodes.len() {
            return Err(DomainError::Unreachable {
                count: nodes.len() - output.len(),
            });
        }
        Ok(output)
    }
}

/// Render with the default `-` marker.
pub fn render(nodes: &NodeCollection, order: OrderMode) -> DomainResult<Vec<String>> {
    Renderer::default().render(nodes, order)
}
