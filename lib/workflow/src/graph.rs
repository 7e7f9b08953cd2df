//! Dependency view over a workflow's nodes and edges.
//!
//! Built on petgraph's `DiGraphMap`, keyed by node id. Edges whose source or
//! target is not among the nodes are ignored, and parallel edges between the
//! same pair of nodes collapse into one dependency.

use crate::edge::Edge;
use crate::node::Node;
use petgraph::Direction;
use petgraph::graphmap::DiGraphMap;
use std::collections::HashSet;

/// A read-only directed graph of node-to-node dependencies.
#[derive(Debug, Clone)]
pub struct DependencyGraph<'a> {
    graph: DiGraphMap<&'a str, ()>,
    ids: HashSet<&'a str>,
}

impl<'a> DependencyGraph<'a> {
    /// Builds the dependency graph for `nodes` and `edges`.
    #[must_use]
    pub fn new(nodes: &'a [Node], edges: &'a [Edge]) -> Self {
        let mut graph = DiGraphMap::with_capacity(nodes.len(), edges.len());
        let mut ids = HashSet::with_capacity(nodes.len());

        for node in nodes {
            let id = node.id.as_str();
            ids.insert(id);
            graph.add_node(id);
        }

        for edge in edges {
            let (source, target) = (edge.source.as_str(), edge.target.as_str());
            if ids.contains(source) && ids.contains(target) {
                graph.add_edge(source, target, ());
            }
        }

        Self { graph, ids }
    }

    /// Returns the number of distinct node ids.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the distinct nodes with an edge into `id`, in edge order.
    pub fn incomers(&self, id: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.neighbors(id, Direction::Incoming)
    }

    /// Returns the distinct nodes `id` has an edge to, in edge order.
    pub fn outgoers(&self, id: &str) -> impl Iterator<Item = &'a str> + '_ {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> impl Iterator<Item = &'a str> + '_ {
        self.ids
            .get(id)
            .copied()
            .into_iter()
            .flat_map(move |key| self.graph.neighbors_directed(key, direction))
    }
}
