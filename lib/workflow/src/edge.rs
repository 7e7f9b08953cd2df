//! Edge types for workflow graphs.
//!
//! An edge carries data from a source node's output handle to a target node's
//! input handle. Handles are optional on the wire because documents may hold
//! edges drawn before ports existed; such edges never satisfy an input.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// An edge connecting two nodes in a workflow graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// The producing node.
    pub source: NodeId,
    /// The consuming node.
    pub target: NodeId,
    /// The output port name on the source node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    /// The input port name on the target node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Edge {
    /// Creates an edge between two nodes without port handles.
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    /// Sets both port handles.
    #[must_use]
    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = Some(source_handle.into());
        self.target_handle = Some(target_handle.into());
        self
    }

    /// Returns true if this edge feeds input `name` of node `node`.
    #[must_use]
    pub fn feeds(&self, node: &NodeId, name: &str) -> bool {
        self.target == *node && self.target_handle.as_deref() == Some(name)
    }
}

/// A connection the user is proposing in the editor, not yet part of the graph.
pub type Connection = Edge;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_with_handles() {
        let edge = Edge::new("a", "b").with_handles("Html", "Html");
        assert_eq!(edge.source.as_str(), "a");
        assert_eq!(edge.target.as_str(), "b");
        assert_eq!(edge.source_handle.as_deref(), Some("Html"));
        assert_eq!(edge.target_handle.as_deref(), Some("Html"));
    }

    #[test]
    fn feeds_matches_target_and_handle() {
        let edge = Edge::new("a", "b").with_handles("Web page", "Web page");
        let b = NodeId::from("b");
        assert!(edge.feeds(&b, "Web page"));
        assert!(!edge.feeds(&b, "Selector"));
        assert!(!edge.feeds(&NodeId::from("a"), "Web page"));
        assert!(!Edge::new("a", "b").feeds(&b, "Web page"));
    }

    #[test]
    fn edge_json_uses_camel_case_handles() {
        let edge: Edge = serde_json::from_value(serde_json::json!({
            "source": "1",
            "target": "2",
            "sourceHandle": "Web page",
            "targetHandle": "Web page"
        }))
        .expect("deserialize");
        assert_eq!(edge.target_handle.as_deref(), Some("Web page"));

        let bare = serde_json::to_value(Edge::new("1", "2")).expect("serialize");
        assert_eq!(bare, serde_json::json!({ "source": "1", "target": "2" }));
    }
}
