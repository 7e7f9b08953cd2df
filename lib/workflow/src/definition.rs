//! The editor's workflow document.
//!
//! A definition is what the graph editor saves: the nodes on the canvas, the
//! edges between their ports, and the viewport. Editing operations here keep
//! the document consistent with what the planner expects (one edge per input
//! handle, no cycles, matching port types).

use crate::connection::validate_connection;
use crate::edge::{Connection, Edge};
use crate::error::{GraphError, PlanError};
use crate::node::{Node, NodeId};
use crate::planner::{ExecutionPlan, compile};
use crate::task::{TaskRegistry, TaskType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Canvas position and zoom saved with the document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// A workflow graph as saved by the editor.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    /// Nodes in canvas order. Order matters for entry-point resolution.
    #[serde(default)]
    pub nodes: Vec<Node>,
    /// Edges in creation order.
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

impl WorkflowDefinition {
    /// Creates an empty definition.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a definition holding a single browser-launch node, the
    /// starting point of every new workflow.
    #[must_use]
    pub fn with_entry_point() -> Self {
        let mut definition = Self::new();
        definition.add_node(TaskType::LaunchBrowser);
        definition
    }

    /// Adds a node of the given task type and returns its generated ID.
    pub fn add_node(&mut self, task_type: TaskType) -> NodeId {
        let node = Node::new(task_type);
        let id = node.id.clone();
        self.nodes.push(node);
        id
    }

    /// Returns a node by ID.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == *id)
    }

    /// Removes a node and every edge touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let index = self.nodes.iter().position(|n| n.id == *id)?;
        self.edges.retain(|e| e.source != *id && e.target != *id);
        Some(self.nodes.remove(index))
    }

    /// Sets a literal input value on a node.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::NodeNotFound`] if the node does not exist.
    pub fn set_input(
        &mut self,
        id: &NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| n.id == *id)
            .ok_or_else(|| GraphError::NodeNotFound { node_id: id.clone() })?;
        node.inputs.insert(name.into(), value.into());
        Ok(())
    }

    /// Validates and commits a new edge.
    ///
    /// The target input's literal value is cleared, since the edge now
    /// provides it.
    ///
    /// # Errors
    ///
    /// Returns the reason the connection was refused; the document is left
    /// unchanged.
    pub fn connect<R>(&mut self, connection: Connection, registry: &R) -> Result<(), GraphError>
    where
        R: TaskRegistry + ?Sized,
    {
        validate_connection(&self.nodes, &self.edges, &connection, registry)?;

        let Some(handle) = connection.target_handle.clone() else {
            return Err(GraphError::MissingHandle {
                node_id: connection.target.clone(),
            });
        };
        if self
            .edges
            .iter()
            .any(|e| e.feeds(&connection.target, &handle))
        {
            return Err(GraphError::TargetAlreadyConnected {
                node_id: connection.target.clone(),
                port_name: handle,
            });
        }

        if let Some(target) = self.nodes.iter_mut().find(|n| n.id == connection.target) {
            target.inputs.insert(handle.clone(), String::new());
        }

        debug!(
            source = %connection.source,
            target = %connection.target,
            handle = %handle,
            "edge added"
        );
        self.edges.push(connection);
        Ok(())
    }

    /// Removes the edge from `source` feeding `target_handle` on `target`, if
    /// any.
    pub fn disconnect(
        &mut self,
        source: &NodeId,
        target: &NodeId,
        target_handle: &str,
    ) -> Option<Edge> {
        let index = self
            .edges
            .iter()
            .position(|e| e.source == *source && e.feeds(target, target_handle))?;
        Some(self.edges.remove(index))
    }

    /// Compiles the document into an execution plan.
    ///
    /// # Errors
    ///
    /// See [`compile`].
    pub fn compile<R>(&self, registry: &R) -> Result<ExecutionPlan, PlanError>
    where
        R: TaskRegistry + ?Sized,
    {
        compile(&self.nodes, &self.edges, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskCatalog;

    fn web_page(source: &NodeId, target: &NodeId) -> Edge {
        Edge::new(source.clone(), target.clone()).with_handles("Web page", "Web page")
    }

    #[test]
    fn new_workflow_starts_with_entry_point() {
        let definition = WorkflowDefinition::with_entry_point();
        assert_eq!(definition.nodes.len(), 1);
        assert_eq!(definition.nodes[0].task_type, "LAUNCH_BROWSER");
    }

    #[test]
    fn build_and_compile() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::with_entry_point();
        let launch = definition.nodes[0].id.clone();
        definition
            .set_input(&launch, "Website URL", "https://example.com")
            .expect("node exists");
        let html = definition.add_node(TaskType::PageToHtml);
        definition
            .connect(web_page(&launch, &html), &catalog)
            .expect("valid connection");

        let plan = definition.compile(&catalog).expect("plan");
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.phase_of(&html), Some(2));
    }

    #[test]
    fn connect_clears_target_literal() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::new();
        let html = definition.add_node(TaskType::PageToHtml);
        let text = definition.add_node(TaskType::ExtractTextFromElement);
        definition
            .set_input(&text, "Html", "<p>typed</p>")
            .expect("node exists");

        definition
            .connect(
                Edge::new(html.clone(), text.clone()).with_handles("Html", "Html"),
                &catalog,
            )
            .expect("valid connection");

        let node = definition.node(&text).expect("node exists");
        assert_eq!(node.literal("Html"), None);
    }

    #[test]
    fn connect_rejects_second_edge_into_same_input() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::new();
        let first = definition.add_node(TaskType::LaunchBrowser);
        let second = definition.add_node(TaskType::LaunchBrowser);
        let click = definition.add_node(TaskType::ClickElement);

        definition
            .connect(web_page(&first, &click), &catalog)
            .expect("first edge");
        let err = definition
            .connect(web_page(&second, &click), &catalog)
            .unwrap_err();
        assert!(matches!(err, GraphError::TargetAlreadyConnected { .. }));
        assert_eq!(definition.edges.len(), 1);
    }

    #[test]
    fn connect_without_target_handle_is_rejected() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::with_entry_point();
        let launch = definition.nodes[0].id.clone();
        let click = definition.add_node(TaskType::ClickElement);

        let mut edge = web_page(&launch, &click);
        edge.target_handle = None;
        let err = definition.connect(edge, &catalog).unwrap_err();
        assert!(matches!(err, GraphError::MissingHandle { .. }));
        assert!(definition.edges.is_empty());
    }

    #[test]
    fn connect_rejects_cycle_and_leaves_document_unchanged() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::new();
        let a = definition.add_node(TaskType::ClickElement);
        let b = definition.add_node(TaskType::ClickElement);
        definition.connect(web_page(&a, &b), &catalog).expect("a -> b");

        let before = definition.clone();
        let err = definition.connect(web_page(&b, &a), &catalog).unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { .. }));
        assert_eq!(definition, before);
    }

    #[test]
    fn remove_node_drops_its_edges() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::with_entry_point();
        let launch = definition.nodes[0].id.clone();
        let click = definition.add_node(TaskType::ClickElement);
        definition
            .connect(web_page(&launch, &click), &catalog)
            .expect("valid connection");

        assert!(definition.remove_node(&click).is_some());
        assert!(definition.edges.is_empty());
        assert!(definition.remove_node(&click).is_none());
    }

    #[test]
    fn disconnect_removes_edge() {
        let catalog = TaskCatalog::builtin();
        let mut definition = WorkflowDefinition::with_entry_point();
        let launch = definition.nodes[0].id.clone();
        let click = definition.add_node(TaskType::ClickElement);
        definition
            .connect(web_page(&launch, &click), &catalog)
            .expect("valid connection");

        assert!(definition.disconnect(&click, &click, "Web page").is_none());
        assert_eq!(definition.edges.len(), 1);
        assert!(definition.disconnect(&launch, &click, "Web page").is_some());
        assert!(definition.disconnect(&launch, &click, "Web page").is_none());
    }

    #[test]
    fn set_input_on_missing_node() {
        let mut definition = WorkflowDefinition::new();
        let err = definition
            .set_input(&NodeId::from("ghost"), "URL", "x")
            .unwrap_err();
        assert_eq!(
            err,
            GraphError::NodeNotFound {
                node_id: NodeId::from("ghost")
            }
        );
    }

    #[test]
    fn editor_document_parses() {
        let json = serde_json::json!({
            "nodes": [
                { "id": "1", "taskType": "LAUNCH_BROWSER", "inputs": { "Website URL": "https://x.com" } },
                { "id": "2", "taskType": "PAGE_TO_HTML", "inputs": {} }
            ],
            "edges": [
                { "id": "e1", "source": "1", "target": "2", "sourceHandle": "Web page", "targetHandle": "Web page" }
            ],
            "viewport": { "x": 10.0, "y": -4.5, "zoom": 0.8 }
        });
        let definition: WorkflowDefinition = serde_json::from_value(json).expect("deserialize");
        assert_eq!(definition.nodes.len(), 2);
        assert_eq!(definition.viewport.map(|v| v.zoom), Some(0.8));

        let plan = definition.compile(&TaskCatalog::builtin()).expect("plan");
        assert_eq!(plan.node_count(), 2);
    }
}
