//! Error types for the workflow crate.
//!
//! Errors are designed for layered context using rootcause:
//! - `PlanError`: Structured compile outcome for graphs that cannot be planned
//! - `GraphError`: Editor graph operations (nodes, ports, proposed edges)
//! - `WorkflowError`: Workflow lifecycle operations (draft/publish)
//!
//! None of these carry I/O context; callers that load documents from disk or
//! the network add it with `.context()`.

use crate::node::NodeId;
use crate::port::PortType;
use crate::workflow::WorkflowStatus;
use serde::{Deserialize, Serialize};
use std::fmt;
use taskflow_core::WorkflowId;

/// A node whose inputs cannot be satisfied, with the offending input names in
/// declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidElement {
    pub node_id: NodeId,
    pub inputs: Vec<String>,
}

impl InvalidElement {
    #[must_use]
    pub fn new(node_id: NodeId, inputs: Vec<String>) -> Self {
        Self { node_id, inputs }
    }
}

/// Why a graph could not be turned into an execution plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanError {
    /// No node's task type is flagged as an entry point.
    NoEntryPoint,
    /// Some nodes have inputs that can never be satisfied.
    #[serde(rename_all = "camelCase")]
    InvalidInputs { invalid_elements: Vec<InvalidElement> },
    /// Some nodes never became schedulable (cycles or dependencies on nodes
    /// that are themselves never scheduled).
    #[serde(rename_all = "camelCase")]
    UnreachableNodes { node_ids: Vec<NodeId> },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEntryPoint => write!(f, "no entry point found"),
            Self::InvalidInputs { invalid_elements } => {
                write!(f, "invalid inputs found:")?;
                for element in invalid_elements {
                    write!(
                        f,
                        " node {} missing [{}];",
                        element.node_id,
                        element.inputs.join(", ")
                    )?;
                }
                Ok(())
            }
            Self::UnreachableNodes { node_ids } => {
                let ids: Vec<_> = node_ids.iter().map(NodeId::as_str).collect();
                write!(f, "unreachable nodes: {}", ids.join(", "))
            }
        }
    }
}

impl std::error::Error for PlanError {}

/// Errors from editor graph operations.
///
/// Every rejection of a proposed connection maps to one variant, so the
/// editor can explain why an edge was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Node with the given ID was not found in the graph.
    NodeNotFound { node_id: NodeId },
    /// The node's task type is not registered.
    UnknownTaskType { node_id: NodeId, task_type: String },
    /// The proposed edge starts and ends at the same node.
    SelfLoop { node_id: NodeId },
    /// The proposed edge does not name a handle on one of its ends.
    MissingHandle { node_id: NodeId },
    /// Source port not found on node.
    SourcePortNotFound { node_id: NodeId, port_name: String },
    /// Target port not found on node.
    TargetPortNotFound { node_id: NodeId, port_name: String },
    /// Target port accepts literal values only.
    TargetNotConnectable { node_id: NodeId, port_name: String },
    /// Target port already has an incoming edge.
    TargetAlreadyConnected { node_id: NodeId, port_name: String },
    /// Output and input port types differ.
    IncompatiblePorts {
        source_node: NodeId,
        source_type: PortType,
        target_node: NodeId,
        target_type: PortType,
    },
    /// The proposed edge would close a cycle or reconverge on an existing path.
    CycleDetected { source_node: NodeId, target_node: NodeId },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeNotFound { node_id } => {
                write!(f, "node not found: {node_id}")
            }
            Self::UnknownTaskType { node_id, task_type } => {
                write!(f, "node {node_id} has unknown task type '{task_type}'")
            }
            Self::SelfLoop { node_id } => {
                write!(f, "node {node_id} cannot be connected to itself")
            }
            Self::MissingHandle { node_id } => {
                write!(f, "connection to node {node_id} names no port")
            }
            Self::SourcePortNotFound { node_id, port_name } => {
                write!(f, "source port '{port_name}' not found on node {node_id}")
            }
            Self::TargetPortNotFound { node_id, port_name } => {
                write!(f, "target port '{port_name}' not found on node {node_id}")
            }
            Self::TargetNotConnectable { node_id, port_name } => {
                write!(f, "input '{port_name}' on node {node_id} accepts literal values only")
            }
            Self::TargetAlreadyConnected { node_id, port_name } => {
                write!(f, "input '{port_name}' on node {node_id} is already connected")
            }
            Self::IncompatiblePorts {
                source_node,
                source_type,
                target_node,
                target_type,
            } => {
                write!(
                    f,
                    "incompatible ports: {source_node} ({source_type}) -> {target_node} ({target_type})"
                )
            }
            Self::CycleDetected {
                source_node,
                target_node,
            } => {
                write!(
                    f,
                    "connecting {source_node} -> {target_node} would create a cycle"
                )
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// Errors from workflow lifecycle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// The requested status change is not allowed from the current status.
    InvalidStateTransition {
        workflow_id: WorkflowId,
        from: WorkflowStatus,
        to: WorkflowStatus,
    },
    /// The workflow graph could not be planned.
    InvalidPlan {
        workflow_id: WorkflowId,
        error: PlanError,
    },
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidStateTransition {
                workflow_id,
                from,
                to,
            } => {
                write!(
                    f,
                    "workflow {workflow_id}: invalid state transition from {from} to {to}"
                )
            }
            Self::InvalidPlan { workflow_id, error } => {
                write!(f, "workflow {workflow_id} cannot be planned: {error}")
            }
        }
    }
}

impl std::error::Error for WorkflowError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_entry_point_json() {
        let json = serde_json::to_value(PlanError::NoEntryPoint).expect("serialize");
        assert_eq!(json, json!({ "type": "NO_ENTRY_POINT" }));
    }

    #[test]
    fn invalid_inputs_json() {
        let err = PlanError::InvalidInputs {
            invalid_elements: vec![InvalidElement::new(
                NodeId::from("1"),
                vec!["Website URL".to_string()],
            )],
        };
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(
            json,
            json!({
                "type": "INVALID_INPUTS",
                "invalidElements": [{ "nodeId": "1", "inputs": ["Website URL"] }]
            })
        );
        let parsed: PlanError = serde_json::from_value(json).expect("deserialize");
        assert_eq!(parsed, err);
    }

    #[test]
    fn unreachable_nodes_json() {
        let err = PlanError::UnreachableNodes {
            node_ids: vec![NodeId::from("b"), NodeId::from("c")],
        };
        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(
            json,
            json!({ "type": "UNREACHABLE_NODES", "nodeIds": ["b", "c"] })
        );
    }

    #[test]
    fn plan_error_display() {
        let err = PlanError::InvalidInputs {
            invalid_elements: vec![InvalidElement::new(
                NodeId::from("2"),
                vec!["Html".to_string(), "Selector".to_string()],
            )],
        };
        assert!(err.to_string().contains("node 2 missing [Html, Selector]"));
        assert_eq!(PlanError::NoEntryPoint.to_string(), "no entry point found");
    }

    #[test]
    fn graph_error_display() {
        let err = GraphError::IncompatiblePorts {
            source_node: NodeId::from("a"),
            source_type: PortType::String,
            target_node: NodeId::from("b"),
            target_type: PortType::BrowserInstance,
        };
        assert_eq!(
            err.to_string(),
            "incompatible ports: a (STRING) -> b (BROWSER_INSTANCE)"
        );
    }

    #[test]
    fn workflow_error_display() {
        let workflow_id = WorkflowId::new();
        let err = WorkflowError::InvalidPlan {
            workflow_id,
            error: PlanError::NoEntryPoint,
        };
        assert!(err.to_string().contains("no entry point found"));
    }
}
