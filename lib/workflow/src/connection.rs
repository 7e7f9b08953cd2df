//! Interactive connection checks.
//!
//! The editor asks whether a proposed edge may be drawn before adding it to
//! the graph. The check is pure over the current nodes and edges and fails
//! closed: anything it cannot positively verify is rejected.

use crate::edge::{Connection, Edge};
use crate::error::GraphError;
use crate::graph::DependencyGraph;
use crate::node::{Node, NodeId};
use crate::task::{TaskDefinition, TaskRegistry};
use std::collections::HashSet;
use tracing::debug;

/// Checks whether `connection` may be added to the graph formed by `nodes`
/// and `edges`.
///
/// Rejects self-loops, unknown nodes, task types or ports, literal-only target
/// inputs, mismatched port types, and edges after which a depth-first walk
/// from the target over existing edges reaches the source or visits any node
/// twice.
///
/// # Errors
///
/// Returns the first reason the connection is refused.
pub fn validate_connection<R>(
    nodes: &[Node],
    edges: &[Edge],
    connection: &Connection,
    registry: &R,
) -> Result<(), GraphError>
where
    R: TaskRegistry + ?Sized,
{
    let result = check(nodes, edges, connection, registry);
    if let Err(error) = &result {
        debug!(
            source = %connection.source,
            target = %connection.target,
            %error,
            "connection rejected"
        );
    }
    result
}

/// Boolean form of [`validate_connection`].
#[must_use]
pub fn is_valid_connection<R>(
    nodes: &[Node],
    edges: &[Edge],
    connection: &Connection,
    registry: &R,
) -> bool
where
    R: TaskRegistry + ?Sized,
{
    validate_connection(nodes, edges, connection, registry).is_ok()
}

fn check<R>(
    nodes: &[Node],
    edges: &[Edge],
    connection: &Connection,
    registry: &R,
) -> Result<(), GraphError>
where
    R: TaskRegistry + ?Sized,
{
    if connection.source == connection.target {
        return Err(GraphError::SelfLoop {
            node_id: connection.source.clone(),
        });
    }

    let source_task = definition_of(nodes, &connection.source, registry)?;
    let target_task = definition_of(nodes, &connection.target, registry)?;

    let source_handle =
        connection
            .source_handle
            .as_deref()
            .ok_or_else(|| GraphError::MissingHandle {
                node_id: connection.source.clone(),
            })?;
    let target_handle =
        connection
            .target_handle
            .as_deref()
            .ok_or_else(|| GraphError::MissingHandle {
                node_id: connection.target.clone(),
            })?;

    let output = source_task.output_port(source_handle).ok_or_else(|| {
        GraphError::SourcePortNotFound {
            node_id: connection.source.clone(),
            port_name: source_handle.to_string(),
        }
    })?;
    let input = target_task.input_port(target_handle).ok_or_else(|| {
        GraphError::TargetPortNotFound {
            node_id: connection.target.clone(),
            port_name: target_handle.to_string(),
        }
    })?;

    if !input.is_connectable() {
        return Err(GraphError::TargetNotConnectable {
            node_id: connection.target.clone(),
            port_name: target_handle.to_string(),
        });
    }

    if output.port_type != input.port_type {
        return Err(GraphError::IncompatiblePorts {
            source_node: connection.source.clone(),
            source_type: output.port_type,
            target_node: connection.target.clone(),
            target_type: input.port_type,
        });
    }

    let graph = DependencyGraph::new(nodes, edges);
    if walk_hits_source(&graph, connection.target.as_str(), connection.source.as_str()) {
        return Err(GraphError::CycleDetected {
            source_node: connection.source.clone(),
            target_node: connection.target.clone(),
        });
    }

    Ok(())
}

fn definition_of<'r, R>(
    nodes: &[Node],
    id: &NodeId,
    registry: &'r R,
) -> Result<&'r TaskDefinition, GraphError>
where
    R: TaskRegistry + ?Sized,
{
    let node = nodes
        .iter()
        .find(|n| n.id == *id)
        .ok_or_else(|| GraphError::NodeNotFound { node_id: id.clone() })?;

    registry
        .lookup(&node.task_type)
        .ok_or_else(|| GraphError::UnknownTaskType {
            node_id: id.clone(),
            task_type: node.task_type.clone(),
        })
}

/// Depth-first walk from `start` over outgoing edges. True if it reaches
/// `source` or arrives at any node a second time.
fn walk_hits_source(graph: &DependencyGraph<'_>, start: &str, source: &str) -> bool {
    let mut visited = HashSet::new();
    let mut stack = vec![start];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            return true;
        }
        for next in graph.outgoers(current) {
            if next == source {
                return true;
            }
            stack.push(next);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::PortType;
    use crate::task::TaskCatalog;

    fn catalog() -> TaskCatalog {
        TaskCatalog::builtin()
    }

    fn page(id: &str) -> Node {
        Node::with_id(id, "CLICK_ELEMENT")
    }

    fn web_page(source: &str, target: &str) -> Edge {
        Edge::new(source, target).with_handles("Web page", "Web page")
    }

    #[test]
    fn accepts_matching_ports() {
        let nodes = vec![Node::with_id("l", "LAUNCH_BROWSER"), page("c")];
        assert!(is_valid_connection(&nodes, &[], &web_page("l", "c"), &catalog()));
    }

    #[test]
    fn rejects_self_loop() {
        let nodes = vec![page("a")];
        assert_eq!(
            validate_connection(&nodes, &[], &web_page("a", "a"), &catalog()),
            Err(GraphError::SelfLoop {
                node_id: NodeId::from("a")
            })
        );
    }

    #[test]
    fn rejects_type_mismatch() {
        let nodes = vec![
            Node::with_id("h", "PAGE_TO_HTML"),
            Node::with_id("c", "CLICK_ELEMENT"),
        ];
        let connection = Edge::new("h", "c").with_handles("Html", "Web page");
        assert_eq!(
            validate_connection(&nodes, &[], &connection, &catalog()),
            Err(GraphError::IncompatiblePorts {
                source_node: NodeId::from("h"),
                source_type: PortType::String,
                target_node: NodeId::from("c"),
                target_type: PortType::BrowserInstance,
            })
        );
    }

    #[test]
    fn rejects_cycle() {
        let nodes = vec![page("a"), page("b"), page("c")];
        let edges = vec![web_page("a", "b"), web_page("b", "c")];
        assert_eq!(
            validate_connection(&nodes, &edges, &web_page("c", "a"), &catalog()),
            Err(GraphError::CycleDetected {
                source_node: NodeId::from("c"),
                target_node: NodeId::from("a"),
            })
        );
    }

    #[test]
    fn rejects_reconvergence_downstream_of_target() {
        let nodes = vec![
            page("s"),
            page("t"),
            page("x"),
            page("y"),
            Node::with_id("z", "EXTRACT_TEXT_FROM_ELEMENT"),
        ];
        let edges = vec![
            web_page("t", "x"),
            web_page("t", "y"),
            Edge::new("x", "z").with_handles("Web page", "Html"),
            Edge::new("y", "z").with_handles("Web page", "Selector"),
        ];
        assert!(!is_valid_connection(&nodes, &edges, &web_page("s", "t"), &catalog()));
    }

    #[test]
    fn accepts_tree_downstream_of_target() {
        let nodes = vec![page("s"), page("t"), page("x"), page("y")];
        let edges = vec![web_page("t", "x"), web_page("t", "y")];
        assert!(is_valid_connection(&nodes, &edges, &web_page("s", "t"), &catalog()));
    }

    #[test]
    fn rejects_unknown_node() {
        let nodes = vec![page("a")];
        assert_eq!(
            validate_connection(&nodes, &[], &web_page("a", "ghost"), &catalog()),
            Err(GraphError::NodeNotFound {
                node_id: NodeId::from("ghost")
            })
        );
    }

    #[test]
    fn rejects_unknown_task_type() {
        let nodes = vec![page("a"), Node::with_id("m", "MYSTERY")];
        assert!(matches!(
            validate_connection(&nodes, &[], &web_page("a", "m"), &catalog()),
            Err(GraphError::UnknownTaskType { .. })
        ));
    }

    #[test]
    fn rejects_missing_and_unknown_handles() {
        let nodes = vec![page("a"), page("b")];
        assert!(matches!(
            validate_connection(&nodes, &[], &Edge::new("a", "b"), &catalog()),
            Err(GraphError::MissingHandle { .. })
        ));
        assert!(matches!(
            validate_connection(
                &nodes,
                &[],
                &Edge::new("a", "b").with_handles("Nope", "Web page"),
                &catalog()
            ),
            Err(GraphError::SourcePortNotFound { .. })
        ));
        assert!(matches!(
            validate_connection(
                &nodes,
                &[],
                &Edge::new("a", "b").with_handles("Web page", "Nope"),
                &catalog()
            ),
            Err(GraphError::TargetPortNotFound { .. })
        ));
    }

    #[test]
    fn rejects_literal_only_input() {
        let nodes = vec![
            Node::with_id("h", "PAGE_TO_HTML"),
            Node::with_id("l", "LAUNCH_BROWSER"),
        ];
        let connection = Edge::new("h", "l").with_handles("Html", "Website URL");
        assert!(matches!(
            validate_connection(&nodes, &[], &connection, &catalog()),
            Err(GraphError::TargetNotConnectable { .. })
        ));
    }
}
