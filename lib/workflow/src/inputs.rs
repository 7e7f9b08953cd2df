//! Input satisfaction checks.
//!
//! An input is satisfied by a non-empty literal typed into the node, or by an
//! edge into its handle whose source is already planned. Optional inputs with
//! no edge never block.

use crate::edge::Edge;
use crate::node::Node;
use crate::port::InputPort;
use crate::task::TaskRegistry;
use std::collections::HashSet;

/// Reported as the single missing input of a node whose task type is unknown.
pub const INVALID_TASK_TYPE: &str = "INVALID_TASK_TYPE";

/// Returns the names of `node`'s unsatisfied inputs, in declaration order.
///
/// `planned` holds the ids of nodes already assigned to a phase.
#[must_use]
pub fn invalid_inputs<R>(
    node: &Node,
    edges: &[Edge],
    planned: &HashSet<&str>,
    registry: &R,
) -> Vec<String>
where
    R: TaskRegistry + ?Sized,
{
    let Some(definition) = registry.lookup(&node.task_type) else {
        return vec![INVALID_TASK_TYPE.to_string()];
    };

    definition
        .inputs
        .iter()
        .filter(|input| !is_satisfied(node, input, edges, planned))
        .map(|input| input.name.clone())
        .collect()
}

fn is_satisfied(node: &Node, input: &InputPort, edges: &[Edge], planned: &HashSet<&str>) -> bool {
    // Literals win over edges.
    if node.literal(&input.name).is_some() {
        return true;
    }

    let candidate = edges.iter().find(|edge| edge.feeds(&node.id, &input.name));
    match candidate {
        Some(edge) => planned.contains(edge.source.as_str()),
        None => !input.required,
    }
}
