//! Workflow-graph-to-execution-plan compiler.
//!
//! The planner turns the editor's nodes and edges into ordered phases. Phase 1
//! holds the entry point alone. Each later phase holds every node whose inputs
//! are satisfied by literals or by nodes from earlier phases. The execution
//! engine runs phase `i` to completion before starting phase `i + 1`.
//!
//! Every round validates against the planned set as it stood when the round
//! began, so a node never depends on a sibling in its own phase.
//!
//! The planner is a pure function of `(nodes, edges, registry)`: the same
//! graph always yields the same result, whether the editor runs it as a
//! pre-flight check or the server runs it before execution.

use crate::edge::Edge;
use crate::error::{InvalidElement, PlanError};
use crate::graph::DependencyGraph;
use crate::inputs::invalid_inputs;
use crate::node::{Node, NodeId};
use crate::task::TaskRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// A batch of nodes with no dependencies on one another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// 1-based position of this phase in the plan.
    pub phase: usize,
    /// Nodes in input order.
    pub nodes: Vec<Node>,
}

/// An ordered sequence of phases.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionPlan {
    phases: Vec<Phase>,
}

impl ExecutionPlan {
    /// Returns the phases in execution order.
    #[must_use]
    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    /// Returns the number of phases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Returns true if the plan has no phases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// Returns the total number of scheduled nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.phases.iter().map(|p| p.nodes.len()).sum()
    }

    /// Returns the phase number a node was scheduled into.
    #[must_use]
    pub fn phase_of(&self, node_id: &NodeId) -> Option<usize> {
        self.phases
            .iter()
            .find(|p| p.nodes.iter().any(|n| n.id == *node_id))
            .map(|p| p.phase)
    }

    /// Returns the entry-point node.
    #[must_use]
    pub fn entry_point(&self) -> Option<&Node> {
        self.phases.first().and_then(|p| p.nodes.first())
    }
}

/// The compile result in its wire shape:
/// `{"executionPlan": [...]}` or `{"error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompileOutcome {
    ExecutionPlan(ExecutionPlan),
    Error(PlanError),
}

impl CompileOutcome {
    /// Returns true if a plan was produced.
    #[must_use]
    pub fn is_plan(&self) -> bool {
        matches!(self, Self::ExecutionPlan(_))
    }

    /// Converts back into a `Result`.
    pub fn into_result(self) -> Result<ExecutionPlan, PlanError> {
        match self {
            Self::ExecutionPlan(plan) => Ok(plan),
            Self::Error(error) => Err(error),
        }
    }
}

impl From<Result<ExecutionPlan, PlanError>> for CompileOutcome {
    fn from(result: Result<ExecutionPlan, PlanError>) -> Self {
        match result {
            Ok(plan) => Self::ExecutionPlan(plan),
            Err(error) => Self::Error(error),
        }
    }
}

/// Returns the first node, in input order, whose task type is an entry point.
///
/// Reordering the nodes of a graph with several entry-point nodes changes
/// which one is chosen.
#[must_use]
pub fn entry_point<'a, R>(nodes: &'a [Node], registry: &R) -> Option<&'a Node>
where
    R: TaskRegistry + ?Sized,
{
    nodes.iter().find(|node| {
        registry
            .lookup(&node.task_type)
            .is_some_and(|definition| definition.is_entry_point)
    })
}

/// Compiles a workflow graph into an execution plan.
///
/// # Errors
///
/// - [`PlanError::NoEntryPoint`] if no node's task type is an entry point.
/// - [`PlanError::InvalidInputs`] if any node has inputs that can never be
///   satisfied (including the entry point itself, and nodes of unknown type).
/// - [`PlanError::UnreachableNodes`] if some nodes could never be scheduled.
pub fn compile<R>(nodes: &[Node], edges: &[Edge], registry: &R) -> Result<ExecutionPlan, PlanError>
where
    R: TaskRegistry + ?Sized,
{
    let Some(entry) = entry_point(nodes, registry) else {
        debug!(node_count = nodes.len(), "no entry point");
        return Err(PlanError::NoEntryPoint);
    };

    let graph = DependencyGraph::new(nodes, edges);
    let mut planned: HashSet<&str> = HashSet::from([entry.id.as_str()]);
    let mut invalid = Vec::new();

    let entry_missing = invalid_inputs(entry, edges, &planned, registry);
    if !entry_missing.is_empty() {
        warn!(node_id = %entry.id, inputs = ?entry_missing, "entry point has invalid inputs");
        invalid.push(InvalidElement::new(entry.id.clone(), entry_missing));
    }

    let mut phases = vec![Phase {
        phase: 1,
        nodes: vec![entry.clone()],
    }];

    let total = graph.node_count();
    for phase in 2..=nodes.len() {
        if planned.len() >= total {
            break;
        }

        let scheduled = schedule_round(nodes, edges, &graph, &planned, registry, &mut invalid);
        if scheduled.is_empty() {
            debug!(phase, "no schedulable nodes left");
            break;
        }

        debug!(phase, node_count = scheduled.len(), "phase planned");
        planned.extend(scheduled.iter().map(|node| node.id.as_str()));
        phases.push(Phase {
            phase,
            nodes: scheduled.into_iter().cloned().collect(),
        });
    }

    if !invalid.is_empty() {
        return Err(PlanError::InvalidInputs {
            invalid_elements: invalid,
        });
    }

    let mut seen = HashSet::new();
    let unreachable: Vec<NodeId> = nodes
        .iter()
        .filter(|node| !planned.contains(node.id.as_str()) && seen.insert(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect();
    if !unreachable.is_empty() {
        warn!(node_ids = ?unreachable, "nodes never became schedulable");
        return Err(PlanError::UnreachableNodes {
            node_ids: unreachable,
        });
    }

    Ok(ExecutionPlan { phases })
}

/// Scans every unplanned node once against the planned set as it stood at the
/// start of the round, returning the nodes that join this round's phase.
///
/// A node with invalid inputs whose incomers are all planned can never become
/// valid; it is recorded in `invalid` and still scheduled so it is not
/// revisited.
fn schedule_round<'a, R>(
    nodes: &'a [Node],
    edges: &[Edge],
    graph: &DependencyGraph<'_>,
    planned: &HashSet<&str>,
    registry: &R,
    invalid: &mut Vec<InvalidElement>,
) -> Vec<&'a Node>
where
    R: TaskRegistry + ?Sized,
{
    let mut scheduled = Vec::new();
    let mut in_round = HashSet::new();

    for node in nodes {
        let id = node.id.as_str();
        if planned.contains(id) || in_round.contains(id) {
            continue;
        }

        let missing = invalid_inputs(node, edges, planned, registry);
        if !missing.is_empty() {
            let stuck = graph.incomers(id).all(|incomer| planned.contains(incomer));
            if !stuck {
                continue;
            }
            warn!(node_id = %node.id, inputs = ?missing, "node has invalid inputs");
            invalid.push(InvalidElement::new(node.id.clone(), missing));
        }

        in_round.insert(id);
        scheduled.push(node);
    }

    scheduled
}
