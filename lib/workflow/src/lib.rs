//! Workflow graph model and execution planner for taskflow.
//!
//! This crate turns the graph a user draws in the workflow editor into an
//! ordered execution plan, and guards the editor against drawing graphs that
//! could never be planned:
//!
//! - **Task catalog**: Closed set of task types, each with typed input/output ports
//! - **Graph model**: Nodes, port-to-port edges and the saved editor document
//! - **Planner**: Entry point resolution, input validation and phase building
//! - **Connection checks**: Self-loop, port type and cycle guards for new edges
//! - **Lifecycle**: Draft/published workflows carrying their stored plan

pub mod connection;
pub mod definition;
pub mod edge;
pub mod error;
pub mod graph;
pub mod inputs;
pub mod node;
pub mod planner;
pub mod port;
pub mod task;
pub mod workflow;

pub use connection::{is_valid_connection, validate_connection};
pub use definition::{Viewport, WorkflowDefinition};
pub use edge::{Connection, Edge};
pub use error::{GraphError, InvalidElement, PlanError, WorkflowError};
pub use graph::DependencyGraph;
pub use inputs::{INVALID_TASK_TYPE, invalid_inputs};
pub use node::{Node, NodeId};
pub use planner::{CompileOutcome, ExecutionPlan, Phase, compile, entry_point};
pub use port::{InputPort, OutputPort, PortType};
pub use task::{TaskCatalog, TaskDefinition, TaskRegistry, TaskType, UnknownTaskType};
pub use workflow::{Workflow, WorkflowStatus};
