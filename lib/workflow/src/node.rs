//! Workflow nodes.
//!
//! A node is one placement of a task on the editor canvas. It carries:
//! - An identifier unique within the workflow
//! - The task type it runs (resolved through a [`TaskRegistry`](crate::TaskRegistry))
//! - Literal input values typed into the editor, keyed by input name

use crate::task::TaskType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use ulid::Ulid;

/// Identifier of a node within a workflow.
///
/// Editor-created nodes use generated ULIDs, but any string is accepted so
/// that documents produced elsewhere load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node ID from an existing identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh, random node ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Ulid::new().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A workflow node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier for this node within the workflow.
    pub id: NodeId,
    /// The task type identifier, e.g. `LAUNCH_BROWSER`.
    pub task_type: String,
    /// Literal input values keyed by input name.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
}

impl Node {
    /// Creates a node with a generated ID and no literal inputs.
    #[must_use]
    pub fn new(task_type: TaskType) -> Self {
        Self::with_id(NodeId::generate(), task_type.as_str())
    }

    /// Creates a node with a specific ID and task type identifier.
    #[must_use]
    pub fn with_id(id: impl Into<NodeId>, task_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task_type: task_type.into(),
            inputs: BTreeMap::new(),
        }
    }

    /// Sets a literal input value.
    #[must_use]
    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    /// Returns the literal value for `name` when it is set and non-empty.
    #[must_use]
    pub fn literal(&self, name: &str) -> Option<&str> {
        self.inputs
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}
