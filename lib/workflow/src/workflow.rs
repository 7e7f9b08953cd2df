//! Workflow envelope and publish lifecycle.
//!
//! A workflow wraps an editor document with identity and status. Drafts can
//! be edited freely; publishing runs the authoritative compile and stores the
//! resulting plan next to the definition so the execution engine can pick it
//! up without re-planning.

use crate::definition::WorkflowDefinition;
use crate::error::WorkflowError;
use crate::planner::ExecutionPlan;
use crate::task::TaskRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskflow_core::WorkflowId;
use tracing::info;

/// Lifecycle status of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkflowStatus {
    #[default]
    Draft,
    Published,
}

impl fmt::Display for WorkflowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Draft => write!(f, "DRAFT"),
            Self::Published => write!(f, "PUBLISHED"),
        }
    }
}

/// A named workflow and its current document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: WorkflowId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: WorkflowStatus,
    #[serde(default)]
    pub definition: WorkflowDefinition,
    /// Plan stored at publish time. Present only while published.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_plan: Option<ExecutionPlan>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Creates a draft workflow seeded with an entry-point node.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: WorkflowId::new(),
            name: name.into(),
            description: None,
            status: WorkflowStatus::Draft,
            definition: WorkflowDefinition::with_entry_point(),
            execution_plan: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns true if the workflow is published.
    #[must_use]
    pub fn is_published(&self) -> bool {
        self.status == WorkflowStatus::Published
    }

    /// Compiles the definition and, on success, stores the plan and marks the
    /// workflow published.
    ///
    /// # Errors
    ///
    /// - [`WorkflowError::InvalidStateTransition`] if already published.
    /// - [`WorkflowError::InvalidPlan`] if the definition cannot be planned;
    ///   the workflow stays a draft.
    pub fn publish<R>(&mut self, registry: &R) -> Result<&ExecutionPlan, WorkflowError>
    where
        R: TaskRegistry + ?Sized,
    {
        if self.status != WorkflowStatus::Draft {
            return Err(WorkflowError::InvalidStateTransition {
                workflow_id: self.id,
                from: self.status,
                to: WorkflowStatus::Published,
            });
        }

        let plan = self
            .definition
            .compile(registry)
            .map_err(|error| WorkflowError::InvalidPlan {
                workflow_id: self.id,
                error,
            })?;

        info!(workflow_id = %self.id, phases = plan.len(), "workflow published");
        self.status = WorkflowStatus::Published;
        self.updated_at = Utc::now();
        Ok(self.execution_plan.insert(plan))
    }

    /// Returns a published workflow to draft, discarding the stored plan.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::InvalidStateTransition`] if already a draft.
    pub fn unpublish(&mut self) -> Result<(), WorkflowError> {
        if self.status != WorkflowStatus::Published {
            return Err(WorkflowError::InvalidStateTransition {
                workflow_id: self.id,
                from: self.status,
                to: WorkflowStatus::Draft,
            });
        }

        info!(workflow_id = %self.id, "workflow unpublished");
        self.status = WorkflowStatus::Draft;
        self.execution_plan = None;
        self.updated_at = Utc::now();
        Ok(())
    }
}
