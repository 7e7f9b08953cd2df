//! Planner command implementations.
//!
//! Commands return their stdout body and a verdict; the binary maps the
//! verdict to an exit status.

use crate::cli::Command;
use crate::config::PlannerConfig;
use crate::error::PlannerError;
use rootcause::prelude::ResultExt;
use serde::Serialize;
use std::fs;
use std::path::Path;
use taskflow_core::Result;
use taskflow_workflow::{
    CompileOutcome, Edge, NodeId, TaskCatalog, TaskDefinition, TaskRegistry, TaskType,
    WorkflowDefinition, validate_connection,
};
use tracing::info;

/// Whether the command's subject was accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

impl Verdict {
    /// Process exit status for this verdict.
    #[must_use]
    pub fn exit_status(self) -> u8 {
        match self {
            Self::Accepted => 0,
            Self::Rejected => 2,
        }
    }
}

/// Process exit status for a command result; failures that produced a report
/// exit with 1.
#[must_use]
pub fn exit_status(result: &Result<Verdict, PlannerError>) -> u8 {
    match result {
        Ok(verdict) => verdict.exit_status(),
        Err(_) => 1,
    }
}

/// The result of running a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// JSON written to stdout.
    pub body: String,
    pub verdict: Verdict,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogEntry<'a> {
    task_type: &'a str,
    #[serde(flatten)]
    definition: &'a TaskDefinition,
}

#[derive(Serialize)]
struct ConnectionVerdict {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// Reads and parses a workflow document.
///
/// # Errors
///
/// Returns a report if the file cannot be read or parsed.
pub fn load_definition(path: &Path) -> Result<WorkflowDefinition, PlannerError> {
    let contents = fs::read_to_string(path).context(PlannerError::ReadFailed {
        path: path.to_path_buf(),
    })?;
    let definition: WorkflowDefinition =
        serde_json::from_str(&contents).context(PlannerError::ParseFailed {
            path: path.to_path_buf(),
        })?;

    info!(
        path = %path.display(),
        nodes = definition.nodes.len(),
        edges = definition.edges.len(),
        "loaded workflow document"
    );
    Ok(definition)
}

/// Runs a command against the given task catalog.
///
/// # Errors
///
/// Returns a report if input cannot be loaded or output cannot be rendered.
pub fn run(
    command: &Command,
    config: &PlannerConfig,
    catalog: &TaskCatalog,
) -> Result<CommandOutput, PlannerError> {
    match command {
        Command::Plan { file } => {
            let definition = load_definition(file)?;
            plan(&definition, catalog, config.output.pretty)
        }
        Command::CheckConnection {
            file,
            source,
            target,
            source_handle,
            target_handle,
        } => {
            let definition = load_definition(file)?;
            let connection = Edge {
                source: NodeId::new(source.as_str()),
                target: NodeId::new(target.as_str()),
                source_handle: source_handle.clone(),
                target_handle: target_handle.clone(),
            };
            check_connection(&definition, &connection, catalog, config.output.pretty)
        }
        Command::Tasks { task_type } => tasks(catalog, *task_type, config.output.pretty),
    }
}

/// Compiles `definition` and renders the wire-shaped outcome.
///
/// # Errors
///
/// Returns a report if the outcome cannot be rendered.
pub fn plan<R>(
    definition: &WorkflowDefinition,
    registry: &R,
    pretty: bool,
) -> Result<CommandOutput, PlannerError>
where
    R: TaskRegistry + ?Sized,
{
    let outcome = CompileOutcome::from(definition.compile(registry));
    let verdict = if outcome.is_plan() {
        Verdict::Accepted
    } else {
        Verdict::Rejected
    };
    info!(?verdict, "workflow compiled");

    Ok(CommandOutput {
        body: render(&outcome, pretty)?,
        verdict,
    })
}

/// Checks a proposed connection and renders the verdict.
///
/// # Errors
///
/// Returns a report if the verdict cannot be rendered.
pub fn check_connection<R>(
    definition: &WorkflowDefinition,
    connection: &Edge,
    registry: &R,
    pretty: bool,
) -> Result<CommandOutput, PlannerError>
where
    R: TaskRegistry + ?Sized,
{
    let result = validate_connection(
        &definition.nodes,
        &definition.edges,
        connection,
        registry,
    );
    let (verdict, body) = match result {
        Ok(()) => (
            Verdict::Accepted,
            ConnectionVerdict {
                accepted: true,
                reason: None,
            },
        ),
        Err(error) => (
            Verdict::Rejected,
            ConnectionVerdict {
                accepted: false,
                reason: Some(error.to_string()),
            },
        ),
    };

    Ok(CommandOutput {
        body: render(&body, pretty)?,
        verdict,
    })
}

/// Renders the task catalog, sorted by task type, optionally narrowed to
/// `only`.
///
/// # Errors
///
/// Returns a report if the catalog cannot be rendered.
pub fn tasks(
    catalog: &TaskCatalog,
    only: Option<TaskType>,
    pretty: bool,
) -> Result<CommandOutput, PlannerError> {
    let entries: Vec<_> = catalog
        .entries()
        .into_iter()
        .filter(|(task_type, _)| only.is_none_or(|wanted| wanted.as_str() == *task_type))
        .map(|(task_type, definition)| CatalogEntry {
            task_type,
            definition,
        })
        .collect();

    Ok(CommandOutput {
        body: render(&entries, pretty)?,
        verdict: Verdict::Accepted,
    })
}

fn render<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, PlannerError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    rendered.context(PlannerError::RenderFailed)
}
