//! Command-line interface definition.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use taskflow_workflow::TaskType;

/// Plan taskflow workflows and check editor connections.
#[derive(Debug, Parser)]
#[command(name = "taskflow-planner", version, about)]
pub struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compile a workflow document into an execution plan.
    Plan {
        /// Path to the workflow document (JSON).
        file: PathBuf,
    },
    /// Check whether a new edge may be added to a workflow document.
    CheckConnection {
        /// Path to the workflow document (JSON).
        file: PathBuf,
        /// Node the edge starts at.
        #[arg(long)]
        source: String,
        /// Node the edge ends at.
        #[arg(long)]
        target: String,
        /// Output port on the source node.
        #[arg(long)]
        source_handle: Option<String>,
        /// Input port on the target node.
        #[arg(long)]
        target_handle: Option<String>,
    },
    /// List the built-in task types.
    Tasks {
        /// Show only this task type (e.g. `LAUNCH_BROWSER`).
        task_type: Option<TaskType>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_connection() {
        let cli = Cli::try_parse_from([
            "taskflow-planner",
            "check-connection",
            "flow.json",
            "--source",
            "1",
            "--target",
            "2",
            "--source-handle",
            "Web page",
            "--target-handle",
            "Web page",
        ])
        .expect("parse");

        match cli.command {
            Command::CheckConnection {
                source,
                target_handle,
                ..
            } => {
                assert_eq!(source, "1");
                assert_eq!(target_handle.as_deref(), Some("Web page"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["taskflow-planner", "tasks", "--config", "planner.toml"])
            .expect("parse");
        assert_eq!(cli.config, Some(PathBuf::from("planner.toml")));
    }

    #[test]
    fn tasks_filter_parses_task_type() {
        let cli = Cli::try_parse_from(["taskflow-planner", "tasks", "PAGE_TO_HTML"]).expect("parse");
        assert!(matches!(
            cli.command,
            Command::Tasks {
                task_type: Some(TaskType::PageToHtml)
            }
        ));
        assert!(Cli::try_parse_from(["taskflow-planner", "tasks", "page_to_html"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
