use clap::Parser;
use rootcause::prelude::ResultExt;
use std::process::ExitCode;
use taskflow_core::Result;
use taskflow_planner::cli::Cli;
use taskflow_planner::commands::{self, Verdict, exit_status};
use taskflow_planner::config::PlannerConfig;
use taskflow_planner::error::PlannerError;
use taskflow_workflow::TaskCatalog;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(&cli);
    if let Err(report) = &result {
        eprintln!("{report:?}");
    }
    ExitCode::from(exit_status(&result))
}

fn run(cli: &Cli) -> Result<Verdict, PlannerError> {
    let config = PlannerConfig::load(cli.config.as_deref()).context(PlannerError::ConfigFailed)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog = TaskCatalog::builtin();
    tracing::debug!(tasks = catalog.len(), "loaded task catalog");

    let output = commands::run(&cli.command, &config, &catalog)?;
    println!("{}", output.body);
    Ok(output.verdict)
}
