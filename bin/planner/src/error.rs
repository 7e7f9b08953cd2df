//! Error types for planner commands.
//!
//! Command failures are wrapped in `rootcause::Report<PlannerError>`, with the
//! underlying I/O or parse error kept as the report's cause.

use std::fmt;
use std::path::PathBuf;

/// Errors that stop a planner command from producing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    /// Configuration could not be loaded.
    ConfigFailed,
    /// The workflow document could not be read.
    ReadFailed { path: PathBuf },
    /// The workflow document is not valid JSON of the expected shape.
    ParseFailed { path: PathBuf },
    /// The result could not be rendered as JSON.
    RenderFailed,
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigFailed => write!(f, "failed to load configuration"),
            Self::ReadFailed { path } => {
                write!(f, "failed to read workflow document {}", path.display())
            }
            Self::ParseFailed { path } => {
                write!(f, "failed to parse workflow document {}", path.display())
            }
            Self::RenderFailed => write!(f, "failed to render output"),
        }
    }
}

impl std::error::Error for PlannerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_error_display() {
        let err = PlannerError::ParseFailed {
            path: PathBuf::from("flow.json"),
        };
        assert_eq!(err.to_string(), "failed to parse workflow document flow.json");
    }
}
