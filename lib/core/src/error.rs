//! Report-based result alias shared by the I/O-facing crates.
//!
//! Domain failures in the planner stay plain enums; only code that touches
//! files, configuration or rendering wraps them in a `rootcause::Report`,
//! attaching its own context on the way up.

use rootcause::Report;

/// `Result` carrying a `Report` whose top-level context is `C`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;
