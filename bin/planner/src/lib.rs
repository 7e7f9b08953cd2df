//! Command-line planner for taskflow workflow documents.
//!
//! Reads editor documents from disk, compiles them into execution plans, and
//! checks proposed connections against the built-in task catalog.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
