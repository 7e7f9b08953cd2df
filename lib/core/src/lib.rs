//! Core domain types and utilities for the taskflow workflow builder.
//!
//! This crate provides the foundational types and error handling shared by
//! the workflow planner library and the planner binary.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{ParseIdError, WorkflowId};
