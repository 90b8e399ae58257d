//! Logging setup shared by all binaries of the workspace.

pub mod tracing;
