//! Shared utilities for env-run
//!
//! Workspace root discovery and read access to the process environment.

pub mod paths;
pub mod sync;

pub use paths::*;
pub use sync::*;
