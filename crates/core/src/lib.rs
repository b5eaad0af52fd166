//! Core domain types, errors, and constants for `env-run`.
//!
//! ## Key Components
//!
//! - **`errors`**: the `Error` enum and `Result` alias shared by every crate in
//!   the workspace. Soft failures (an unknown remote environment) and hard
//!   failures (authentication, command exit codes) are distinct variants so the
//!   resolver can branch on them.
//! - **`types`**: `EnvironmentVariables`, the flat key/value mapping used for
//!   every variable source and for the final merged environment.
//! - **`constants`**: environment variable names, file names and protocol
//!   strings.

pub mod constants;
pub mod errors;
pub mod types;

pub use self::{
    constants::*,
    errors::{Error, Result},
    types::*,
};
