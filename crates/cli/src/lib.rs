//! `env-run` command-line front end
//!
//! Parses arguments, resolves the layered environment through
//! `env-run-env`, optionally prints the source report and runs the wrapped
//! command.

pub mod app;
pub mod args;
pub mod config;
pub mod debug;
pub mod executor;
pub mod help;
pub mod logging;

pub use app::EnvRun;
pub use args::{parse_overrides, Cli, RunOptions};
pub use config::Config;
pub use executor::{run_command, CommandEnvironment};
pub use help::HELP_TEXT;
