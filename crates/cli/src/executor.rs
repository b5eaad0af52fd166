//! Child process execution

use env_run_core::{EnvironmentVariables, Error, Result};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Environment handed to the child process
#[derive(Debug, Clone, Copy)]
pub enum CommandEnvironment<'a> {
    /// Keep the ambient process environment untouched
    Inherit,
    /// Clear the environment and use exactly this mapping
    Replace(&'a EnvironmentVariables),
}

/// Run `program` with `args` and wait for it to exit.
///
/// The child shares the terminal's standard streams. Exit code 0 is success;
/// any other termination is a `CommandFailed` error and a launch failure is
/// `CommandSpawn`.
pub async fn run_command(
    program: &str,
    args: &[String],
    env: CommandEnvironment<'_>,
) -> Result<()> {
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    if let CommandEnvironment::Replace(vars) = env {
        cmd.env_clear().envs(vars.iter());
    }

    debug!("Executing {} with {} argument(s)", program, args.len());

    let status = cmd
        .status()
        .await
        .map_err(|e| Error::command_spawn(program, e))?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::command_failed(program, status.code()))
    }
}
