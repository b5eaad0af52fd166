//! Top-level runner tying resolution, reporting and execution together

use crate::args::RunOptions;
use crate::config::Config;
use crate::executor::{run_command, CommandEnvironment};
use env_run_core::{Error, Result, BASE_ENV_FILENAME};
use env_run_env::files::read_env_file;
use env_run_env::{EnvironmentResolver, ResolutionResult};
use env_run_secrets::{Credentials, InfisicalClient, SecretStore};
use env_run_utils::resolve_workspace_root;
use std::path::Path;
use tracing::{debug, info};

/// One invocation of `env-run`
pub struct EnvRun {
    options: RunOptions,
    config: Config,
    secret_store: Option<Box<dyn SecretStore>>,
}

impl EnvRun {
    pub fn new(options: RunOptions, config: Config) -> Self {
        Self {
            options,
            config,
            secret_store: None,
        }
    }

    /// Use a specific secret store instead of an Infisical client built from
    /// the configured credentials
    #[must_use]
    pub fn with_secret_store(mut self, store: Box<dyn SecretStore>) -> Self {
        self.secret_store = Some(store);
        self
    }

    /// Resolve the environment, optionally print the debug report, then run
    /// the command.
    ///
    /// Errors are returned to the caller; the binary decides how to exit.
    pub async fn run(self) -> Result<Option<ResolutionResult>> {
        if self.config.ci {
            info!("CI environment detected (GITHUB_ACTIONS=true)");
            info!("Bypassing environment resolution and using process environment directly");
            execute_options(&self.options, CommandEnvironment::Inherit).await?;
            return Ok(None);
        }

        let current_dir = std::env::current_dir()
            .map_err(|e| Error::file_system(".", "read current directory", e))?;
        let root = resolve_workspace_root(self.config.workspace_root.as_deref(), &current_dir)?;

        let EnvRun {
            options,
            secret_store,
            ..
        } = self;
        let store: Box<dyn SecretStore> = match secret_store {
            Some(store) => store,
            None => Box::new(InfisicalClient::new(load_credentials(
                Credentials::from_env(),
                &root,
            )?)),
        };

        let mut resolver = EnvironmentResolver::new(&root, store);
        let result = resolver
            .resolve_environment(
                options.env_name.as_deref(),
                options.force_refresh,
                &options.overrides,
            )
            .await?;

        show_sourcing_message(&root, &options, &result);

        if options.debug {
            crate::debug::print(
                &result.source_data,
                &result.final_env,
                options.env_name.as_deref(),
            );
        }

        execute_options(&options, CommandEnvironment::Replace(&result.final_env)).await?;
        Ok(Some(result))
    }
}

async fn execute_options(options: &RunOptions, env: CommandEnvironment<'_>) -> Result<()> {
    let Some((program, args)) = options.command.split_first() else {
        return Ok(());
    };
    debug!("Executing: {} {}", program, args.join(" "));
    run_command(program, args, env).await
}

/// Complete process credentials are used as is. When any of the three is
/// missing, values set in the root `.env` take over.
fn load_credentials(credentials: Credentials, root: &Path) -> Result<Credentials> {
    if credentials.is_complete() {
        return Ok(credentials);
    }
    let base = read_env_file(&root.join(BASE_ENV_FILENAME))?.unwrap_or_default();
    Ok(credentials.with_file_values(Credentials::from_variables(&base)))
}

fn show_sourcing_message(root: &Path, options: &RunOptions, result: &ResolutionResult) {
    let Some(name) = options.env_name.as_deref() else {
        info!("Using .env and process environment");
        return;
    };

    if options.force_refresh {
        info!("Force refresh enabled for environment: {}", name);
        info!("Will fetch fresh secrets from Infisical and overwrite existing environment file");
    } else if let Some(path) = &result.file_paths.override_env_file {
        info!(
            "Using environment-specific file: {}/{}",
            display_name(root),
            display_name(path)
        );
        debug!("No Infisical login attempted - using local file");
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests;
