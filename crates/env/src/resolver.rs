//! Layered environment resolution
//!
//! Five sources feed the final environment, lowest precedence first:
//! process environment, `.env`, `.env.<name>`, remote secrets, CLI overrides.
//! The remote store is asked at most once per resolution and only when an
//! environment name is given.

use crate::files::{read_env_file, EnvFiles};
use crate::overrides::parse_cli_overrides;
use env_run_core::{EnvironmentVariables, Result, BASE_ENV_FILENAME};
use env_run_secrets::SecretStore;
use env_run_utils::SyncEnv;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// One origin of environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Process,
    BaseFile,
    OverrideFile,
    Remote,
    CliOverrides,
}

impl Source {
    /// Lowest precedence first
    pub const ASCENDING: [Source; 5] = [
        Source::Process,
        Source::BaseFile,
        Source::OverrideFile,
        Source::Remote,
        Source::CliOverrides,
    ];

    /// Highest precedence first
    pub const DESCENDING: [Source; 5] = [
        Source::CliOverrides,
        Source::Remote,
        Source::OverrideFile,
        Source::BaseFile,
        Source::Process,
    ];

    /// Human readable name; the override file is labelled after the environment
    pub fn label(self, env_name: Option<&str>) -> String {
        match self {
            Source::CliOverrides => "CLI Overrides".to_string(),
            Source::Remote => "Infisical".to_string(),
            Source::OverrideFile => {
                format!("{BASE_ENV_FILENAME}.{}", env_name.unwrap_or("override"))
            }
            Source::BaseFile => BASE_ENV_FILENAME.to_string(),
            Source::Process => "process".to_string(),
        }
    }
}

/// The raw per-source mappings of one resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentSourceData {
    pub process_env: EnvironmentVariables,
    pub base_env: EnvironmentVariables,
    pub override_env: EnvironmentVariables,
    pub remote_secrets: EnvironmentVariables,
    pub cli_overrides: EnvironmentVariables,
}

impl EnvironmentSourceData {
    pub fn get(&self, source: Source) -> &EnvironmentVariables {
        match source {
            Source::Process => &self.process_env,
            Source::BaseFile => &self.base_env,
            Source::OverrideFile => &self.override_env,
            Source::Remote => &self.remote_secrets,
            Source::CliOverrides => &self.cli_overrides,
        }
    }

    /// Fold every source, lowest precedence first, into one mapping
    pub fn merge(&self) -> EnvironmentVariables {
        Source::ASCENDING
            .iter()
            .fold(EnvironmentVariables::new(), |mut acc, source| {
                acc.merge(self.get(*source));
                acc
            })
    }
}

/// Files that were present and read during resolution
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePaths {
    pub base_env_file: Option<PathBuf>,
    pub override_env_file: Option<PathBuf>,
}

/// Outcome of a resolution
#[derive(Debug, Clone)]
pub struct ResolutionResult {
    pub final_env: EnvironmentVariables,
    pub source_data: EnvironmentSourceData,
    /// Whether secrets were actually obtained from the remote store
    pub used_remote: bool,
    pub file_paths: FilePaths,
}

/// Resolves the environment for a command run
pub struct EnvironmentResolver {
    root: PathBuf,
    secret_store: Box<dyn SecretStore>,
    process_env: EnvironmentVariables,
}

impl EnvironmentResolver {
    /// Create a resolver for a workspace root using a snapshot of the current
    /// process environment
    pub fn new(root: impl Into<PathBuf>, secret_store: Box<dyn SecretStore>) -> Self {
        Self {
            root: root.into(),
            secret_store,
            process_env: SyncEnv::vars(),
        }
    }

    /// Replace the process environment snapshot
    #[must_use]
    pub fn with_process_env(mut self, process_env: EnvironmentVariables) -> Self {
        self.process_env = process_env;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn has_credentials(&self) -> bool {
        self.secret_store.has_credentials()
    }

    /// Resolve the final environment.
    ///
    /// An unknown remote environment falls back to files and process
    /// variables. Other remote failures are fatal when credentials are
    /// configured and silently ignored otherwise.
    pub async fn resolve_environment(
        &mut self,
        env_name: Option<&str>,
        force_refresh: bool,
        cli_overrides: &[String],
    ) -> Result<ResolutionResult> {
        let files = EnvFiles::new(&self.root, env_name)?;
        let use_remote = files.should_use_remote(force_refresh);

        let mut source_data = EnvironmentSourceData {
            cli_overrides: parse_cli_overrides(cli_overrides),
            ..EnvironmentSourceData::default()
        };
        let mut file_paths = FilePaths::default();

        let base_path = files.base_env_file();
        if let Some(vars) = read_env_file(&base_path)? {
            source_data.base_env = vars;
            file_paths.base_env_file = Some(base_path);
        }

        let override_path = files.override_env_file();
        if let Some(path) = override_path {
            if let Some(vars) = read_env_file(&path)? {
                source_data.override_env = vars;
                file_paths.override_env_file = Some(path);
            }
        }

        source_data.process_env =
            self.filter_process_env(&source_data.base_env, &source_data.override_env);

        if let (Some(name), None) = (env_name, &file_paths.override_env_file) {
            info!("No environment-specific file found for: {}", name);
        }

        let mut used_remote = false;
        if use_remote {
            match self.secret_store.get_secrets(env_name).await {
                Ok(secrets) => {
                    used_remote = true;
                    if let Some(name) = env_name {
                        files.write_environment_file(&secrets)?;
                        info!(
                            "Infisical retrieval successful. Wrote {} secrets to {}.{}",
                            secrets.len(),
                            BASE_ENV_FILENAME,
                            name
                        );
                    }
                    source_data.remote_secrets = secrets;
                }
                Err(e) if e.is_environment_not_found() => {
                    warn!(
                        "No environment-specific Infisical slug for: {}",
                        env_name.unwrap_or_default()
                    );
                    info!("Using .env and process environment");
                }
                Err(e) if self.secret_store.has_credentials() => return Err(e),
                Err(e) => {
                    debug!("Skipping Infisical: {}", e);
                    info!("Using .env and process environment");
                }
            }
        }

        let final_env = source_data.merge();

        Ok(ResolutionResult {
            final_env,
            source_data,
            used_remote,
            file_paths,
        })
    }

    /// Process variables not defined by either env file.
    ///
    /// Informational only: the merge order already puts files above the
    /// process environment.
    pub fn filter_process_env(
        &self,
        base_env: &EnvironmentVariables,
        override_env: &EnvironmentVariables,
    ) -> EnvironmentVariables {
        self.process_env
            .filter(|key, _| !base_env.contains(key) && !override_env.contains(key))
    }
}
