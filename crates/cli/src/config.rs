use env_run_core::{CI_DETECTION_VAR, ENV_RUN_LOG_VAR, ENV_RUN_ROOT_VAR};
use env_run_utils::SyncEnv;
use std::path::PathBuf;

/// Settings taken from the process environment at startup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Explicit workspace root; discovered from the current directory when unset
    pub workspace_root: Option<PathBuf>,
    /// Running under GitHub Actions
    pub ci: bool,
    /// Full `EnvFilter` directive overriding the default log level
    pub log_filter: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| SyncEnv::var(key))
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            workspace_root: non_blank(ENV_RUN_ROOT_VAR).map(PathBuf::from),
            ci: lookup(CI_DETECTION_VAR).as_deref() == Some("true"),
            log_filter: non_blank(ENV_RUN_LOG_VAR),
        }
    }
}
