use env_run_core::EnvironmentVariables;
use std::env;

/// Read-only access to the process environment.
///
/// env-run never mutates its own environment; every value it hands to the
/// resolver comes from a snapshot taken here.
pub struct SyncEnv;

impl SyncEnv {
    /// Get a single variable. Unset and non-UTF-8 values are both `None`.
    pub fn var<K: AsRef<str>>(key: K) -> Option<String> {
        env::var(key.as_ref()).ok()
    }

    /// Snapshot every variable whose name and value are valid UTF-8
    pub fn vars() -> EnvironmentVariables {
        env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}
