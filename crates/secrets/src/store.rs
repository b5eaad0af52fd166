use async_trait::async_trait;
use env_run_core::{EnvironmentVariables, Result};

/// A remote source of secrets for a named environment
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Whether structurally valid credentials are available.
    ///
    /// This is a pure check and never touches the network.
    fn has_credentials(&self) -> bool;

    /// Fetch the flat secret mapping for an environment.
    ///
    /// # Returns
    /// * `Ok(vars)` - the merged secrets, imports included
    /// * `Err(Error::NotAuthenticated)` - no usable credentials, nothing was sent
    /// * `Err(Error::Authentication { .. })` - the login call failed
    /// * `Err(Error::EnvironmentNotFound { .. })` - the environment slug is unknown
    /// * `Err(_)` - any other remote failure
    async fn get_secrets(&mut self, environment: Option<&str>) -> Result<EnvironmentVariables>;
}
