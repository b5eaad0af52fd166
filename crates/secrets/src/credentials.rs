use env_run_core::{
    EnvironmentVariables, DEFAULT_INFISICAL_SITE_URL, INFISICAL_CLIENT_ID_VAR,
    INFISICAL_CLIENT_SECRET_VAR, INFISICAL_PROJECT_ID_VAR, INFISICAL_SITE_URL_VAR,
    PLACEHOLDER_CLIENT_ID, PLACEHOLDER_CLIENT_SECRET, PLACEHOLDER_PROJECT_ID, TEMPLATE_PREFIX,
};
use env_run_utils::SyncEnv;
use std::fmt;

/// Machine identity credentials for Infisical universal auth
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub project_id: Option<String>,
    pub site_url: Option<String>,
}

impl Credentials {
    /// Read credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        Self {
            client_id: non_empty(INFISICAL_CLIENT_ID_VAR),
            client_secret: non_empty(INFISICAL_CLIENT_SECRET_VAR),
            project_id: non_empty(INFISICAL_PROJECT_ID_VAR),
            site_url: non_empty(INFISICAL_SITE_URL_VAR),
        }
    }

    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| SyncEnv::var(key))
    }

    /// Read credentials from an already parsed mapping (e.g. the root `.env` file)
    pub fn from_variables(vars: &EnvironmentVariables) -> Self {
        Self::from_lookup(|key| vars.get(key).cloned())
    }

    /// Whether all three required fields are present, valid or not
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.client_id.is_some() && self.client_secret.is_some() && self.project_id.is_some()
    }

    /// Overlay values read from the root `.env` file.
    ///
    /// Only applies when the triple is incomplete; every field the file sets
    /// then replaces the current value, site URL included.
    #[must_use]
    pub fn with_file_values(self, file: Credentials) -> Self {
        if self.is_complete() {
            return self;
        }
        Self {
            client_id: file.client_id.or(self.client_id),
            client_secret: file.client_secret.or(self.client_secret),
            project_id: file.project_id.or(self.project_id),
            site_url: file.site_url.or(self.site_url),
        }
    }

    /// All three required fields are present, non-empty, not a placeholder and
    /// not an unresolved `${...}` template.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        usable(self.client_id.as_deref(), PLACEHOLDER_CLIENT_ID)
            && usable(self.client_secret.as_deref(), PLACEHOLDER_CLIENT_SECRET)
            && usable(self.project_id.as_deref(), PLACEHOLDER_PROJECT_ID)
    }

    /// Site URL to talk to, falling back to Infisical cloud
    #[must_use]
    pub fn site_url(&self) -> &str {
        self.site_url
            .as_deref()
            .unwrap_or(DEFAULT_INFISICAL_SITE_URL)
    }
}

fn usable(value: Option<&str>, placeholder: &str) -> bool {
    match value {
        Some(v) => !v.trim().is_empty() && v != placeholder && !v.starts_with(TEMPLATE_PREFIX),
        None => false,
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "<redacted>"))
            .field("project_id", &self.project_id)
            .field("site_url", &self.site_url)
            .finish()
    }
}
