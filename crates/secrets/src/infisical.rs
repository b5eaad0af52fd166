//! Infisical REST client with lazy, once-per-instance universal-auth login

use crate::credentials::Credentials;
use crate::response::SecretsResponse;
use crate::store::SecretStore;
use async_trait::async_trait;
use env_run_core::{EnvironmentVariables, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

const LOGIN_PATH: &str = "api/v1/auth/universal-auth/login";
const LIST_SECRETS_PATH: &str = "api/v3/secrets/raw";
const USER_AGENT: &str = concat!("env-run/", env!("CARGO_PKG_VERSION"));

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}

/// Authenticated session state
struct Session {
    access_token: String,
}

/// Secret store backed by the Infisical API
pub struct InfisicalClient {
    http: reqwest::Client,
    credentials: Credentials,
    session: Option<Session>,
}

impl InfisicalClient {
    /// Create a client; nothing is sent until secrets are first requested
    pub fn new(credentials: Credentials) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|e| {
                debug!("Falling back to default HTTP client: {}", e);
                reqwest::Client::new()
            });
        Self::with_http_client(credentials, http)
    }

    /// Create a client with a preconfigured HTTP client
    pub fn with_http_client(credentials: Credentials, http: reqwest::Client) -> Self {
        Self {
            http,
            credentials,
            session: None,
        }
    }

    /// Whether a login has already succeeded on this instance
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = format!("{}/", self.credentials.site_url().trim_end_matches('/'));
        Url::parse(&base)
            .and_then(|base| base.join(path))
            .map_err(|e| {
                Error::configuration(format!(
                    "invalid Infisical site URL '{}': {e}",
                    self.credentials.site_url()
                ))
            })
    }

    async fn authenticate(&mut self) -> Result<&Session> {
        if self.session.is_none() {
            let session = self.login().await?;
            debug!("Infisical authentication successful");
            self.session = Some(session);
        }
        self.session.as_ref().ok_or(Error::NotAuthenticated)
    }

    async fn login(&self) -> Result<Session> {
        if !self.credentials.is_valid() {
            info!("No Infisical credentials available");
            return Err(Error::NotAuthenticated);
        }
        let (Some(client_id), Some(client_secret)) = (
            self.credentials.client_id.as_deref(),
            self.credentials.client_secret.as_deref(),
        ) else {
            return Err(Error::NotAuthenticated);
        };

        let url = self.endpoint(LOGIN_PATH)?;
        let response = self
            .http
            .post(url)
            .json(&LoginRequest {
                client_id,
                client_secret,
            })
            .send()
            .await
            .map_err(|e| Error::authentication(e.to_string()))?;

        if !response.status().is_success() {
            let (_, message) = read_error(response).await;
            return Err(Error::authentication(message));
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| Error::authentication(format!("invalid login response: {e}")))?;

        Ok(Session {
            access_token: body.access_token,
        })
    }
}

#[async_trait]
impl SecretStore for InfisicalClient {
    fn has_credentials(&self) -> bool {
        self.credentials.is_valid()
    }

    async fn get_secrets(&mut self, environment: Option<&str>) -> Result<EnvironmentVariables> {
        let token = self.authenticate().await?.access_token.clone();

        let mut url = self.endpoint(LIST_SECRETS_PATH)?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(project_id) = self.credentials.project_id.as_deref() {
                query.append_pair("workspaceId", project_id);
            }
            if let Some(environment) = environment {
                query.append_pair("environment", environment);
            }
            query
                .append_pair("secretPath", "/")
                .append_pair("include_imports", "true")
                .append_pair("recursive", "true")
                .append_pair("expandSecretReferences", "true");
        }
        let endpoint = url.path().to_string();

        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| Error::secret_store(&endpoint, None, e.to_string()))?;

        if !response.status().is_success() {
            let (status, message) = read_error(response).await;
            if is_environment_not_found(&message) {
                debug!("{}", message);
                return Err(Error::environment_not_found(environment, message));
            }
            return Err(Error::secret_store(&endpoint, Some(status), message));
        }

        let body: SecretsResponse = response.json().await.map_err(|e| {
            Error::secret_store(&endpoint, None, format!("invalid secrets response: {e}"))
        })?;

        let secrets = body.into_variables();
        debug!("Fetched {} secrets from Infisical", secrets.len());
        Ok(secrets)
    }
}

fn is_environment_not_found(message: &str) -> bool {
    message.contains("Environment with slug") && message.contains("not found")
}

/// Extract the status code and the most useful message from a failed response
async fn read_error(response: reqwest::Response) -> (u16, String) {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let message = serde_json::from_str::<ApiErrorBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .or_else(|| (!text.trim().is_empty()).then(|| text.trim().to_string()))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        });

    (status.as_u16(), message)
}
