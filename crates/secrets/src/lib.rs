//! Remote secret store access for env-run
//!
//! The resolver only talks to the [`SecretStore`] trait; [`InfisicalClient`]
//! is the production implementation backed by the Infisical REST API.

mod credentials;
mod infisical;
mod response;
mod store;

pub use credentials::Credentials;
pub use infisical::InfisicalClient;
pub use response::SecretsResponse;
pub use store::SecretStore;
