use miette::Diagnostic;
use std::path::PathBuf;

/// Result type alias for env-run operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for env-run operations
#[derive(Debug, thiserror::Error, Diagnostic)]
pub enum Error {
    /// The Infisical login call itself failed
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(env_run::authentication),
        help("check INFISICAL_MACHINE_IDENTITY_CLIENT_ID and INFISICAL_MACHINE_IDENTITY_CLIENT_SECRET")
    )]
    Authentication { message: String },

    /// No usable credentials were available, so no login was attempted
    #[error("Not authenticated to Infisical")]
    #[diagnostic(
        code(env_run::not_authenticated),
        help("set INFISICAL_MACHINE_IDENTITY_CLIENT_ID, INFISICAL_MACHINE_IDENTITY_CLIENT_SECRET and INFISICAL_PROJECT_ID in the environment or the root .env file")
    )]
    NotAuthenticated,

    /// The remote store does not know the requested environment slug
    #[error("{message}")]
    #[diagnostic(code(env_run::environment_not_found))]
    EnvironmentNotFound {
        environment: Option<String>,
        message: String,
    },

    /// Any other failure talking to the remote store
    #[error("{}", format_secret_store_error(.status, .message))]
    #[diagnostic(code(env_run::secret_store))]
    SecretStore {
        endpoint: String,
        status: Option<u16>,
        message: String,
    },

    /// The executed command terminated unsuccessfully
    #[error("{}", format_command_failure(.command, .code))]
    #[diagnostic(code(env_run::command_failed))]
    CommandFailed { command: String, code: Option<i32> },

    /// The command could not be launched at all
    #[error("failed to launch '{command}': {source}")]
    #[diagnostic(code(env_run::command_spawn))]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// File system operations
    #[error("file system {operation} operation failed for '{}': {source}", .path.display())]
    #[diagnostic(code(env_run::file_system))]
    FileSystem {
        path: PathBuf,
        operation: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization/deserialization errors
    #[error("JSON error: {message}")]
    #[diagnostic(code(env_run::json))]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration errors
    #[error("configuration error: {message}")]
    #[diagnostic(code(env_run::configuration))]
    Configuration { message: String },
}

fn format_secret_store_error(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("Infisical request failed with status {code}: {message}"),
        None => format!("Infisical request failed: {message}"),
    }
}

fn format_command_failure(command: &str, code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("Command exited with code {code}"),
        None => format!("Command '{command}' was terminated by a signal"),
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::Json {
            message: error.to_string(),
            source: error,
        }
    }
}

// Helper methods for creating errors with context
impl Error {
    /// Create an authentication error wrapping the login failure message
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Error::Authentication {
            message: message.into(),
        }
    }

    /// Create an environment-not-found error
    #[must_use]
    pub fn environment_not_found(environment: Option<&str>, message: impl Into<String>) -> Self {
        Error::EnvironmentNotFound {
            environment: environment.map(str::to_string),
            message: message.into(),
        }
    }

    /// Create a remote secret store error
    #[must_use]
    pub fn secret_store(
        endpoint: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Error::SecretStore {
            endpoint: endpoint.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a command failure error
    #[must_use]
    pub fn command_failed(command: impl Into<String>, code: Option<i32>) -> Self {
        Error::CommandFailed {
            command: command.into(),
            code,
        }
    }

    /// Create a command launch error
    #[must_use]
    pub fn command_spawn(command: impl Into<String>, source: std::io::Error) -> Self {
        Error::CommandSpawn {
            command: command.into(),
            source,
        }
    }

    /// Create a file system error
    #[must_use]
    pub fn file_system(
        path: impl Into<PathBuf>,
        operation: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Error::FileSystem {
            path: path.into(),
            operation: operation.into(),
            source,
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Whether this is the soft "unknown remote environment" signal
    #[must_use]
    pub fn is_environment_not_found(&self) -> bool {
        matches!(self, Error::EnvironmentNotFound { .. })
    }

    /// Exit code of a failed command, if this error carries one
    #[must_use]
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Error::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }
}
