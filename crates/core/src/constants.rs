/// Constants used throughout the env-run codebase
// Files
pub const BASE_ENV_FILENAME: &str = ".env";
pub const WORKSPACE_MARKER: &str = "pnpm-workspace.yaml";
pub const GENERATED_FILE_HEADER: &str = "# This file was automatically generated by env-run";
pub const GENERATED_FILE_NOTICE: &str = "# Do not edit manually - changes will be overwritten";

// Infisical credentials
pub const INFISICAL_CLIENT_ID_VAR: &str = "INFISICAL_MACHINE_IDENTITY_CLIENT_ID";
pub const INFISICAL_CLIENT_SECRET_VAR: &str = "INFISICAL_MACHINE_IDENTITY_CLIENT_SECRET";
pub const INFISICAL_PROJECT_ID_VAR: &str = "INFISICAL_PROJECT_ID";
pub const INFISICAL_SITE_URL_VAR: &str = "INFISICAL_SITE_URL";
pub const DEFAULT_INFISICAL_SITE_URL: &str = "https://app.infisical.com";

// Placeholder values shipped in example .env files
pub const PLACEHOLDER_CLIENT_ID: &str = "YOUR_INFISICAL_CLIENT_ID";
pub const PLACEHOLDER_CLIENT_SECRET: &str = "YOUR_INFISICAL_CLIENT_SECRET";
pub const PLACEHOLDER_PROJECT_ID: &str = "YOUR_INFISICAL_PROJECT_ID";
pub const TEMPLATE_PREFIX: &str = "${";

// env-run's own configuration
pub const ENV_RUN_ROOT_VAR: &str = "ENV_RUN_ROOT";
pub const ENV_RUN_LOG_VAR: &str = "ENV_RUN_LOG";

// CI detection
pub const CI_DETECTION_VAR: &str = "GITHUB_ACTIONS";
