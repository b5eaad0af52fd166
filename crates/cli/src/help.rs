pub const HELP_TEXT: &str = r#"
NAME
  env-run - A command-line utility for managing and injecting environment variables.

SYNOPSIS
  env-run [options] -- <command>

DESCRIPTION
  env-run executes a command after loading environment variables from .env files and/or Infisical.
  Variables are layered with increasing precedence: process environment, .env, .env.<name>,
  Infisical secrets and finally --overrides.

OPTIONS
  --env <name>
    Environment to use (e.g., dev-docker, staging). Selects the .env.<name> file to load and the
    Infisical environment to fetch when that file does not exist yet. Fetched secrets are cached
    in .env.<name>.

  --overrides <key=value,...>
    Environment variable overrides & additions with highest precedence. Supports both
    comma-separated format (KEY1=value1,KEY2=value2) and bracket format ([KEY1=value1, KEY2=value2]).

  --force-refresh
    Fetch the latest secrets from Infisical, overwriting any cached .env.<name> file.
    Can be used without a command to only refresh the secrets.

  --debug
    Display a table showing the source of each environment variable (process, .env,
    .env.<name>, Infisical, or CLI overrides) and which values were overridden.

  --help
    Display this help message.

ENVIRONMENT
  INFISICAL_MACHINE_IDENTITY_CLIENT_ID, INFISICAL_MACHINE_IDENTITY_CLIENT_SECRET, INFISICAL_PROJECT_ID
    Machine identity used to fetch secrets. Read from the process environment, falling back
    to the root .env file.
  INFISICAL_SITE_URL     Self-hosted Infisical URL (default https://app.infisical.com).
  GITHUB_ACTIONS=true    Skip resolution entirely and run with the inherited environment.
  ENV_RUN_ROOT           Workspace root; otherwise the nearest directory with pnpm-workspace.yaml.
  ENV_RUN_LOG            Log filter (e.g. debug, env_run_env=trace).

EXAMPLES
  - Run a command using a local environment file:
    $ env-run --env=dev-docker -- nx serve api

  - Override specific environment variables:
    $ env-run --env=dev --overrides='[NODE_ENV=production, PORT=3000]' -- nx serve api

  - Override variables with comma format:
    $ env-run --env=dev --overrides=NODE_ENV=production,PORT=3000 -- nx serve api

  - Fetch secrets from Infisical for a "staging" environment:
    $ env-run --env=staging -- nx test api

  - Force a refresh of secrets from Infisical and run a command:
    $ env-run --env=staging --force-refresh -- nx test api

  - Refresh secrets without running a command:
    $ env-run --env=staging --force-refresh

  - Debug environment variables with overrides:
    $ env-run --env=dev --overrides='[DB_HOST=localhost]' --debug -- node my-script.js
"#;
