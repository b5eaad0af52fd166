use clap::Parser;

/// Command-line arguments.
///
/// Everything after `--`, or after the first bare word, is the command to run
/// and is passed through untouched. Unknown flags before the command are
/// rejected.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "env-run")]
#[command(about = "Run a command with layered environment variables", long_about = None)]
#[command(version, disable_help_flag = true, args_override_self = true)]
pub struct Cli {
    /// Environment to use (selects .env.<name> and the Infisical environment)
    #[arg(long = "env", value_name = "NAME")]
    pub env: Option<String>,

    /// Highest-precedence overrides: KEY=V,KEY2=V2 or [KEY=V, KEY2=V2]
    #[arg(long, value_name = "LIST")]
    pub overrides: Option<String>,

    /// Fetch fresh secrets from Infisical and overwrite .env.<name>
    #[arg(long)]
    pub force_refresh: bool,

    /// Print where every variable came from
    #[arg(long)]
    pub debug: bool,

    /// Print help
    #[arg(long)]
    pub help: bool,

    /// Command to run, followed by its arguments
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}

/// Options for a single run, after override parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub env_name: Option<String>,
    pub force_refresh: bool,
    pub debug: bool,
    pub overrides: Vec<String>,
    pub command: Vec<String>,
}

impl Cli {
    /// Help is shown when asked for, or when there is nothing to do
    pub fn needs_help(&self) -> bool {
        self.help || (self.command.is_empty() && !self.force_refresh)
    }

    pub fn into_options(self) -> RunOptions {
        RunOptions {
            env_name: self.env,
            force_refresh: self.force_refresh,
            debug: self.debug,
            overrides: self
                .overrides
                .as_deref()
                .map(parse_overrides)
                .unwrap_or_default(),
            command: self.command,
        }
    }
}

/// Split an overrides argument into `KEY=VALUE` entries.
///
/// Accepts `A=1,B=2` and the bracketed `[A=1, B=2]` form. Entries are trimmed
/// and empty ones are dropped.
pub fn parse_overrides(raw: &str) -> Vec<String> {
    let mut trimmed = raw.trim();
    if let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        trimmed = inner.trim();
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("env-run").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_overrides_forms() {
        assert_eq!(parse_overrides("[A=1, B=2]"), vec!["A=1", "B=2"]);
        assert_eq!(parse_overrides("A=1,B=2"), vec!["A=1", "B=2"]);
        assert_eq!(parse_overrides(""), Vec::<String>::new());
        assert_eq!(parse_overrides("   "), Vec::<String>::new());
        assert_eq!(parse_overrides("A=1,"), vec!["A=1"]);
        assert_eq!(parse_overrides("[]"), Vec::<String>::new());
        assert_eq!(parse_overrides(" , A=1 ,, B=2 "), vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_env_and_overrides_with_equals() {
        let cli = parse(&["--env=dev", "--overrides=[NODE_ENV=production, PORT=3000]", "--", "nx", "serve"]);
        let options = cli.into_options();
        assert_eq!(options.env_name.as_deref(), Some("dev"));
        assert_eq!(options.overrides, vec!["NODE_ENV=production", "PORT=3000"]);
        assert_eq!(options.command, vec!["nx", "serve"]);
    }

    #[test]
    fn test_separate_value_tokens() {
        let cli = parse(&["--env", "staging", "--overrides", "A=1,B=2", "--", "node", "app.js"]);
        assert_eq!(cli.env.as_deref(), Some("staging"));
        assert_eq!(cli.into_options().overrides, vec!["A=1", "B=2"]);
    }

    #[test]
    fn test_flags() {
        let cli = parse(&["--force-refresh", "--debug", "--env", "dev"]);
        assert!(cli.force_refresh);
        assert!(cli.debug);
        assert!(!cli.needs_help());

        let cli = parse(&["--help"]);
        assert!(cli.help);
        assert!(cli.needs_help());
    }

    #[test]
    fn test_nothing_to_do_shows_help() {
        assert!(parse(&[]).needs_help());
        assert!(parse(&["--env", "dev"]).needs_help());
    }

    #[test]
    fn test_command_after_separator_keeps_flags() {
        let cli = parse(&["--debug", "--", "node", "--inspect", "--env", "x"]);
        assert!(cli.debug);
        assert_eq!(cli.env, None);
        assert_eq!(cli.command, vec!["node", "--inspect", "--env", "x"]);
    }

    #[test]
    fn test_first_bare_word_starts_command() {
        let cli = parse(&["--env", "dev", "echo", "hello", "--debug"]);
        assert!(!cli.debug);
        assert_eq!(cli.command, vec!["echo", "hello", "--debug"]);
    }

    #[test]
    fn test_unknown_flag_before_command_is_rejected() {
        let err = Cli::try_parse_from(["env-run", "-x", "--env", "dev", "echo"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);

        let err = Cli::try_parse_from(["env-run", "--verbose", "echo", "hi"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_dash_tokens_after_command_belong_to_it() {
        let cli = parse(&["--env", "dev", "echo", "-x", "--verbose"]);
        assert_eq!(cli.env.as_deref(), Some("dev"));
        assert_eq!(cli.command, vec!["echo", "-x", "--verbose"]);
    }

    #[test]
    fn test_last_occurrence_wins() {
        let cli = parse(&["--env", "a", "--env", "b", "true"]);
        assert_eq!(cli.env.as_deref(), Some("b"));
    }
}
