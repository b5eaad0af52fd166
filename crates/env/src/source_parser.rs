use env_run_core::EnvironmentVariables;
use once_cell::sync::Lazy;
use regex::Regex;

static ENV_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([\w.-]+)\s*=\s*(.*?)\s*$").unwrap());

/// Parse `.env` style content into a mapping.
///
/// Each `KEY=VALUE` line contributes one entry with surrounding whitespace
/// trimmed from both sides. Blank lines, `#` comments and anything else that
/// does not match are skipped. A key repeated later in the text overwrites the
/// earlier value.
pub fn parse_env_content(content: &str) -> EnvironmentVariables {
    let mut vars = EnvironmentVariables::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(captures) = ENV_LINE.captures(line) {
            vars.insert(&captures[1], &captures[2]);
        }
    }

    vars
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value<'a>(vars: &'a EnvironmentVariables, key: &str) -> Option<&'a str> {
        vars.get(key).map(String::as_str)
    }

    #[test]
    fn test_basic_pairs() {
        let vars = parse_env_content("PORT=3000\nNAME=dev\n");
        assert_eq!(vars.len(), 2);
        assert_eq!(value(&vars, "PORT"), Some("3000"));
        assert_eq!(value(&vars, "NAME"), Some("dev"));
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let vars = parse_env_content("  KEY   =   some value  \r\n");
        assert_eq!(value(&vars, "KEY"), Some("some value"));
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let vars = parse_env_content("# comment\n\n   \n  # indented=comment\nA=1\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(value(&vars, "A"), Some("1"));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let vars = parse_env_content("A=1\nB=2\nA=3\n");
        assert_eq!(value(&vars, "A"), Some("3"));
        assert_eq!(vars.len(), 2);
    }

    #[test]
    fn test_value_keeps_equals_and_quotes() {
        let vars = parse_env_content("URL=postgres://u:p@h/db?a=b\nQUOTED=\"x\"\n");
        assert_eq!(value(&vars, "URL"), Some("postgres://u:p@h/db?a=b"));
        assert_eq!(value(&vars, "QUOTED"), Some("\"x\""));
    }

    #[test]
    fn test_empty_value() {
        let vars = parse_env_content("EMPTY=\n");
        assert_eq!(value(&vars, "EMPTY"), Some(""));
    }

    #[test]
    fn test_malformed_lines_are_ignored() {
        let vars = parse_env_content("no equals here\n=novalue\nexport X=1\nBAD KEY=1\nOK.key-1=yes\n");
        assert_eq!(vars.len(), 1);
        assert_eq!(value(&vars, "OK.key-1"), Some("yes"));
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_env_content("").is_empty());
    }
}
