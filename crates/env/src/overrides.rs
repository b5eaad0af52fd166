use env_run_core::EnvironmentVariables;

/// Turn `KEY=VALUE` override strings into a mapping.
///
/// Only the first `=` separates key from value. Entries without a separator
/// or with an empty key are dropped; a later entry for the same key wins.
pub fn parse_cli_overrides<S: AsRef<str>>(overrides: &[S]) -> EnvironmentVariables {
    overrides
        .iter()
        .filter_map(|entry| entry.as_ref().split_once('='))
        .filter(|(key, _)| !key.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_without_separator_are_dropped() {
        let vars = parse_cli_overrides(&["VALID=ok", "INVALID_NO_EQUALS", "ANOTHER=fine"]);
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("VALID").map(String::as_str), Some("ok"));
        assert_eq!(vars.get("ANOTHER").map(String::as_str), Some("fine"));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let vars = parse_cli_overrides(&["DATABASE_URL=postgres://h/db?sslmode=require"]);
        assert_eq!(
            vars.get("DATABASE_URL").map(String::as_str),
            Some("postgres://h/db?sslmode=require")
        );
    }

    #[test]
    fn test_empty_key_and_empty_value() {
        let vars = parse_cli_overrides(&["=nokey", "EMPTY="]);
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("EMPTY").map(String::as_str), Some(""));
    }

    #[test]
    fn test_empty_list() {
        let none: [&str; 0] = [];
        assert!(parse_cli_overrides(&none).is_empty());
    }
}
