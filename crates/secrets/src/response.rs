//! Conversion of the Infisical "list secrets" payload into a flat mapping

use env_run_core::EnvironmentVariables;
use serde::Deserialize;
use serde_json::Value;

/// Body of `GET /api/v3/secrets/raw`.
///
/// Secret lists are kept as raw JSON so malformed entries can be skipped one
/// by one instead of failing the whole payload.
#[derive(Debug, Default, Deserialize)]
pub struct SecretsResponse {
    #[serde(default)]
    pub secrets: Value,
    #[serde(default)]
    pub imports: Value,
}

impl SecretsResponse {
    /// Flatten the payload.
    ///
    /// Import groups are applied first, in the order returned, and the
    /// primary secret list last so it wins on key collisions.
    #[must_use]
    pub fn into_variables(self) -> EnvironmentVariables {
        let mut result = EnvironmentVariables::new();

        if let Some(imports) = self.imports.as_array() {
            for group in imports {
                if let Some(secrets) = group.get("secrets") {
                    apply_secrets(secrets, &mut result);
                }
            }
        }

        apply_secrets(&self.secrets, &mut result);
        result
    }
}

fn apply_secrets(secrets: &Value, result: &mut EnvironmentVariables) {
    let Some(entries) = secrets.as_array() else {
        return;
    };

    for entry in entries {
        let key = entry.get("secretKey").and_then(Value::as_str);
        let value = entry.get("secretValue").and_then(Value::as_str);
        match (key, value) {
            (Some(key), Some(value)) if !key.trim().is_empty() && !value.trim().is_empty() => {
                result.insert(key, value);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> EnvironmentVariables {
        serde_json::from_value::<SecretsResponse>(body)
            .unwrap()
            .into_variables()
    }

    #[test]
    fn test_primary_secrets_override_imports() {
        let vars = parse(json!({
            "secrets": [
                {"secretKey": "X", "secretValue": "base"},
                {"secretKey": "Z", "secretValue": "baseZ"}
            ],
            "imports": [
                {"secretPath": "/shared", "secrets": [{"secretKey": "X", "secretValue": "imp"}]},
                {"secretPath": "/other", "secrets": [{"secretKey": "Y", "secretValue": "imp2"}]}
            ]
        }));

        let expected: EnvironmentVariables =
            [("X", "base"), ("Y", "imp2"), ("Z", "baseZ")].into_iter().collect();
        assert_eq!(vars.len(), 3);
        for (key, value) in &expected {
            assert_eq!(vars.get(key), Some(value));
        }
    }

    #[test]
    fn test_later_import_group_wins_collisions() {
        let vars = parse(json!({
            "imports": [
                {"secrets": [{"secretKey": "K", "secretValue": "first"}]},
                {"secrets": [{"secretKey": "K", "secretValue": "second"}]}
            ]
        }));
        assert_eq!(vars.get("K").map(String::as_str), Some("second"));
    }

    #[test]
    fn test_invalid_entries_are_dropped() {
        let vars = parse(json!({
            "secrets": [
                {"secretKey": "GOOD", "secretValue": "ok"},
                {"secretKey": "", "secretValue": "no-key"},
                {"secretKey": "EMPTY", "secretValue": "   "},
                {"secretKey": "NUMBER", "secretValue": 42},
                {"secretKey": 7, "secretValue": "numeric key"},
                {"secretValue": "missing key"},
                null,
                "not an object"
            ]
        }));
        assert_eq!(vars.len(), 1);
        assert_eq!(vars.get("GOOD").map(String::as_str), Some("ok"));
    }

    #[test]
    fn test_missing_or_malformed_lists() {
        assert!(parse(json!({})).is_empty());
        assert!(parse(json!({"secrets": null, "imports": {"not": "a list"}})).is_empty());
        assert!(parse(json!({"imports": [{"secretPath": "/no-secrets"}]})).is_empty());
    }
}
