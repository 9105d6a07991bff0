// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Secret masking for config forms.
//!
//! Stored secrets are shown masked in forms. When a user submits a form
//! without retyping a secret, the masked value comes back and must be swapped
//! for the stored credential before `test_connection` runs. That swap is the
//! host's job; these helpers implement it against a [`CredentialResolver`].

use plugboard_core::{ConfigField, CredentialResolver, FieldType};
use serde_json::{Map, Value};
use tracing::debug;

/// Character used to mask secrets.
pub const MASK_CHAR: char = '*';

/// Number of trailing characters left visible.
const VISIBLE_SUFFIX: usize = 4;

/// Masks all but the last four characters; short values are fully masked.
pub fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= VISIBLE_SUFFIX {
        return MASK_CHAR.to_string().repeat(len);
    }
    let suffix: String = secret.chars().skip(len - VISIBLE_SUFFIX).collect();
    format!("{}{suffix}", MASK_CHAR.to_string().repeat(len - VISIBLE_SUFFIX))
}

/// Whether a submitted value is a masked placeholder.
pub fn is_masked(value: &Value) -> bool {
    value.as_str().is_some_and(|s| s.contains(MASK_CHAR))
}

/// Copy of `values` with every `secret` field masked for display.
pub fn mask_config(schema: &[ConfigField], values: &Map<String, Value>) -> Map<String, Value> {
    let mut masked = values.clone();
    for field in schema.iter().filter(|f| f.field_type == FieldType::Secret) {
        if let Some(Value::String(secret)) = masked.get(&field.key) {
            let hidden = mask_secret(secret);
            masked.insert(field.key.clone(), Value::String(hidden));
        }
    }
    masked
}

/// Replaces masked `secret` values in `candidate` with stored credentials.
///
/// Masked values without a stored counterpart are left untouched so the
/// connection probe reports them instead of silently succeeding.
pub fn unmask_secrets(
    integration: &str,
    schema: &[ConfigField],
    candidate: &Map<String, Value>,
    credentials: &dyn CredentialResolver,
) -> Map<String, Value> {
    let mut resolved = candidate.clone();
    for field in schema.iter().filter(|f| f.field_type == FieldType::Secret) {
        let masked = resolved.get(&field.key).is_some_and(is_masked);
        if !masked {
            continue;
        }
        if let Some(stored) = credentials.get(integration, &field.key) {
            debug!(integration, key = %field.key, "substituting stored secret");
            resolved.insert(field.key.clone(), stored);
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugboard_test_utils::StaticCredentialResolver;
    use serde_json::json;

    fn schema() -> Vec<ConfigField> {
        vec![
            ConfigField::new("api_key", FieldType::Secret, "API Key"),
            ConfigField::new("url", FieldType::Url, "URL"),
        ]
    }

    fn form(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn mask_secret_keeps_last_four() {
        assert_eq!(mask_secret("sk-abcdef1234"), "*********1234");
        assert_eq!(mask_secret("abcd"), "****");
        assert_eq!(mask_secret(""), "");
    }

    #[test]
    fn mask_config_only_touches_secrets() {
        let masked = mask_config(
            &schema(),
            &form(json!({"api_key": "secret-value", "url": "https://x.test"})),
        );
        assert_eq!(masked["api_key"], "********alue");
        assert_eq!(masked["url"], "https://x.test");
        assert!(is_masked(&masked["api_key"]));
    }

    #[test]
    fn unmask_substitutes_stored_secret() {
        let credentials = StaticCredentialResolver::new().with("plausible", "api_key", "real-key");
        let candidate = form(json!({"api_key": "****-key", "url": "https://x.test"}));

        let resolved = unmask_secrets("plausible", &schema(), &candidate, &credentials);
        assert_eq!(resolved["api_key"], "real-key");
        assert_eq!(resolved["url"], "https://x.test");
    }

    #[test]
    fn unmask_leaves_retyped_secret_alone() {
        let credentials = StaticCredentialResolver::new().with("plausible", "api_key", "old-key");
        let candidate = form(json!({"api_key": "new-key"}));

        let resolved = unmask_secrets("plausible", &schema(), &candidate, &credentials);
        assert_eq!(resolved["api_key"], "new-key");
    }

    #[test]
    fn unmask_without_stored_value_keeps_mask() {
        let credentials = StaticCredentialResolver::new();
        let candidate = form(json!({"api_key": "********"}));

        let resolved = unmask_secrets("plausible", &schema(), &candidate, &credentials);
        assert_eq!(resolved["api_key"], "********");
    }
}
