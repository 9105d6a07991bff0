// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Credential lookup indirection.

use serde_json::Value;

use crate::types::CredentialValue;

/// Field whose presence marks an integration as configured.
pub const API_KEY_FIELD: &str = "api_key";

/// Resolves credential values for integrations without tying callers to a
/// storage mechanism.
pub trait CredentialResolver: Send + Sync {
    /// Looks up `key` for `integration`. Absence is `None`, never an error.
    fn get(&self, integration: &str, key: &str) -> Option<CredentialValue>;

    /// Looks up `key`, falling back to `default` when absent.
    fn get_or(&self, integration: &str, key: &str, default: CredentialValue) -> CredentialValue {
        self.get(integration, key).unwrap_or(default)
    }

    /// Looks up `key` as text. Numbers and booleans are rendered; other
    /// shapes (null, lists, tables) count as absent.
    fn get_string(&self, integration: &str, key: &str) -> Option<String> {
        self.get(integration, key).as_ref().and_then(scalar_text)
    }

    /// True iff the integration's `api_key` is present and non-empty.
    ///
    /// Only `api_key` is consulted, even for integrations whose schema
    /// requires other fields.
    fn is_configured(&self, integration: &str) -> bool {
        self.get(integration, API_KEY_FIELD)
            .is_some_and(|value| is_present(&value))
    }
}

/// Emptiness rule used by [`CredentialResolver::is_configured`]: only a
/// non-empty string is present.
pub fn is_present(value: &Value) -> bool {
    matches!(value, Value::String(s) if !s.is_empty())
}

/// Text form of a scalar setting, as [`CredentialResolver::get_string`]
/// returns it. `None` for null, lists and tables.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
