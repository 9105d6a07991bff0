// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory credential resolver.

use std::collections::HashMap;

use plugboard_core::{CredentialResolver, CredentialValue};

/// Credential resolver over a fixed map, for tests and host overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentialResolver {
    values: HashMap<(String, String), CredentialValue>,
}

impl StaticCredentialResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert of `integration.key = value`.
    pub fn with(
        mut self,
        integration: &str,
        key: &str,
        value: impl Into<CredentialValue>,
    ) -> Self {
        self.values
            .insert((integration.to_string(), key.to_string()), value.into());
        self
    }
}

impl CredentialResolver for StaticCredentialResolver {
    fn get(&self, integration: &str, key: &str) -> Option<CredentialValue> {
        self.values
            .get(&(integration.to_string(), key.to_string()))
            .cloned()
    }
}
