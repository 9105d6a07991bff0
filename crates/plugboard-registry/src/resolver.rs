// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default credential resolver backed by the loaded configuration.

use std::sync::Arc;

use plugboard_config::PlugboardConfig;
use plugboard_core::{CredentialResolver, CredentialValue};
use tracing::trace;

/// Reads credentials from `integrations.<integration>.<key>` in the
/// configuration store.
///
/// ```toml
/// [integrations.plausible]
/// api_key = "..."            # or PLUGBOARD_INTEGRATIONS__PLAUSIBLE__API_KEY
/// url = "https://plausible.io"
/// ```
#[derive(Debug, Clone)]
pub struct ConfigCredentialResolver {
    config: Arc<PlugboardConfig>,
}

impl ConfigCredentialResolver {
    pub fn new(config: Arc<PlugboardConfig>) -> Self {
        Self { config }
    }
}

impl CredentialResolver for ConfigCredentialResolver {
    fn get(&self, integration: &str, key: &str) -> Option<CredentialValue> {
        let value = self.config.integrations.value(integration, key).cloned();
        trace!(integration, key, found = value.is_some(), "credential lookup");
        value
    }
}
