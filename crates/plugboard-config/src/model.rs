// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! Fixed sections use `#[serde(deny_unknown_fields)]`; the `[integrations]`
//! namespace is an open table of tables because its keys are defined by
//! whichever providers the host registers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level Plugboard configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlugboardConfig {
    /// Host-level settings.
    #[serde(default)]
    pub core: CoreConfig,

    /// Per-integration credentials and settings, addressed as
    /// `integrations.<integration>.<key>`.
    #[serde(default)]
    pub integrations: IntegrationsConfig,
}

/// Host-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CoreConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings of a single integration: key -> value.
pub type IntegrationSettings = BTreeMap<String, Value>;

/// The `[integrations]` namespace.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct IntegrationsConfig(BTreeMap<String, IntegrationSettings>);

impl IntegrationsConfig {
    /// Value stored at `integrations.<integration>.<key>`.
    pub fn value(&self, integration: &str, key: &str) -> Option<&Value> {
        self.0.get(integration).and_then(|settings| settings.get(key))
    }

    /// Names of integrations that have at least one setting, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Sets a value, for hosts that populate the store programmatically.
    pub fn insert(&mut self, integration: impl Into<String>, key: impl Into<String>, value: Value) {
        self.0
            .entry(integration.into())
            .or_default()
            .insert(key.into(), value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &IntegrationSettings)> {
        self.0.iter()
    }
}
