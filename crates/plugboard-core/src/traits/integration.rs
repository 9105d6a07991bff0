// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Optional self-service configuration capability.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::types::{ConfigField, ConnectionTestResult, IntegrationMeta, ValidationRules};

/// Extra capability for providers whose settings users edit themselves.
///
/// Exposed to the host through
/// [`ToolProvider::as_configurable`](crate::ToolProvider::as_configurable).
#[async_trait]
pub trait ConfigurableIntegration: Send + Sync {
    /// Metadata used to render integration cards and config dialogs.
    fn integration_meta(&self) -> IntegrationMeta;

    /// Ordered field definitions for dynamic form rendering.
    fn config_schema(&self) -> Vec<ConfigField>;

    /// Probes connectivity with candidate (unsaved) config values.
    ///
    /// Masked secrets must already be substituted by the caller. The probe
    /// never persists anything and reports failure through the result, not
    /// by returning an error.
    async fn test_connection(&self, config: &Map<String, Value>) -> ConnectionTestResult;

    /// Validation constraints for saving config, keyed by schema field key.
    fn validation_rules(&self) -> ValidationRules;
}
