// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base provider capability.

use std::sync::Arc;

use crate::error::PlugboardError;
use crate::traits::integration::ConfigurableIntegration;
use crate::traits::tool::Tool;
use crate::types::{AppMeta, ToolCatalog, ToolContext};

/// The contract every plugin implements to describe itself and build tools.
///
/// Providers are constructed by host code, registered once at startup and
/// only read afterwards, so every method takes `&self`.
pub trait ToolProvider: Send + Sync + 'static {
    /// Unique, stable identifier (e.g. `"clock"`, `"plausible"`).
    fn app_name(&self) -> &str;

    /// Display metadata for prompt catalogs and the UI.
    fn app_meta(&self) -> AppMeta;

    /// Full catalog of tool descriptors, keyed by slug.
    fn tools(&self) -> ToolCatalog;

    /// Whether this is an external integration that can be toggled per agent,
    /// as opposed to an always-on built-in group.
    fn is_integration(&self) -> bool;

    /// Builds a tool instance for the implementation identified by `class`.
    ///
    /// Returns [`PlugboardError::UnknownToolImplementation`] when `class` is
    /// not one of this provider's implementations.
    fn create_tool(
        &self,
        class: &str,
        context: &ToolContext,
    ) -> Result<Arc<dyn Tool>, PlugboardError>;

    /// Runtime capability check for self-service configuration.
    fn as_configurable(&self) -> Option<&dyn ConfigurableIntegration> {
        None
    }
}
