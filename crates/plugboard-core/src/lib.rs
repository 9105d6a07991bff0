// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plugboard integration layer.
//!
//! This crate holds the plugin contract: the traits a provider implements
//! ([`ToolProvider`], optionally [`ConfigurableIntegration`]), the runtime
//! [`Tool`] they build, the [`CredentialResolver`] indirection, and the
//! descriptive data they exchange with the host.

pub mod error;
pub mod traits;
pub mod types;

pub use error::PlugboardError;
pub use types::{
    AppMeta, ConfigField, ConnectionTestResult, CredentialValue, FieldType, IntegrationMeta,
    ToolAccess, ToolCatalog, ToolContext, ToolDescriptor, ValidationRules, VisibleValue,
    VisibleWhen,
};

pub use traits::{
    API_KEY_FIELD, ConfigurableIntegration, CredentialResolver, Tool, ToolOutput, ToolProvider,
    scalar_text,
};
