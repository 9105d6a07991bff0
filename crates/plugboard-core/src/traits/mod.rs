// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Capability traits implemented by providers and their tools.
//!
//! [`ToolProvider`] is the base capability every plugin implements.
//! [`ConfigurableIntegration`] is optional and discovered at runtime through
//! [`ToolProvider::as_configurable`].

pub mod credential;
pub mod integration;
pub mod provider;
pub mod tool;

pub use credential::{API_KEY_FIELD, CredentialResolver, is_present, scalar_text};
pub use integration::ConfigurableIntegration;
pub use provider::ToolProvider;
pub use tool::{Tool, ToolOutput};
