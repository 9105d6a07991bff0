// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry, credential resolution, and bootstrap wiring.
//!
//! Hosts register every [`ToolProvider`](plugboard_core::ToolProvider) at
//! startup through a [`PlugboardBuilder`], then share the frozen
//! [`Plugboard`] for name lookups and credential checks.

pub mod bootstrap;
pub mod catalog;
pub mod masking;
pub mod registry;
pub mod resolver;

pub use bootstrap::{Plugboard, PlugboardBuilder};
pub use catalog::{CatalogEntry, build_catalog, render_prompt_catalog, search_catalog};
pub use masking::{is_masked, mask_config, mask_secret, unmask_secrets};
pub use registry::ToolProviderRegistry;
pub use resolver::ConfigCredentialResolver;
