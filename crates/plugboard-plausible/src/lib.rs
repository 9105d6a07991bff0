// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plausible Analytics integration for Plugboard.
//!
//! Registers as the `plausible` integration. Credentials (`api_key`, and an
//! optional `url` for self-hosted instances) come from the host's
//! [`CredentialResolver`](plugboard_core::CredentialResolver); the provider
//! also implements [`ConfigurableIntegration`](plugboard_core::ConfigurableIntegration)
//! so users can configure and probe it themselves.

pub mod client;
pub mod provider;
pub mod tools;

pub use client::{DEFAULT_BASE_URL, PlausibleClient, Site};
pub use provider::{INTEGRATION, PlausibleProvider};
