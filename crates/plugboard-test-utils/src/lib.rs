// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Plugboard.
//!
//! - [`MockProvider`] - configurable provider (built-in, integration, or configurable)
//! - [`MockTool`] - echo tool built by `MockProvider`
//! - [`StaticCredentialResolver`] - in-memory credential store

pub mod mock_provider;
pub mod static_resolver;

pub use mock_provider::{MOCK_TOOL_CLASS, MockProvider, MockTool};
pub use static_resolver::StaticCredentialResolver;
