// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plugboard integration layer.

use thiserror::Error;

/// The primary error type used across provider traits and core operations.
///
/// Lookup misses (unknown provider, missing credential) are not errors: they
/// surface as `Option` values. Only broken provider wiring and tool failures
/// propagate through this type.
#[derive(Debug, Error)]
pub enum PlugboardError {
    /// Configuration errors (invalid values, missing required credentials).
    #[error("configuration error: {0}")]
    Config(String),

    /// A caller required a provider that is not registered.
    #[error("provider not found: {name}")]
    ProviderNotFound { name: String },

    /// `create_tool` was asked for an implementation the provider does not know.
    #[error("unknown tool implementation `{class}` for provider `{provider}`")]
    UnknownToolImplementation { provider: String, class: String },

    /// Tool invocation errors (bad input, upstream failure).
    #[error("tool error: {message}")]
    Tool {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// HTTP transport errors raised by integration clients.
    #[error("http error: {message}")]
    Http {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlugboardError {
    /// Shorthand for a [`PlugboardError::Tool`] without an underlying source.
    pub fn tool(message: impl Into<String>) -> Self {
        PlugboardError::Tool {
            message: message.into(),
            source: None,
        }
    }
}
