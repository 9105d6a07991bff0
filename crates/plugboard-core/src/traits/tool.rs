// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime tool trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::PlugboardError;

/// Output from a tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    /// The content returned by the tool (text output, JSON, etc.).
    pub content: String,
    /// Whether the invocation ended in a tool-level error the caller should see.
    pub is_error: bool,
}

impl ToolOutput {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: false,
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_error: true,
        }
    }
}

/// A single callable capability constructed by a provider.
///
/// Tools are built by [`ToolProvider::create_tool`](crate::ToolProvider::create_tool)
/// and invoked with JSON input matching [`Tool::parameters_schema`].
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool's slug (unique within its provider).
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does.
    fn description(&self) -> &str;

    /// Returns the JSON Schema describing the tool's input parameters.
    fn parameters_schema(&self) -> serde_json::Value;

    /// Invokes the tool with the given JSON input.
    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, PlugboardError>;
}
