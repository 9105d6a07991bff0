// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock provider for deterministic registry and host tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use plugboard_core::{
    AppMeta, ConfigField, ConfigurableIntegration, ConnectionTestResult, FieldType,
    IntegrationMeta, PlugboardError, Tool, ToolAccess, ToolCatalog, ToolContext, ToolDescriptor,
    ToolOutput, ToolProvider, ValidationRules,
};
use serde_json::{Map, Value};

/// Implementation identifier of [`MockTool`].
pub const MOCK_TOOL_CLASS: &str = "mock::Echo";

/// A provider whose shape is set up per test.
///
/// Defaults to a built-in group without tools. Every `create_tool` call and
/// every `test_connection` config is recorded for later assertions.
pub struct MockProvider {
    name: String,
    integration: bool,
    configurable: bool,
    tools: ToolCatalog,
    connection: ConnectionTestResult,
    created: Mutex<Vec<String>>,
    probed: Mutex<Vec<Map<String, Value>>>,
}

impl MockProvider {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            integration: false,
            configurable: false,
            tools: ToolCatalog::new(),
            connection: ConnectionTestResult::ok("mock connected"),
            created: Mutex::new(Vec::new()),
            probed: Mutex::new(Vec::new()),
        }
    }

    /// Marks the provider as a toggle-able integration.
    pub fn as_integration(mut self) -> Self {
        self.integration = true;
        self
    }

    /// Enables the [`ConfigurableIntegration`] capability.
    pub fn configurable(mut self) -> Self {
        self.configurable = true;
        self
    }

    /// Adds an echo tool under `slug`.
    pub fn with_tool(mut self, slug: &str) -> Self {
        self.tools.insert(
            slug.to_string(),
            ToolDescriptor::new(
                MOCK_TOOL_CLASS,
                ToolAccess::Read,
                format!("Mock {slug}"),
                "Echoes the input back",
                "ph:flask",
            ),
        );
        self
    }

    /// Sets the result returned by `test_connection`.
    pub fn with_connection_result(mut self, result: ConnectionTestResult) -> Self {
        self.connection = result;
        self
    }

    /// Classes passed to successful `create_tool` calls, in order.
    pub fn created_classes(&self) -> Vec<String> {
        self.created.lock().expect("mock state poisoned").clone()
    }

    /// Configs passed to `test_connection`, in order.
    pub fn probed_configs(&self) -> Vec<Map<String, Value>> {
        self.probed.lock().expect("mock state poisoned").clone()
    }
}

impl ToolProvider for MockProvider {
    fn app_name(&self) -> &str {
        &self.name
    }

    fn app_meta(&self) -> AppMeta {
        AppMeta {
            label: self.name.clone(),
            description: format!("Mock provider {}", self.name),
            icon: "ph:flask".to_string(),
            logo: None,
        }
    }

    fn tools(&self) -> ToolCatalog {
        self.tools.clone()
    }

    fn is_integration(&self) -> bool {
        self.integration
    }

    fn create_tool(
        &self,
        class: &str,
        _context: &ToolContext,
    ) -> Result<Arc<dyn Tool>, PlugboardError> {
        if class != MOCK_TOOL_CLASS {
            return Err(PlugboardError::UnknownToolImplementation {
                provider: self.name.clone(),
                class: class.to_string(),
            });
        }
        let slug = self
            .tools
            .iter()
            .find(|(_, d)| d.class == class)
            .map(|(slug, _)| slug.clone())
            .unwrap_or_else(|| "echo".to_string());

        self.created
            .lock()
            .expect("mock state poisoned")
            .push(class.to_string());
        Ok(Arc::new(MockTool { name: slug }))
    }

    fn as_configurable(&self) -> Option<&dyn ConfigurableIntegration> {
        if self.configurable {
            Some(self as &dyn ConfigurableIntegration)
        } else {
            None
        }
    }
}

#[async_trait]
impl ConfigurableIntegration for MockProvider {
    fn integration_meta(&self) -> IntegrationMeta {
        IntegrationMeta {
            name: self.name.clone(),
            description: format!("Mock integration {}", self.name),
            icon: "ph:flask".to_string(),
            logo: None,
            category: "testing".to_string(),
            badge: None,
            docs_url: None,
        }
    }

    fn config_schema(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::new("api_key", FieldType::Secret, "API Key").required(),
            ConfigField::new("url", FieldType::Url, "URL"),
        ]
    }

    async fn test_connection(&self, config: &Map<String, Value>) -> ConnectionTestResult {
        self.probed
            .lock()
            .expect("mock state poisoned")
            .push(config.clone());
        self.connection.clone()
    }

    fn validation_rules(&self) -> ValidationRules {
        let mut rules = ValidationRules::new();
        rules.insert("api_key".to_string(), vec!["required".to_string()]);
        rules
    }
}

/// Echo tool built by [`MockProvider`].
pub struct MockTool {
    name: String,
}

#[async_trait]
impl Tool for MockTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Echoes the input back"
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "message": { "type": "string", "description": "Message to echo" }
            },
            "required": ["message"]
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, PlugboardError> {
        let message = input["message"]
            .as_str()
            .ok_or_else(|| PlugboardError::tool("missing required 'message' parameter"))?;
        Ok(ToolOutput::text(message))
    }
}
