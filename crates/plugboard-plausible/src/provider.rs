// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `plausible` integration provider.

use std::sync::Arc;

use async_trait::async_trait;
use plugboard_core::{
    API_KEY_FIELD, AppMeta, ConfigField, ConfigurableIntegration, ConnectionTestResult,
    CredentialResolver, FieldType, IntegrationMeta, PlugboardError, Tool, ToolAccess, ToolCatalog,
    ToolContext, ToolDescriptor, ToolProvider, ValidationRules, scalar_text,
};
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::client::{DEFAULT_BASE_URL, PlausibleClient};
use crate::tools::{AggregateStatsTool, ListSitesTool, RealtimeVisitorsTool, ToolDefaults};

/// Integration name, also the config namespace key.
pub const INTEGRATION: &str = "plausible";

const DEFAULT_PERIOD: &str = "30d";

const LIST_SITES: &str = "plausible::ListSites";
const AGGREGATE_STATS: &str = "plausible::AggregateStats";
const REALTIME_VISITORS: &str = "plausible::RealtimeVisitors";

/// Privacy-friendly web analytics via the Plausible API.
///
/// Credentials are read through the bound [`CredentialResolver`] each time a
/// tool is created, so the provider itself holds no secrets.
pub struct PlausibleProvider {
    credentials: Arc<dyn CredentialResolver>,
}

impl PlausibleProvider {
    pub fn new(credentials: Arc<dyn CredentialResolver>) -> Self {
        Self { credentials }
    }

    fn client(&self) -> Result<PlausibleClient, PlugboardError> {
        let api_key = self
            .credentials
            .get_string(INTEGRATION, API_KEY_FIELD)
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                PlugboardError::Config("plausible integration has no api_key configured".into())
            })?;
        let url = self
            .credentials
            .get_string(INTEGRATION, "url")
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        PlausibleClient::new(SecretString::from(api_key), &url)
    }

    fn defaults(&self) -> ToolDefaults {
        ToolDefaults {
            default_site: self
                .credentials
                .get_string(INTEGRATION, "default_site")
                .filter(|s| !s.is_empty()),
            period: self
                .credentials
                .get_string(INTEGRATION, "period")
                .unwrap_or_else(|| DEFAULT_PERIOD.to_string()),
        }
    }
}

impl ToolProvider for PlausibleProvider {
    fn app_name(&self) -> &str {
        INTEGRATION
    }

    fn app_meta(&self) -> AppMeta {
        AppMeta {
            label: "web analytics, visitors, pageviews".to_string(),
            description: "Website traffic statistics from Plausible Analytics".to_string(),
            icon: "ph:chart-line".to_string(),
            logo: Some("/images/integrations/plausible.svg".to_string()),
        }
    }

    fn tools(&self) -> ToolCatalog {
        let mut tools = ToolCatalog::new();
        tools.insert(
            "plausible_list_sites".to_string(),
            ToolDescriptor::new(
                LIST_SITES,
                ToolAccess::Read,
                "List Sites",
                "List the websites tracked in Plausible",
                "ph:globe",
            ),
        );
        tools.insert(
            "plausible_aggregate_stats".to_string(),
            ToolDescriptor::new(
                AGGREGATE_STATS,
                ToolAccess::Read,
                "Aggregate Stats",
                "Get aggregate traffic metrics for a site",
                "ph:chart-bar",
            ),
        );
        tools.insert(
            "plausible_realtime_visitors".to_string(),
            ToolDescriptor::new(
                REALTIME_VISITORS,
                ToolAccess::Read,
                "Realtime Visitors",
                "Get the current number of visitors on a site",
                "ph:users",
            ),
        );
        tools
    }

    fn is_integration(&self) -> bool {
        true
    }

    fn create_tool(
        &self,
        class: &str,
        _context: &ToolContext,
    ) -> Result<Arc<dyn Tool>, PlugboardError> {
        if ![LIST_SITES, AGGREGATE_STATS, REALTIME_VISITORS].contains(&class) {
            return Err(PlugboardError::UnknownToolImplementation {
                provider: INTEGRATION.to_string(),
                class: class.to_string(),
            });
        }

        let client = Arc::new(self.client()?);
        let tool: Arc<dyn Tool> = match class {
            LIST_SITES => Arc::new(ListSitesTool::new(client)),
            AGGREGATE_STATS => Arc::new(AggregateStatsTool::new(client, self.defaults())),
            _ => Arc::new(RealtimeVisitorsTool::new(client, self.defaults())),
        };
        Ok(tool)
    }

    fn as_configurable(&self) -> Option<&dyn ConfigurableIntegration> {
        Some(self as &dyn ConfigurableIntegration)
    }
}

#[async_trait]
impl ConfigurableIntegration for PlausibleProvider {
    fn integration_meta(&self) -> IntegrationMeta {
        IntegrationMeta {
            name: "Plausible Analytics".to_string(),
            description: "Query visitors, pageviews and traffic trends for your websites."
                .to_string(),
            icon: "ph:chart-line".to_string(),
            logo: Some("/images/integrations/plausible.svg".to_string()),
            category: "analytics".to_string(),
            badge: None,
            docs_url: Some("https://plausible.io/docs/stats-api".to_string()),
        }
    }

    fn config_schema(&self) -> Vec<ConfigField> {
        vec![
            ConfigField::new(API_KEY_FIELD, FieldType::Secret, "API Key")
                .placeholder("Your Plausible API key")
                .hint("Create one under Settings > API Keys")
                .required(),
            ConfigField::new("url", FieldType::Url, "Instance URL")
                .placeholder(DEFAULT_BASE_URL)
                .hint("Only change this for self-hosted instances")
                .default_value(DEFAULT_BASE_URL),
            ConfigField::new("default_site", FieldType::Text, "Default Site")
                .placeholder("example.com")
                .hint("Used when a request does not name a site"),
            ConfigField::new("period", FieldType::Select, "Default Period")
                .option("day", "Today")
                .option("7d", "Last 7 days")
                .option("30d", "Last 30 days")
                .option("month", "This month")
                .option("6mo", "Last 6 months")
                .option("12mo", "Last 12 months")
                .default_value(DEFAULT_PERIOD),
            ConfigField::new("sites", FieldType::StringList, "Sites")
                .item_icon("ph:globe")
                .item_placeholder("example.com")
                .hint("Sites the assistant may query"),
        ]
    }

    async fn test_connection(&self, config: &Map<String, Value>) -> ConnectionTestResult {
        let text = |key: &str| config.get(key).and_then(scalar_text).filter(|v| !v.is_empty());
        let Some(api_key) = text(API_KEY_FIELD) else {
            return ConnectionTestResult::failed("API key is required");
        };
        let url = text("url").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let url = url.as_str();

        let client = match PlausibleClient::new(SecretString::from(api_key), url) {
            Ok(client) => client,
            Err(e) => return ConnectionTestResult::failed(e.to_string()),
        };

        match client.sites_status().await {
            Ok(status) if status.is_success() => {
                debug!(url, "plausible connection verified");
                ConnectionTestResult::ok(format!("Connected to Plausible at {}", client.base_url()))
            }
            Ok(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) => {
                ConnectionTestResult::failed("Invalid API key")
            }
            Ok(status) => ConnectionTestResult::failed(format!("Plausible returned HTTP {status}")),
            Err(e) => {
                warn!(url, error = %e, "plausible connection test failed");
                ConnectionTestResult::failed(format!("Could not reach Plausible: {e}"))
            }
        }
    }

    fn validation_rules(&self) -> ValidationRules {
        let mut rules = ValidationRules::new();
        rules.insert(
            API_KEY_FIELD.to_string(),
            vec!["required".to_string(), "string".to_string()],
        );
        rules.insert(
            "url".to_string(),
            vec!["nullable".to_string(), "url".to_string()],
        );
        rules.insert(
            "default_site".to_string(),
            vec!["nullable".to_string(), "string".to_string()],
        );
        rules.insert(
            "period".to_string(),
            vec![
                "nullable".to_string(),
                "in:day,7d,30d,month,6mo,12mo".to_string(),
            ],
        );
        rules.insert(
            "sites".to_string(),
            vec!["nullable".to_string(), "array".to_string()],
        );
        rules
    }
}
