// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only Plausible tools.
//!
//! Upstream failures are returned as error output so the model sees them;
//! only malformed input propagates as [`PlugboardError`].

use std::sync::Arc;

use async_trait::async_trait;
use plugboard_core::{PlugboardError, Tool, ToolOutput};
use serde_json::{Value, json};

use crate::client::PlausibleClient;

const DEFAULT_METRICS: &str = "visitors,pageviews,bounce_rate,visit_duration";

/// Settings shared by every tool built from one credential snapshot.
#[derive(Debug, Clone)]
pub struct ToolDefaults {
    pub default_site: Option<String>,
    pub period: String,
}

impl ToolDefaults {
    fn site(&self, input: &Value) -> Option<String> {
        input["site_id"]
            .as_str()
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .or_else(|| self.default_site.clone())
    }
}

fn missing_site() -> ToolOutput {
    ToolOutput::error("no site_id given and no default site configured")
}

fn site_param() -> Value {
    json!({
        "type": "string",
        "description": "Site domain as registered in Plausible; defaults to the configured site"
    })
}

/// Lists the sites the API key can read.
pub struct ListSitesTool {
    client: Arc<PlausibleClient>,
}

impl ListSitesTool {
    pub fn new(client: Arc<PlausibleClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListSitesTool {
    fn name(&self) -> &str {
        "plausible_list_sites"
    }

    fn description(&self) -> &str {
        "List the websites tracked in Plausible"
    }

    fn parameters_schema(&self) -> Value {
        json!({ "type": "object", "properties": {} })
    }

    async fn invoke(&self, _input: Value) -> Result<ToolOutput, PlugboardError> {
        match self.client.list_sites().await {
            Ok(sites) if sites.is_empty() => Ok(ToolOutput::text("No sites found.")),
            Ok(sites) => {
                let lines: Vec<String> = sites
                    .iter()
                    .map(|s| match &s.timezone {
                        Some(tz) => format!("{} ({tz})", s.domain),
                        None => s.domain.clone(),
                    })
                    .collect();
                Ok(ToolOutput::text(lines.join("\n")))
            }
            Err(e) => Ok(ToolOutput::error(e.to_string())),
        }
    }
}

/// Aggregate traffic metrics for a period.
pub struct AggregateStatsTool {
    client: Arc<PlausibleClient>,
    defaults: ToolDefaults,
}

impl AggregateStatsTool {
    pub fn new(client: Arc<PlausibleClient>, defaults: ToolDefaults) -> Self {
        Self { client, defaults }
    }
}

#[async_trait]
impl Tool for AggregateStatsTool {
    fn name(&self) -> &str {
        "plausible_aggregate_stats"
    }

    fn description(&self) -> &str {
        "Get aggregate visitor, pageview, bounce rate and visit duration stats for a site"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "site_id": site_param(),
                "period": {
                    "type": "string",
                    "description": "Time period such as day, 7d, 30d, month, 6mo or 12mo"
                },
                "metrics": {
                    "type": "string",
                    "description": "Comma-separated metric names"
                }
            }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, PlugboardError> {
        let Some(site) = self.defaults.site(&input) else {
            return Ok(missing_site());
        };
        let period = input["period"].as_str().unwrap_or(&self.defaults.period);
        let metrics = input["metrics"].as_str().unwrap_or(DEFAULT_METRICS);

        match self.client.aggregate(&site, period, metrics).await {
            Ok(results) => {
                let body = serde_json::to_string_pretty(&results)
                    .map_err(|e| PlugboardError::Internal(e.to_string()))?;
                Ok(ToolOutput::text(format!("{site} ({period}):\n{body}")))
            }
            Err(e) => Ok(ToolOutput::error(e.to_string())),
        }
    }
}

/// Current visitor count.
pub struct RealtimeVisitorsTool {
    client: Arc<PlausibleClient>,
    defaults: ToolDefaults,
}

impl RealtimeVisitorsTool {
    pub fn new(client: Arc<PlausibleClient>, defaults: ToolDefaults) -> Self {
        Self { client, defaults }
    }
}

#[async_trait]
impl Tool for RealtimeVisitorsTool {
    fn name(&self) -> &str {
        "plausible_realtime_visitors"
    }

    fn description(&self) -> &str {
        "Get the number of visitors on a site in the last 5 minutes"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": { "site_id": site_param() }
        })
    }

    async fn invoke(&self, input: Value) -> Result<ToolOutput, PlugboardError> {
        let Some(site) = self.defaults.site(&input) else {
            return Ok(missing_site());
        };
        match self.client.realtime_visitors(&site).await {
            Ok(count) => Ok(ToolOutput::text(format!("{count} current visitors on {site}"))),
            Err(e) => Ok(ToolOutput::error(e.to_string())),
        }
    }
}
