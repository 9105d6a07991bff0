// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `plugboard test` command implementation.
//!
//! Builds the candidate form a settings dialog would submit: stored values
//! with secrets masked, overlaid with `--set` overrides. Masked secrets are
//! then swapped back for stored credentials and the integration's probe runs
//! under a timeout.

use std::time::{Duration, Instant};

use plugboard_core::{ConnectionTestResult, PlugboardError};
use plugboard_registry::{Plugboard, mask_config, unmask_secrets};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::Output;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Outcome of `plugboard test`, as printed.
#[derive(Debug, Serialize)]
pub struct ProbeReport {
    pub app: String,
    #[serde(flatten)]
    pub result: ConnectionTestResult,
    pub duration_ms: u64,
}

/// Parses `key=value`. Values that are valid JSON (numbers, booleans,
/// arrays) keep their type; anything else is a string.
pub fn parse_assignment(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str::<Value>(value)
        .ok()
        .filter(|v| !v.is_string() && !v.is_object())
        .unwrap_or_else(|| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Assembles the candidate config and runs the integration's probe.
pub async fn run_probe(
    plugboard: &Plugboard,
    app: &str,
    overrides: Vec<(String, Value)>,
    timeout_secs: u64,
) -> Result<ProbeReport, PlugboardError> {
    let provider = plugboard
        .registry()
        .get(app)
        .ok_or_else(|| PlugboardError::ProviderNotFound {
            name: app.to_string(),
        })?;
    let integration = provider.as_configurable().ok_or_else(|| {
        PlugboardError::Config(format!("provider `{app}` does not support connection tests"))
    })?;

    let schema = integration.config_schema();
    let credentials = plugboard.credentials();

    let mut stored = Map::new();
    for field in &schema {
        if let Some(value) = credentials.get(app, &field.key) {
            stored.insert(field.key.clone(), value);
        }
    }
    let mut candidate = mask_config(&schema, &stored);
    for (key, value) in overrides {
        candidate.insert(key, value);
    }
    let resolved = unmask_secrets(app, &schema, &candidate, credentials.as_ref());
    debug!(app, keys = ?resolved.keys().collect::<Vec<_>>(), "probing integration");

    let started = Instant::now();
    let result = match tokio::time::timeout(
        Duration::from_secs(timeout_secs),
        integration.test_connection(&resolved),
    )
    .await
    {
        Ok(result) => result,
        Err(_) => ConnectionTestResult::failed(format!(
            "connection test timed out after {timeout_secs}s"
        )),
    };
    let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(app, success = result.success, duration_ms, "connection test finished");

    Ok(ProbeReport {
        app: app.to_string(),
        result,
        duration_ms,
    })
}

pub fn render(report: &ProbeReport, output: Output) -> Result<String, PlugboardError> {
    if output.json {
        return serde_json::to_string_pretty(report)
            .map_err(|e| PlugboardError::Internal(format!("failed to serialize output: {e}")));
    }

    let detail = if report.result.success {
        report.result.message.as_deref().unwrap_or("connected")
    } else {
        report.result.error.as_deref().unwrap_or("connection failed")
    };
    let status = match (report.result.success, output.color) {
        (true, true) => {
            use colored::Colorize;
            "✓".green().to_string()
        }
        (false, true) => {
            use colored::Colorize;
            "✗".red().to_string()
        }
        (true, false) => "[OK]".to_string(),
        (false, false) => "[FAIL]".to_string(),
    };
    Ok(format!(
        "{status} {} {detail} ({}ms)",
        report.app, report.duration_ms
    ))
}
