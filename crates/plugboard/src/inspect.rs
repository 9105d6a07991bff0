// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-only subcommands: `providers`, `tools`, `schema`, `catalog`, `prompt`.
//!
//! Each returns the rendered text so tests can assert on it without
//! capturing stdout.

use plugboard_core::{ConfigField, PlugboardError, ToolProvider};
use plugboard_registry::{Plugboard, render_prompt_catalog, search_catalog};
use serde::Serialize;
use std::sync::Arc;

use crate::Output;

/// One row of `plugboard providers`.
#[derive(Debug, Serialize)]
pub struct ProviderRow {
    pub name: String,
    pub integration: bool,
    pub configurable: bool,
    pub configured: bool,
    pub tools: usize,
}

fn to_json<T: Serialize>(value: &T) -> Result<String, PlugboardError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| PlugboardError::Internal(format!("failed to serialize output: {e}")))
}

fn require(plugboard: &Plugboard, app: &str) -> Result<Arc<dyn ToolProvider>, PlugboardError> {
    plugboard
        .registry()
        .get(app)
        .ok_or_else(|| PlugboardError::ProviderNotFound {
            name: app.to_string(),
        })
}

fn mark(ok: bool, output: Output) -> String {
    match (ok, output.color) {
        (true, true) => {
            use colored::Colorize;
            "✓".green().to_string()
        }
        (false, true) => {
            use colored::Colorize;
            "✗".red().to_string()
        }
        (true, false) => "[OK]  ".to_string(),
        (false, false) => "[--]  ".to_string(),
    }
}

pub fn providers(plugboard: &Plugboard, output: Output) -> Result<String, PlugboardError> {
    let rows: Vec<ProviderRow> = plugboard
        .registry()
        .all()
        .iter()
        .map(|(name, provider)| ProviderRow {
            name: name.clone(),
            integration: provider.is_integration(),
            configurable: provider.as_configurable().is_some(),
            configured: plugboard.is_available(name),
            tools: provider.tools().len(),
        })
        .collect();

    if output.json {
        return to_json(&rows);
    }

    let mut lines = vec![
        String::new(),
        "  plugboard providers".to_string(),
        format!("  {}", "-".repeat(50)),
    ];
    for row in &rows {
        let kind = if row.integration { "integration" } else { "built-in" };
        lines.push(format!(
            "    {} {:<16} {:<12} {} tools",
            mark(row.configured, output),
            row.name,
            kind,
            row.tools
        ));
    }
    lines.push(String::new());
    Ok(lines.join("\n"))
}

pub fn tools(plugboard: &Plugboard, app: &str, output: Output) -> Result<String, PlugboardError> {
    let catalog = require(plugboard, app)?.tools();
    if output.json {
        return to_json(&catalog);
    }
    if catalog.is_empty() {
        return Ok(format!("{app} has no tools"));
    }

    let lines: Vec<String> = catalog
        .iter()
        .map(|(slug, d)| format!("{slug:<32} {:<6} {}", d.access.to_string(), d.description))
        .collect();
    Ok(lines.join("\n"))
}

pub fn schema(plugboard: &Plugboard, app: &str, output: Output) -> Result<String, PlugboardError> {
    let provider = require(plugboard, app)?;
    let integration = provider.as_configurable().ok_or_else(|| {
        PlugboardError::Config(format!("provider `{app}` has no configuration form"))
    })?;

    let fields = integration.config_schema();
    if output.json {
        #[derive(Serialize)]
        struct SchemaView<'a> {
            meta: plugboard_core::IntegrationMeta,
            fields: &'a [ConfigField],
            rules: plugboard_core::ValidationRules,
        }
        return to_json(&SchemaView {
            meta: integration.integration_meta(),
            fields: &fields,
            rules: integration.validation_rules(),
        });
    }

    let meta = integration.integration_meta();
    let mut lines = vec![format!("{} ({})", meta.name, meta.category), meta.description];
    for field in &fields {
        let required = if field.required { " *" } else { "" };
        let mut line = format!(
            "  {:<16} {:<12} {}{required}",
            field.key,
            field.field_type.to_string(),
            field.label
        );
        if let Some(default) = &field.default {
            line.push_str(&format!(" [default: {default}]"));
        }
        lines.push(line);
    }
    Ok(lines.join("\n"))
}

pub fn catalog(
    plugboard: &Plugboard,
    query: Option<&str>,
    output: Output,
) -> Result<String, PlugboardError> {
    let entries = search_catalog(&plugboard.catalog(), query.unwrap_or(""));
    if output.json {
        return to_json(&entries);
    }
    if entries.is_empty() {
        return Ok("no matching apps".to_string());
    }

    let lines: Vec<String> = entries
        .iter()
        .map(|e| {
            format!(
                "{} {:<16} {}",
                mark(e.available, output),
                e.name,
                e.meta.description
            )
        })
        .collect();
    Ok(lines.join("\n"))
}

pub fn prompt(plugboard: &Plugboard) -> String {
    render_prompt_catalog(&plugboard.catalog())
}
