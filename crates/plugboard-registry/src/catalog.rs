// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider catalog for UIs and system prompts.
//!
//! Combines each provider's metadata and tools with its credential status.
//! No network calls are made.

use plugboard_core::{AppMeta, CredentialResolver, ToolCatalog};
use serde::Serialize;

use crate::registry::ToolProviderRegistry;

/// One provider as shown in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogEntry {
    pub name: String,
    pub meta: AppMeta,
    pub integration: bool,
    /// Built-ins are always available; integrations once configured.
    pub available: bool,
    pub tools: ToolCatalog,
}

/// Builds catalog entries for every registered provider, in registry order.
pub fn build_catalog(
    registry: &ToolProviderRegistry,
    credentials: &dyn CredentialResolver,
) -> Vec<CatalogEntry> {
    registry
        .all()
        .iter()
        .map(|(name, provider)| {
            let integration = provider.is_integration();
            CatalogEntry {
                name: name.clone(),
                meta: provider.app_meta(),
                integration,
                available: !integration || credentials.is_configured(name),
                tools: provider.tools(),
            }
        })
        .collect()
}

/// Filters entries whose name, label, or description contains `query`
/// (case-insensitive). An empty query returns every entry.
pub fn search_catalog(entries: &[CatalogEntry], query: &str) -> Vec<CatalogEntry> {
    let query = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| {
            query.is_empty()
                || e.name.to_lowercase().contains(&query)
                || e.meta.label.to_lowercase().contains(&query)
                || e.meta.description.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Renders available providers as a system-prompt block.
///
/// Unavailable integrations are left out. Returns an empty string when
/// nothing is available.
pub fn render_prompt_catalog(entries: &[CatalogEntry]) -> String {
    let available: Vec<&CatalogEntry> = entries.iter().filter(|e| e.available).collect();
    if available.is_empty() {
        return String::new();
    }

    let mut lines = Vec::with_capacity(available.len() + 1);
    lines.push("## Available Apps".to_string());
    for entry in available {
        let slugs: Vec<&str> = entry.tools.keys().map(String::as_str).collect();
        lines.push(format!(
            "- {} ({}): {} [tools: {}]",
            entry.name,
            entry.meta.label,
            entry.meta.description,
            slugs.join(", ")
        ));
    }
    lines.join("\n")
}
