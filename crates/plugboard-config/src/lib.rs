// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration store for Plugboard integrations.
//!
//! Provides TOML configuration parsing with strict validation of fixed
//! sections, XDG file hierarchy lookup, `PLUGBOARD_*` environment overrides,
//! and miette diagnostics with typo suggestions. Integration credentials live
//! in the open `[integrations.<name>]` tables.
//!
//! # Usage
//!
//! ```no_run
//! use plugboard_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("log level: {}", config.core.log_level);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

use std::path::Path;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{integration_env_var, load_config, load_config_from_path, load_config_from_str};
pub use model::{CoreConfig, IntegrationSettings, IntegrationsConfig, PlugboardConfig};

/// Load configuration from the XDG hierarchy and validate it.
pub fn load_and_validate() -> Result<PlugboardConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(
            err,
            &collect_toml_sources(),
        )),
    }
}

/// Load configuration from an explicit file (plus env overrides) and validate it.
pub fn load_and_validate_path(path: &Path) -> Result<PlugboardConfig, Vec<ConfigError>> {
    match loader::load_config_from_path(path) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = std::fs::read_to_string(path)
                .map(|content| vec![(path.display().to_string(), content)])
                .unwrap_or_default();
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Load configuration from a TOML string and validate it.
pub fn load_and_validate_str(toml_content: &str) -> Result<PlugboardConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => {
            let sources = vec![("<inline>".to_string(), toml_content.to_string())];
            Err(diagnostic::figment_to_config_errors(err, &sources))
        }
    }
}

/// Collect TOML source file contents for error span resolution.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut sources = Vec::new();

    if let Ok(content) = std::fs::read_to_string("plugboard.toml") {
        let path = std::env::current_dir()
            .map(|d| d.join("plugboard.toml").display().to_string())
            .unwrap_or_else(|_| "plugboard.toml".to_string());
        sources.push((path, content));
    }

    if let Some(config_dir) = dirs::config_dir() {
        let path = config_dir.join("plugboard/plugboard.toml");
        if let Ok(content) = std::fs::read_to_string(&path) {
            sources.push((path.display().to_string(), content));
        }
    }

    let system_path = Path::new("/etc/plugboard/plugboard.toml");
    if let Ok(content) = std::fs::read_to_string(system_path) {
        sources.push((system_path.display().to_string(), content));
    }

    tracing::debug!(count = sources.len(), "collected config sources for diagnostics");
    sources
}
