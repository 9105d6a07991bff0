// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::PlugboardConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &PlugboardConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let level = config.core.log_level.trim().to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "core.log_level `{}` must be one of: {}",
                config.core.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }

    for (integration, settings) in config.integrations.iter() {
        if !is_identifier(integration) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "integration name `{integration}` must be non-empty and use only [a-z0-9_-]"
                ),
            });
        }

        for key in settings.keys() {
            if !is_identifier(key) {
                errors.push(ConfigError::Validation {
                    message: format!(
                        "integrations.{integration} key `{key}` must be non-empty and use only [a-z0-9_-]"
                    ),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
