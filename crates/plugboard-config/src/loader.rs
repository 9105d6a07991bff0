// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plugboard.toml` > `~/.config/plugboard/plugboard.toml`
//! > `/etc/plugboard/plugboard.toml` with environment variable overrides via
//! the `PLUGBOARD_` prefix.
//!
//! Fixed sections take typed env values (`PLUGBOARD_CORE__LOG_LEVEL`).
//! `PLUGBOARD_INTEGRATIONS__<NAME>__<KEY>` values are credentials and are
//! always kept as the literal string, so `0012345` keeps its leading zeros.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment, Metadata, Profile, Provider,
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Map, Value},
};
use tracing::warn;

use crate::model::PlugboardConfig;

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "PLUGBOARD_";

/// Separator between path segments in environment variable names.
pub const ENV_SEPARATOR: &str = "__";

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plugboard/plugboard.toml` (system-wide)
/// 3. `~/.config/plugboard/plugboard.toml` (user XDG config)
/// 4. `./plugboard.toml` (local directory)
/// 5. `PLUGBOARD_*` environment variables
pub fn load_config() -> Result<PlugboardConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PlugboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugboardConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlugboardConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlugboardConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .merge(IntegrationEnv)
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlugboardConfig::default()))
        .merge(Toml::file("/etc/plugboard/plugboard.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("plugboard/plugboard.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("plugboard.toml"))
        .merge(env_provider())
        .merge(IntegrationEnv)
}

/// Environment provider for the fixed sections, splitting on a double
/// underscore. The `integrations` namespace is left to [`IntegrationEnv`].
fn env_provider() -> Env {
    Env::prefixed(ENV_PREFIX)
        .split(ENV_SEPARATOR)
        .filter(|key| !key.as_str().to_ascii_lowercase().starts_with("integrations."))
}

/// `PLUGBOARD_INTEGRATIONS__<NAME>__<KEY>` variables as unparsed strings.
///
/// Names and keys contain single underscores, so the double underscore is the
/// only separator: `PLUGBOARD_INTEGRATIONS__PLAUSIBLE__API_KEY` maps to
/// `integrations.plausible.api_key`.
struct IntegrationEnv;

impl Provider for IntegrationEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named("PLUGBOARD_INTEGRATIONS__* environment variable(s)")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        let mut integrations = Dict::new();
        let vars = std::env::vars_os()
            .filter_map(|(name, value)| Some((name.into_string().ok()?, value.into_string().ok()?)));

        for (name, value) in vars {
            let Some((integration, key)) = split_integration_var(&name) else {
                continue;
            };
            let table = integrations
                .entry(integration)
                .or_insert_with(|| Value::from(Dict::new()));
            if let Value::Dict(_, table) = table {
                table.insert(key, Value::from(value));
            }
        }

        let mut root = Dict::new();
        if !integrations.is_empty() {
            root.insert("integrations".to_string(), Value::from(integrations));
        }
        Ok(Profile::Default.collect(root))
    }
}

/// Splits an integration override name into lowercased `(integration, key)`.
///
/// `None` for unrelated variables; malformed integration overrides are
/// logged and skipped.
fn split_integration_var(name: &str) -> Option<(String, String)> {
    let prefix = format!("{ENV_PREFIX}INTEGRATIONS{ENV_SEPARATOR}");
    if !name
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(&prefix))
    {
        return None;
    }

    let rest = &name[prefix.len()..];
    match rest.split_once(ENV_SEPARATOR) {
        Some((integration, key))
            if !integration.is_empty() && !key.is_empty() && !key.contains(ENV_SEPARATOR) =>
        {
            Some((integration.to_ascii_lowercase(), key.to_ascii_lowercase()))
        }
        _ => {
            warn!(
                var = name,
                "ignoring integration override; expected PLUGBOARD_INTEGRATIONS__<NAME>__<KEY>"
            );
            None
        }
    }
}

/// Name of the environment variable overriding `integrations.<integration>.<key>`.
pub fn integration_env_var(integration: &str, key: &str) -> String {
    format!(
        "{ENV_PREFIX}INTEGRATIONS{ENV_SEPARATOR}{}{ENV_SEPARATOR}{}",
        integration.to_uppercase(),
        key.to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_env_var_uses_double_underscore() {
        assert_eq!(
            integration_env_var("plausible", "api_key"),
            "PLUGBOARD_INTEGRATIONS__PLAUSIBLE__API_KEY"
        );
    }

    #[test]
    fn split_integration_var_lowercases_segments() {
        assert_eq!(
            split_integration_var("PLUGBOARD_INTEGRATIONS__PLAUSIBLE__API_KEY"),
            Some(("plausible".to_string(), "api_key".to_string()))
        );
        assert_eq!(
            split_integration_var(&integration_env_var("my-app", "default_site")),
            Some(("my-app".to_string(), "default_site".to_string()))
        );
    }

    #[test]
    fn split_integration_var_skips_other_and_malformed_names() {
        assert_eq!(split_integration_var("PLUGBOARD_CORE__LOG_LEVEL"), None);
        assert_eq!(split_integration_var("HOME"), None);
        assert_eq!(split_integration_var("PLUGBOARD_INTEGRATIONS__ALPHA"), None);
        assert_eq!(split_integration_var("PLUGBOARD_INTEGRATIONS____KEY"), None);
        assert_eq!(split_integration_var("PLUGBOARD_INTEGRATIONS__ALPHA__A__B"), None);
    }
}
