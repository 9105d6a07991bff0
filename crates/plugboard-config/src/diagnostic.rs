// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment load failures into miette diagnostics that point at the
//! offending line of `plugboard.toml`.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity for a key suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration error with diagnostic context for miette rendering.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key outside the known set in `[core]` or at the top level.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(plugboard::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a Plugboard setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: {detail}")]
    #[diagnostic(code(plugboard::config::invalid_type), help("use a {expected} here"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
        #[label("wrong type")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A file or environment variable that could not be read or parsed.
    #[error("cannot load configuration from {origin}: {message}")]
    #[diagnostic(code(plugboard::config::source))]
    Source { origin: String, message: String },

    /// A value rejected by [`crate::validation::validate_config`].
    #[error("validation error: {message}")]
    #[diagnostic(code(plugboard::config::validation))]
    Validation { message: String },
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Known keys here: {valid_keys}"),
        None => format!("known keys here: {valid_keys}"),
    }
}

/// Converts a `figment::Error`, which may chain several failures, into one
/// diagnostic per failure.
///
/// `toml_sources` holds `(path, content)` pairs used to attach source spans.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    use figment::error::Kind;

    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let suggestion = suggest_key(field, expected);
                let (span, src) = locate(&error, &error.path, field, toml_sources);
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion,
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::InvalidType(actual, expected) => {
                let (table, field) = match error.path.split_last() {
                    Some((field, table)) => (table, field.as_str()),
                    None => (&error.path[..], ""),
                };
                let (span, src) = locate(&error, table, field, toml_sources);
                ConfigError::InvalidType {
                    key: error.path.join("."),
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                    span,
                    src,
                }
            }
            kind => ConfigError::Source {
                origin: origin_of(&error),
                message: if error.path.is_empty() {
                    kind.to_string()
                } else {
                    format!("{kind} (at `{}`)", error.path.join("."))
                },
            },
        })
        .collect()
}

/// Human name of the provider that produced `error`: a file path or the
/// environment.
fn origin_of(error: &figment::Error) -> String {
    error
        .metadata
        .as_ref()
        .map(|meta| match &meta.source {
            Some(source) => source.to_string(),
            None => meta.name.to_string(),
        })
        .unwrap_or_else(|| "configuration".to_string())
}

/// Finds `field` in the TOML file the error came from.
fn locate(
    error: &figment::Error,
    table: &[String],
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    if field.is_empty() {
        return (None, None);
    }

    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // Inline strings carry no path.
    let source = match file {
        Some(path) => toml_sources.iter().find(|(p, _)| *p == path),
        None if toml_sources.len() == 1 => toml_sources.first(),
        None => None,
    };

    source
        .and_then(|(path, content)| {
            let offset = find_key_offset(content, table, field)?;
            Some((
                Some(SourceSpan::new(offset.into(), field.len())),
                Some(NamedSource::new(path, content.clone())),
            ))
        })
        .unwrap_or((None, None))
}

/// Byte offset of `key = ...` inside the table named by `table`
/// (`["integrations", "plausible"]` is `[integrations.plausible]`). An empty
/// `table` means the keys before the first header.
pub fn find_key_offset(content: &str, table: &[String], key: &str) -> Option<usize> {
    let wanted = table.join(".");
    let mut current = String::new();
    let mut offset = 0;

    for line in content.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if let Some(header) = trimmed.strip_prefix('[') {
            current = header.split(']').next().unwrap_or_default().trim().to_string();
        } else if current == wanted
            && trimmed
                .strip_prefix(key)
                .is_some_and(|rest| rest.trim_start().starts_with('='))
        {
            return Some(offset + line.len() - trimmed.len());
        }
        offset += line.len();
    }

    None
}

/// Closest known key by Jaro-Winkler similarity, if any is close enough.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|&key| (strsim::jaro_winkler(unknown, key), key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Prints each diagnostic to stderr through miette's report hook.
pub fn render_errors(errors: Vec<ConfigError>) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error));
    }
}
