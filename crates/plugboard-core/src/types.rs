// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptive data shapes exchanged between providers and the host.
//!
//! Everything here is pure data: providers build these values, the host
//! serializes them for its presentation layer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

/// A credential or configuration value as stored for an integration.
pub type CredentialValue = Value;

/// Tool catalog of a provider, keyed by slug in declaration order.
pub type ToolCatalog = IndexMap<String, ToolDescriptor>;

/// Declarative validation constraints keyed by config field key.
///
/// The rule strings (`"required"`, `"url"`, ...) are interpreted by the
/// host's validation layer; the core never evaluates them.
pub type ValidationRules = IndexMap<String, Vec<String>>;

/// Display metadata for a provider (app group).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMeta {
    /// Short keyword label, e.g. `"moon, sun, planets, sky"`.
    pub label: String,
    pub description: String,
    /// Iconify identifier, e.g. `"ph:moon-stars"`.
    pub icon: String,
    /// Optional brand logo icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// Whether a tool only reads data or can change remote state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ToolAccess {
    Read,
    Write,
}

/// Static description of one tool exposed by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Implementation identifier understood by the provider's `create_tool`.
    pub class: String,
    #[serde(rename = "type")]
    pub access: ToolAccess,
    /// Human-readable name.
    pub name: String,
    pub description: String,
    pub icon: String,
}

impl ToolDescriptor {
    pub fn new(
        class: impl Into<String>,
        access: ToolAccess,
        name: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            class: class.into(),
            access,
            name: name.into(),
            description: description.into(),
            icon: icon.into(),
        }
    }
}

/// Input widget type of a configuration field.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldType {
    Secret,
    Url,
    Text,
    Select,
    StringList,
    OauthConnect,
}

/// Value side of a visibility condition: one value or any of several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VisibleValue {
    One(String),
    Any(Vec<String>),
}

/// Show a field only when another field holds a matching value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibleWhen {
    pub field: String,
    pub value: VisibleValue,
}

impl VisibleWhen {
    /// Returns true if `form[field]` matches the condition.
    ///
    /// Non-string form values are compared by their JSON text, so a select
    /// holding `true` matches the condition value `"true"`.
    pub fn matches(&self, form: &Map<String, Value>) -> bool {
        let actual = match form.get(&self.field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => return false,
            Some(other) => other.to_string(),
        };
        match &self.value {
            VisibleValue::One(expected) => *expected == actual,
            VisibleValue::Any(options) => options.iter().any(|o| *o == actual),
        }
    }
}

/// One entry of an integration's configuration form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigField {
    /// Config storage key (e.g. `api_key`).
    pub key: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    /// Help text shown below the field; may contain inline HTML.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    /// For `select`: value -> label.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub options: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorize_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibleWhen>,
}

impl ConfigField {
    /// Creates a field with only the mandatory attributes set.
    pub fn new(key: impl Into<String>, field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            field_type,
            label: label.into(),
            placeholder: None,
            hint: None,
            required: false,
            default: None,
            options: IndexMap::new(),
            item_icon: None,
            item_placeholder: None,
            authorize_url: None,
            redirect_uri: None,
            visible_when: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn option(mut self, value: impl Into<String>, label: impl Into<String>) -> Self {
        self.options.insert(value.into(), label.into());
        self
    }

    pub fn item_icon(mut self, icon: impl Into<String>) -> Self {
        self.item_icon = Some(icon.into());
        self
    }

    pub fn item_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.item_placeholder = Some(placeholder.into());
        self
    }

    pub fn oauth(
        mut self,
        authorize_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        self.authorize_url = Some(authorize_url.into());
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    pub fn visible_when(mut self, field: impl Into<String>, value: VisibleValue) -> Self {
        self.visible_when = Some(VisibleWhen {
            field: field.into(),
            value,
        });
        self
    }

    /// Whether the field should be shown for the given candidate form values.
    pub fn is_visible(&self, form: &Map<String, Value>) -> bool {
        self.visible_when
            .as_ref()
            .is_none_or(|condition| condition.matches(form))
    }
}

/// UI-facing metadata for a configurable integration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationMeta {
    pub name: String,
    pub description: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs_url: Option<String>,
}

/// Outcome of a connection probe. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTestResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionTestResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Opaque runtime context handed to `create_tool`.
///
/// The core passes it through verbatim. Hosts conventionally set `agent`
/// (caller identity) and `timezone`, but nothing here depends on that.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolContext(Map<String, Value>);

impl ToolContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for ToolContext {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    fn form(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn field_type_uses_snake_case_names() {
        assert_eq!(FieldType::StringList.to_string(), "string_list");
        assert_eq!(FieldType::from_str("oauth_connect").unwrap(), FieldType::OauthConnect);
        assert_eq!(serde_json::to_value(FieldType::Secret).unwrap(), json!("secret"));
        assert!(FieldType::from_str("password").is_err());
    }

    #[test]
    fn tool_descriptor_serializes_access_as_type() {
        let descriptor = ToolDescriptor::new(
            "clock::CurrentTime",
            ToolAccess::Read,
            "Current time",
            "Returns the current time",
            "ph:clock",
        );
        let value = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(value["type"], "read");
        assert_eq!(value["class"], "clock::CurrentTime");
        assert!(value.get("access").is_none());
    }

    #[test]
    fn config_field_omits_unset_optionals() {
        let field = ConfigField::new("api_key", FieldType::Secret, "API Key").required();
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({"key": "api_key", "type": "secret", "label": "API Key", "required": true})
        );
    }

    #[test]
    fn oauth_field_carries_both_urls() {
        let field = ConfigField::new("account", FieldType::OauthConnect, "Account").oauth(
            "https://auth.example.com/authorize",
            "https://app.example.com/callback",
        );
        assert_eq!(
            field.authorize_url.as_deref(),
            Some("https://auth.example.com/authorize")
        );
        assert_eq!(
            field.redirect_uri.as_deref(),
            Some("https://app.example.com/callback")
        );

        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "oauth_connect");
        assert_eq!(value["authorize_url"], "https://auth.example.com/authorize");
        assert_eq!(value["redirect_uri"], "https://app.example.com/callback");
        assert_eq!(value["required"], false);
    }

    #[test]
    fn select_options_keep_declaration_order() {
        let field = ConfigField::new("period", FieldType::Select, "Period")
            .option("day", "Today")
            .option("30d", "Last 30 days")
            .option("12mo", "Last 12 months");
        let keys: Vec<&str> = field.options.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["day", "30d", "12mo"]);
    }

    #[test]
    fn field_without_condition_is_always_visible() {
        let field = ConfigField::new("url", FieldType::Url, "URL");
        assert!(field.is_visible(&Map::new()));
    }

    #[test]
    fn visible_when_single_value() {
        let field = ConfigField::new("token", FieldType::Secret, "Token")
            .visible_when("auth", VisibleValue::One("token".into()));
        assert!(field.is_visible(&form(json!({"auth": "token"}))));
        assert!(!field.is_visible(&form(json!({"auth": "oauth"}))));
        assert!(!field.is_visible(&Map::new()));
    }

    #[test]
    fn visible_when_any_of_several_values() {
        let field = ConfigField::new("region", FieldType::Text, "Region").visible_when(
            "plan",
            VisibleValue::Any(vec!["business".into(), "enterprise".into()]),
        );
        assert!(field.is_visible(&form(json!({"plan": "enterprise"}))));
        assert!(!field.is_visible(&form(json!({"plan": "starter"}))));
    }

    #[test]
    fn visible_when_compares_non_string_values_as_text() {
        let field = ConfigField::new("proxy", FieldType::Url, "Proxy")
            .visible_when("use_proxy", VisibleValue::One("true".into()));
        assert!(field.is_visible(&form(json!({"use_proxy": true}))));
        assert!(!field.is_visible(&form(json!({"use_proxy": null}))));
    }

    #[test]
    fn visible_value_deserializes_string_or_list() {
        let one: VisibleWhen = serde_json::from_value(json!({"field": "a", "value": "x"})).unwrap();
        assert_eq!(one.value, VisibleValue::One("x".into()));
        let any: VisibleWhen =
            serde_json::from_value(json!({"field": "a", "value": ["x", "y"]})).unwrap();
        assert_eq!(any.value, VisibleValue::Any(vec!["x".into(), "y".into()]));
    }

    #[test]
    fn connection_result_constructors() {
        let ok = ConnectionTestResult::ok("connected");
        assert!(ok.success);
        assert_eq!(ok.message.as_deref(), Some("connected"));
        assert!(ok.error.is_none());

        let failed = ConnectionTestResult::failed("bad key");
        assert!(!failed.success);
        assert_eq!(failed.error.as_deref(), Some("bad key"));
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "error": "bad key"})
        );
    }

    #[test]
    fn tool_context_passes_values_through() {
        let ctx = ToolContext::new()
            .with("timezone", "Europe/Berlin")
            .with("agent", json!({"id": 7}));
        assert_eq!(ctx.get_str("timezone"), Some("Europe/Berlin"));
        assert_eq!(ctx.get("agent").unwrap()["id"], 7);
        assert!(ctx.get_str("agent").is_none());
        assert_eq!(serde_json::to_value(&ctx).unwrap()["timezone"], "Europe/Berlin");
    }
}
