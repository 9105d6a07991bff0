// SPDX-FileCopyrightText: 2026 Plugboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in `clock` provider: current time and day counting.
//!
//! `current_time` honours the `timezone` context key when it holds `UTC` or
//! a fixed offset such as `+05:30`. Named zones are not resolved; they fall
//! back to UTC with a warning.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use plugboard_core::{
    AppMeta, PlugboardError, Tool, ToolAccess, ToolCatalog, ToolContext, ToolDescriptor,
    ToolOutput, ToolProvider,
};
use tracing::warn;

const CURRENT_TIME: &str = "clock::CurrentTime";
const DAYS_BETWEEN: &str = "clock::DaysBetween";

/// Time source, swappable for deterministic tests.
pub type Now = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Always-on provider for time-related tools.
pub struct ClockProvider {
    now: Now,
}

impl ClockProvider {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(now: Now) -> Self {
        Self { now }
    }
}

impl Default for ClockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolProvider for ClockProvider {
    fn app_name(&self) -> &str {
        "clock"
    }

    fn app_meta(&self) -> AppMeta {
        AppMeta {
            label: "time, date, calendar".to_string(),
            description: "Current time and date arithmetic".to_string(),
            icon: "ph:clock".to_string(),
            logo: None,
        }
    }

    fn tools(&self) -> ToolCatalog {
        let mut tools = ToolCatalog::new();
        tools.insert(
            "current_time".to_string(),
            ToolDescriptor::new(
                CURRENT_TIME,
                ToolAccess::Read,
                "Current Time",
                "Get the current date and time in the caller's timezone",
                "ph:clock",
            ),
        );
        tools.insert(
            "days_between".to_string(),
            ToolDescriptor::new(
                DAYS_BETWEEN,
                ToolAccess::Read,
                "Days Between",
                "Count the days between two dates",
                "ph:calendar",
            ),
        );
        tools
    }

    fn is_integration(&self) -> bool {
        false
    }

    fn create_tool(
        &self,
        class: &str,
        context: &ToolContext,
    ) -> Result<Arc<dyn Tool>, PlugboardError> {
        match class {
            CURRENT_TIME => {
                let offset = context
                    .get_str("timezone")
                    .map(resolve_offset)
                    .unwrap_or_else(utc);
                Ok(Arc::new(CurrentTimeTool {
                    now: Arc::clone(&self.now),
                    offset,
                }))
            }
            DAYS_BETWEEN => Ok(Arc::new(DaysBetweenTool)),
            _ => Err(PlugboardError::UnknownToolImplementation {
                provider: self.app_name().to_string(),
                class: class.to_string(),
            }),
        }
    }
}

fn utc() -> FixedOffset {
    Utc.fix()
}

/// Resolves `UTC`, `Z`, `+HH:MM`, `-HH:MM`, or `+HHMM`; anything else is UTC.
fn resolve_offset(timezone: &str) -> FixedOffset {
    match parse_offset(timezone) {
        Some(offset) => offset,
        None => {
            warn!(timezone, "unsupported timezone, falling back to UTC");
            utc()
        }
    }
}

fn parse_offset(timezone: &str) -> Option<FixedOffset> {
    let tz = timezone.trim();
    if tz.eq_ignore_ascii_case("utc") || tz.eq_ignore_ascii_case("z") {
        return Some(utc());
    }

    let (sign, rest) = match tz.as_bytes().first()? {
        b'+' => (1, &tz[1..]),
        b'-' => (-1, &tz[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

/// Reports the current time at the caller's offset.
struct CurrentTimeTool {
    now: Now,
    offset: FixedOffset,
}

#[async_trait]
impl Tool for CurrentTimeTool {
    fn name(&self) -> &str {
        "current_time"
    }

    fn description(&self) -> &str {
        "Get the current date and time in the caller's timezone"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "format": {
                    "type": "string",
                    "description": "strftime format string; RFC 3339 when omitted"
                }
            }
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, PlugboardError> {
        let local = (self.now)().with_timezone(&self.offset);
        let rendered = match input["format"].as_str() {
            Some(format) => {
                use std::fmt::Write;
                let mut out = String::new();
                if write!(out, "{}", local.format(format)).is_err() {
                    return Ok(ToolOutput::error(format!("invalid format string '{format}'")));
                }
                out
            }
            None => local.to_rfc3339(),
        };
        Ok(ToolOutput::text(rendered))
    }
}

/// Signed day count between two ISO dates.
struct DaysBetweenTool;

/// Outer error: parameter missing. Inner error: unparseable date, reported
/// back to the model as tool output.
fn parse_date(
    input: &serde_json::Value,
    field: &str,
) -> Result<Result<NaiveDate, String>, PlugboardError> {
    let raw = input[field]
        .as_str()
        .ok_or_else(|| PlugboardError::tool(format!("missing required '{field}' parameter")))?;
    Ok(NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("'{field}' must be a YYYY-MM-DD date, got '{raw}': {e}")))
}

#[async_trait]
impl Tool for DaysBetweenTool {
    fn name(&self) -> &str {
        "days_between"
    }

    fn description(&self) -> &str {
        "Count the days between two dates"
    }

    fn parameters_schema(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "from": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
                "to": { "type": "string", "description": "End date (YYYY-MM-DD)" }
            },
            "required": ["from", "to"]
        })
    }

    async fn invoke(&self, input: serde_json::Value) -> Result<ToolOutput, PlugboardError> {
        let from = match parse_date(&input, "from")? {
            Ok(date) => date,
            Err(message) => return Ok(ToolOutput::error(message)),
        };
        let to = match parse_date(&input, "to")? {
            Ok(date) => date,
            Err(message) => return Ok(ToolOutput::error(message)),
        };
        let days = to.signed_duration_since(from).num_days();
        Ok(ToolOutput::text(days.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_clock() -> ClockProvider {
        ClockProvider::with_clock(Arc::new(|| {
            Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
        }))
    }

    #[test]
    fn catalog_lists_two_read_tools() {
        let tools = ClockProvider::new().tools();
        let slugs: Vec<&str> = tools.keys().map(String::as_str).collect();
        assert_eq!(slugs, vec!["current_time", "days_between"]);
        assert!(tools.values().all(|d| d.access == ToolAccess::Read));
    }

    #[test]
    fn unknown_class_is_rejected() {
        let result = ClockProvider::new().create_tool("clock::Sundial", &ToolContext::new());
        assert!(matches!(
            result,
            Err(PlugboardError::UnknownToolImplementation { ref class, .. }) if class == "clock::Sundial"
        ));
    }

    #[test]
    fn parses_supported_offsets() {
        assert_eq!(parse_offset("UTC"), Some(utc()));
        assert_eq!(parse_offset("z"), Some(utc()));
        assert_eq!(parse_offset("+05:30").unwrap().local_minus_utc(), 19_800);
        assert_eq!(parse_offset("-0800").unwrap().local_minus_utc(), -28_800);
        assert!(parse_offset("Europe/Berlin").is_none());
        assert!(parse_offset("+5").is_none());
        assert!(parse_offset("+05:75").is_none());
        assert!(parse_offset("").is_none());
    }

    #[tokio::test]
    async fn current_time_uses_context_timezone() {
        let provider = fixed_clock();
        let ctx = ToolContext::new().with("timezone", "+02:00");
        let tool = provider.create_tool(CURRENT_TIME, &ctx).unwrap();

        let output = tool.invoke(json!({})).await.unwrap();
        assert_eq!(output.content, "2026-03-14T14:00:00+02:00");
    }

    #[tokio::test]
    async fn current_time_falls_back_to_utc() {
        let provider = fixed_clock();
        let ctx = ToolContext::new().with("timezone", "Mars/Olympus");
        let tool = provider.create_tool(CURRENT_TIME, &ctx).unwrap();

        let output = tool.invoke(json!({"format": "%Y-%m-%d %H:%M"})).await.unwrap();
        assert_eq!(output.content, "2026-03-14 12:00");
    }

    #[tokio::test]
    async fn days_between_counts_signed_days() {
        let tool = ClockProvider::new()
            .create_tool(DAYS_BETWEEN, &ToolContext::new())
            .unwrap();

        let forward = tool
            .invoke(json!({"from": "2026-01-01", "to": "2026-03-01"}))
            .await
            .unwrap();
        assert_eq!(forward.content, "59");

        let backward = tool
            .invoke(json!({"from": "2026-03-01", "to": "2026-01-01"}))
            .await
            .unwrap();
        assert_eq!(backward.content, "-59");
    }

    #[tokio::test]
    async fn days_between_reports_bad_input() {
        let tool = ClockProvider::new()
            .create_tool(DAYS_BETWEEN, &ToolContext::new())
            .unwrap();

        let output = tool
            .invoke(json!({"from": "yesterday", "to": "2026-01-01"}))
            .await
            .unwrap();
        assert!(output.is_error);
        assert!(output.content.contains("YYYY-MM-DD"));

        assert!(tool.invoke(json!({"from": "2026-01-01"})).await.is_err());
    }
}
