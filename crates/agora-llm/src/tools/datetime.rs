//! DateTime tool for getting current date and time
//!
//! Uses the `chrono` crate for time operations. Only reads the system clock.

use async_trait::async_trait;
use chrono::{Local, Utc};
use serde_json::Value;

use crate::tool::{Tool, ToolDefinition, ToolInput};
use crate::tool_error::ToolError;

const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// DateTime tool for retrieving current date and time.
///
/// Accepts either named `timezone`/`format` arguments or a bare timezone
/// string (`"utc"` or `"local"`).
pub struct DateTimeTool {
    definition: ToolDefinition,
}

impl DateTimeTool {
    /// Create a new datetime tool
    pub fn new() -> Self {
        Self {
            definition: ToolDefinition::new(
                "datetime",
                "Get the current date and time. Useful for grounding claims about recent events.",
                r#"{
                    "type": "object",
                    "properties": {
                        "timezone": {
                            "type": "string",
                            "enum": ["utc", "local"],
                            "default": "utc",
                            "description": "Timezone: 'utc' for UTC or 'local' for system local time"
                        },
                        "format": {
                            "type": "string",
                            "description": "strftime format string. Default: '%Y-%m-%d %H:%M:%S'"
                        }
                    }
                }"#,
            ),
        }
    }

    fn timezone<'a>(input: &'a ToolInput) -> Option<&'a str> {
        match input {
            ToolInput::Bare(value) => value.as_str(),
            ToolInput::Named(_) => input.get_str("timezone"),
        }
    }
}

impl Default for DateTimeTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for DateTimeTool {
    fn definition(&self) -> &ToolDefinition {
        &self.definition
    }

    fn validate(&self, input: &ToolInput) -> Result<(), ToolError> {
        if let ToolInput::Bare(value) = input {
            if !value.is_string() {
                return Err(ToolError::positional_not_supported("datetime"));
            }
        }
        input.ensure_only("datetime", &["timezone", "format"])?;

        if let Some(tz) = Self::timezone(input) {
            if tz != "utc" && tz != "local" {
                return Err(ToolError::invalid_args(
                    "datetime",
                    format!("Invalid timezone '{}'. Must be 'utc' or 'local'", tz),
                ));
            }
        }

        if let Some(fmt) = input.get_str("format") {
            if fmt.len() > 100 {
                return Err(ToolError::invalid_args(
                    "datetime",
                    "Format string too long (max 100 characters)",
                ));
            }
        }

        Ok(())
    }

    async fn execute(&self, input: ToolInput) -> Result<Value, ToolError> {
        let tz = Self::timezone(&input).unwrap_or("utc");
        let fmt = input.get_str("format").unwrap_or(DEFAULT_FORMAT);

        let (formatted, timezone, unix_timestamp) = match tz {
            "local" => {
                let now = Local::now();
                (now.format(fmt).to_string(), "local", now.timestamp())
            }
            _ => {
                let now = Utc::now();
                (now.format(fmt).to_string(), "utc", now.timestamp())
            }
        };

        Ok(serde_json::json!({
            "datetime": formatted,
            "timezone": timezone,
            "format": fmt,
            "unix_timestamp": unix_timestamp
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn named(value: Value) -> ToolInput {
        match value {
            Value::Object(map) => ToolInput::Named(map),
            other => ToolInput::Bare(other),
        }
    }

    #[tokio::test]
    async fn test_utc_datetime() {
        let dt = DateTimeTool::new();
        let result = dt.execute(named(json!({"timezone": "utc"}))).await.unwrap();

        assert_eq!(result["timezone"], "utc");
        assert!(result["datetime"].is_string());
        assert!(result["unix_timestamp"].is_i64());
    }

    #[tokio::test]
    async fn test_bare_timezone() {
        let dt = DateTimeTool::new();
        let input = ToolInput::Bare(json!("local"));
        assert!(dt.validate(&input).is_ok());
        let result = dt.execute(input).await.unwrap();
        assert_eq!(result["timezone"], "local");
    }

    #[tokio::test]
    async fn test_custom_format() {
        let dt = DateTimeTool::new();
        let result = dt.execute(named(json!({"format": "%Y-%m-%d"}))).await.unwrap();

        let datetime = result["datetime"].as_str().unwrap();
        assert_eq!(datetime.len(), 10);
    }

    #[tokio::test]
    async fn test_default_values() {
        let dt = DateTimeTool::new();
        let result = dt.execute(named(json!({}))).await.unwrap();

        assert_eq!(result["timezone"], "utc");
        assert_eq!(result["format"], DEFAULT_FORMAT);
    }

    #[test]
    fn test_rejections() {
        let dt = DateTimeTool::new();
        assert!(matches!(
            dt.validate(&named(json!({"timezone": "mars"}))),
            Err(ToolError::InvalidArguments { .. })
        ));
        assert!(matches!(
            dt.validate(&named(json!({"format": "a".repeat(150)}))),
            Err(ToolError::InvalidArguments { .. })
        ));
        assert!(dt
            .validate(&named(json!({"query": "today"})))
            .unwrap_err()
            .is_parameter_mismatch());
        assert!(dt
            .validate(&ToolInput::Bare(json!(3)))
            .unwrap_err()
            .is_parameter_mismatch());
    }
}
