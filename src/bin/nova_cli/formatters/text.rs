use anyhow::Result;
use colored::*;
use novadb::{Entry, Value};

use crate::formatters::Formatter;

/// Human readable output
pub struct TextFormatter {
    colored: bool,
}

impl TextFormatter {
    pub fn new() -> Self {
        TextFormatter { colored: true }
    }

    pub fn without_colors() -> Self {
        TextFormatter { colored: false }
    }
}

impl Formatter for TextFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        match value {
            Value::Array(_) | Value::Object(_) => Ok(serde_json::to_string_pretty(value)?),
            scalar => Ok(scalar.to_string()),
        }
    }

    fn format_entries(&self, entries: &[Entry]) -> Result<String> {
        let lines = entries
            .iter()
            .map(|entry| {
                let key = if self.colored {
                    entry.key.cyan().bold().to_string()
                } else {
                    entry.key.clone()
                };
                format!("{}: {}", key, entry.value)
            })
            .collect::<Vec<_>>();

        Ok(lines.join("\n"))
    }

    fn format_error(&self, error: &str) -> String {
        if self.colored {
            format!("{}", error.red().bold())
        } else {
            format!("Error: {}", error)
        }
    }

    fn format_info(&self, info: &str) -> String {
        if self.colored {
            format!("{}", info.blue())
        } else {
            format!("Info: {}", info)
        }
    }

    fn format_success(&self, success: &str) -> String {
        if self.colored {
            format!("{}", success.green().bold())
        } else {
            format!("Success: {}", success)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_output() {
        let f = TextFormatter::without_colors();
        assert_eq!(f.format_value(&json!("x")).unwrap(), "\"x\"");
        assert_eq!(f.format_value(&json!(3)).unwrap(), "3");

        let entries = vec![Entry { key: "a".into(), value: json!({"b": 1}) }];
        assert_eq!(f.format_entries(&entries).unwrap(), "a: {\"b\":1}");
        assert_eq!(f.format_error("boom"), "Error: boom");
    }
}
