use anyhow::Result;
use serde::Serialize;
use serde_json::json;
use novadb::{Entry, Value};

use crate::formatters::Formatter;

/// JSON output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        JsonFormatter { pretty: true }
    }

    pub fn without_pretty() -> Self {
        JsonFormatter { pretty: false }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }

    fn message(&self, kind: &str, text: &str) -> String {
        self.render(&json!({ kind: text }))
            .unwrap_or_else(|_| format!("{{\"{}\":\"{}\"}}", kind, text))
    }
}

impl Formatter for JsonFormatter {
    fn format_value(&self, value: &Value) -> Result<String> {
        self.render(value)
    }

    fn format_entries(&self, entries: &[Entry]) -> Result<String> {
        self.render(entries)
    }

    fn format_error(&self, error: &str) -> String {
        self.message("error", error)
    }

    fn format_info(&self, info: &str) -> String {
        self.message("info", info)
    }

    fn format_success(&self, success: &str) -> String {
        self.message("success", success)
    }
}
