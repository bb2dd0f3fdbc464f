use anyhow::Result;
use novadb::{Entry, Value};

/// Output formatter trait
pub trait Formatter {
    /// Format a single value
    fn format_value(&self, value: &Value) -> Result<String>;

    /// Format top-level pairs
    fn format_entries(&self, entries: &[Entry]) -> Result<String>;

    fn format_error(&self, error: &str) -> String;

    fn format_info(&self, info: &str) -> String;

    fn format_success(&self, success: &str) -> String;
}
