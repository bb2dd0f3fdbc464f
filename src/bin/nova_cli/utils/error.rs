use thiserror::Error;

/// Errors raised by the CLI itself rather than the database
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Usage: {0}")]
    Usage(String),

    #[error("Unknown command: {0} (try .help)")]
    UnknownCommand(String),

    #[error("Unknown output format: {0} (expected text, json or table)")]
    UnknownFormat(String),
}
