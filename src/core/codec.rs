//! Codec contract
//!
//! A codec turns a whole document into the bytes of one file and back.
//! Each supported file format provides one implementation under
//! `crate::codecs`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

/// Trait implemented by every file format
pub trait Codec: Send + Sync {
    /// Which format this codec speaks
    fn format(&self) -> CodecKind;

    /// Canonical file extension, without the leading dot
    fn extension(&self) -> &'static str {
        self.format().extension()
    }

    /// Binary formats are read and written as raw bytes, text formats as UTF-8
    fn is_binary(&self) -> bool {
        false
    }

    /// Serialize a full document
    fn encode(&self, doc: &Document) -> Result<Vec<u8>>;

    /// Deserialize a full document
    fn decode(&self, bytes: &[u8]) -> Result<Document>;
}

/// The file formats novadb knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodecKind {
    Json,
    Yaml,
    Toml,
    Bson,
    Json5,
    Hjson,
    Ini,
    Csv,
}

impl CodecKind {
    pub const ALL: [CodecKind; 8] = [
        CodecKind::Json,
        CodecKind::Yaml,
        CodecKind::Toml,
        CodecKind::Bson,
        CodecKind::Json5,
        CodecKind::Hjson,
        CodecKind::Ini,
        CodecKind::Csv,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CodecKind::Json => "json",
            CodecKind::Yaml => "yaml",
            CodecKind::Toml => "toml",
            CodecKind::Bson => "bson",
            CodecKind::Json5 => "json5",
            CodecKind::Hjson => "hjson",
            CodecKind::Ini => "ini",
            CodecKind::Csv => "csv",
        }
    }

    pub fn extension(self) -> &'static str {
        self.name()
    }

    /// Registry crate providing the format, and the cargo feature gating it
    pub fn package(self) -> (&'static str, &'static str) {
        match self {
            CodecKind::Json => ("serde_json", "json"),
            CodecKind::Yaml => ("serde_yaml", "yaml"),
            CodecKind::Toml => ("toml", "toml"),
            CodecKind::Bson => ("bson", "bson"),
            CodecKind::Json5 => ("json5", "json5"),
            CodecKind::Hjson => ("deser-hjson", "hjson"),
            CodecKind::Ini => ("rust-ini", "ini"),
            CodecKind::Csv => ("csv", "csv"),
        }
    }

    pub(crate) fn missing(self) -> StoreError {
        let (package, feature) = self.package();
        StoreError::MissingDependency { format: self, package, feature }
    }

    /// Guess the format from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "yml" => Some(CodecKind::Yaml),
            other => CodecKind::ALL.into_iter().find(|k| k.extension() == other),
        }
    }
}

impl FromStr for CodecKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        CodecKind::from_extension(s.trim_start_matches('.')).ok_or_else(|| {
            StoreError::InvalidArgument(format!("'{}' is not a supported format", s))
        })
    }
}

impl fmt::Display for CodecKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("json".parse::<CodecKind>().unwrap(), CodecKind::Json);
        assert_eq!("YML".parse::<CodecKind>().unwrap(), CodecKind::Yaml);
        assert_eq!(".bson".parse::<CodecKind>().unwrap(), CodecKind::Bson);
        assert!("cson".parse::<CodecKind>().is_err());
    }

    #[test]
    fn test_display_and_package() {
        assert_eq!(CodecKind::Json5.to_string(), "JSON5");
        assert_eq!(CodecKind::Hjson.package(), ("deser-hjson", "hjson"));
        assert!(matches!(
            CodecKind::Ini.missing(),
            StoreError::MissingDependency { package: "rust-ini", .. }
        ));
    }
}
