//! File format implementations
//!
//! JSON is always available. Every other format is backed by a registry
//! crate behind a cargo feature of the same name; asking for a format
//! whose feature was compiled out fails with
//! [`StoreError::MissingDependency`](crate::core::errors::StoreError).

pub mod json;
#[cfg(feature = "yaml")]
pub mod yaml;
#[cfg(feature = "toml")]
pub mod toml;
#[cfg(feature = "bson")]
pub mod bson;
#[cfg(feature = "json5")]
pub mod json5;
#[cfg(feature = "hjson")]
pub mod hjson;
#[cfg(feature = "ini")]
pub mod ini;
#[cfg(feature = "csv")]
pub mod csv;

pub use json::JsonCodec;

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::Result;

/// Build the codec for `kind`. `spaces` is the indent width used by the
/// formats that pretty-print.
pub fn open(kind: CodecKind, spaces: usize) -> Result<Box<dyn Codec>> {
    let codec: Box<dyn Codec> = match kind {
        CodecKind::Json => Box::new(JsonCodec::new(spaces)),

        #[cfg(feature = "yaml")]
        CodecKind::Yaml => Box::new(yaml::YamlCodec),

        #[cfg(feature = "toml")]
        CodecKind::Toml => Box::new(toml::TomlCodec),

        #[cfg(feature = "bson")]
        CodecKind::Bson => Box::new(bson::BsonCodec),

        #[cfg(feature = "json5")]
        CodecKind::Json5 => Box::new(json5::Json5Codec),

        #[cfg(feature = "hjson")]
        CodecKind::Hjson => Box::new(hjson::HjsonCodec::new(spaces)),

        #[cfg(feature = "ini")]
        CodecKind::Ini => Box::new(ini::IniCodec),

        #[cfg(feature = "csv")]
        CodecKind::Csv => Box::new(csv::CsvCodec),

        #[allow(unreachable_patterns)]
        missing => return Err(missing.missing()),
    };

    log::debug!("Using {} codec", kind);
    Ok(codec)
}

/// Formats compiled into this build
pub fn available() -> Vec<CodecKind> {
    CodecKind::ALL
        .into_iter()
        .filter(|kind| open(*kind, 2).is_ok())
        .collect()
}

/// Document every codec must round-trip: strings, integers, floats,
/// booleans, nested objects and arrays (no nulls, TOML has none)
#[cfg(test)]
pub(crate) fn sample_document() -> crate::core::value::Document {
    let value = serde_json::json!({
        "name": "nova",
        "version": 3,
        "ratio": 0.5,
        "enabled": true,
        "tags": ["a", "b"],
        "owner": {
            "login": "alice",
            "stats": {"stars": 12}
        }
    });
    match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_always_available() {
        let codec = open(CodecKind::Json, 2).unwrap();
        assert_eq!(codec.extension(), "json");
        assert!(!codec.is_binary());
        assert!(available().contains(&CodecKind::Json));
    }

    #[cfg(feature = "bson")]
    #[test]
    fn test_bson_is_binary() {
        let codec = open(CodecKind::Bson, 2).unwrap();
        assert!(codec.is_binary());
        assert_eq!(codec.extension(), "bson");
    }

    #[cfg(not(feature = "yaml"))]
    #[test]
    fn test_missing_feature_fails_closed() {
        use crate::core::errors::StoreError;

        let err = open(CodecKind::Yaml, 2).err().unwrap();
        assert!(matches!(
            err,
            StoreError::MissingDependency { package: "serde_yaml", .. }
        ));
    }

    #[test]
    fn test_every_available_codec_reports_its_kind() {
        for kind in available() {
            let codec = open(kind, 2).unwrap();
            assert_eq!(codec.format(), kind);
            assert_eq!(codec.extension(), kind.extension());
        }
    }
}
