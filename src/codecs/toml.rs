//! TOML codec backed by the `toml` crate
//!
//! TOML has no null; encoding a document holding one fails with a codec
//! error instead of silently dropping the key.

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl Codec for TomlCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Toml
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        ::toml::to_string(doc)
            .map(String::into_bytes)
            .map_err(|e| StoreError::codec(CodecKind::Toml, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes).map_err(|e| StoreError::codec(CodecKind::Toml, e))?;
        ::toml::from_str(text).map_err(|e| StoreError::codec(CodecKind::Toml, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::sample_document;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let d = sample_document();
        let bytes = TomlCodec.encode(&d).unwrap();
        assert_eq!(TomlCodec.decode(&bytes).unwrap(), d);
    }

    #[test]
    fn test_reads_handwritten_toml() {
        let text = "title = \"demo\"\n\n[owner]\nname = \"bob\"\nage = 41\n";
        let d = TomlCodec.decode(text.as_bytes()).unwrap();

        assert_eq!(d["title"], json!("demo"));
        assert_eq!(d["owner"], json!({"name": "bob", "age": 41}));
    }

    #[test]
    fn test_null_is_not_representable() {
        let mut d = Document::new();
        d.insert("gone".into(), json!(null));

        assert!(matches!(
            TomlCodec.encode(&d),
            Err(StoreError::Codec { format: CodecKind::Toml, .. })
        ));
    }
}
