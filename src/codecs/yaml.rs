//! YAML codec backed by `serde_yaml`

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCodec;

impl Codec for YamlCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Yaml
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        serde_yaml::to_string(doc)
            .map(String::into_bytes)
            .map_err(|e| StoreError::codec(CodecKind::Yaml, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        serde_yaml::from_slice(bytes).map_err(|e| StoreError::codec(CodecKind::Yaml, e))
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
        let bytes = YamlCodec.encode(&d).unwrap();
        assert_eq!(YamlCodec.decode(&bytes).unwrap(), d);
    }

    #[test]
    fn test_reads_handwritten_yaml() {
        let text = "server:\n  port: 8080\n  hosts:\n    - a\n    - b\nempty: ~\n";
        let d = YamlCodec.decode(text.as_bytes()).unwrap();

        assert_eq!(d["server"], json!({"port": 8080, "hosts": ["a", "b"]}));
        assert_eq!(d["empty"], json!(null));
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert!(matches!(
            YamlCodec.decode(b"- just\n- a list\n"),
            Err(StoreError::Codec { format: CodecKind::Yaml, .. })
        ));
    }
}
