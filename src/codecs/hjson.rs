//! HJSON codec
//!
//! Reading goes through `deser-hjson`. There is no maintained HJSON
//! writer, so documents are written as indented JSON, which every HJSON
//! reader accepts.

use crate::codecs::json::to_indented;
use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

#[derive(Debug, Clone)]
pub struct HjsonCodec {
    spaces: usize,
}

impl HjsonCodec {
    pub fn new(spaces: usize) -> Self {
        HjsonCodec { spaces }
    }
}

impl Codec for HjsonCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Hjson
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        to_indented(doc, self.spaces.max(1), CodecKind::Hjson)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes).map_err(|e| StoreError::codec(CodecKind::Hjson, e))?;
        deser_hjson::from_str(text).map_err(|e| StoreError::codec(CodecKind::Hjson, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::sample_document;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let codec = HjsonCodec::new(2);
        let d = sample_document();
        let bytes = codec.encode(&d).unwrap();
        assert_eq!(codec.decode(&bytes).unwrap(), d);
    }

    #[test]
    fn test_reads_quoteless_syntax() {
        let text = "{\n  # comment\n  name: nova db\n  count: 3\n}\n";
        let d = HjsonCodec::new(2).decode(text.as_bytes()).unwrap();

        assert_eq!(d["name"], json!("nova db"));
        assert_eq!(d["count"], json!(3));
    }
}
