//! JSON5 codec backed by the `json5` crate

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

#[derive(Debug, Clone, Copy, Default)]
pub struct Json5Codec;

impl Codec for Json5Codec {
    fn format(&self) -> CodecKind {
        CodecKind::Json5
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        ::json5::to_string(doc)
            .map(String::into_bytes)
            .map_err(|e| StoreError::codec(CodecKind::Json5, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes).map_err(|e| StoreError::codec(CodecKind::Json5, e))?;
        ::json5::from_str(text).map_err(|e| StoreError::codec(CodecKind::Json5, e))
    }
}
