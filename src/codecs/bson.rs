//! BSON codec backed by the `bson` crate
//!
//! The only binary format: files are read and written as raw bytes.

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

#[derive(Debug, Clone, Copy, Default)]
pub struct BsonCodec;

impl Codec for BsonCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Bson
    }

    fn is_binary(&self) -> bool {
        true
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        ::bson::to_vec(doc).map_err(|e| StoreError::codec(CodecKind::Bson, e))
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        ::bson::from_slice(bytes).map_err(|e| StoreError::codec(CodecKind::Bson, e))
    }
}
