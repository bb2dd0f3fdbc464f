//! CSV codec backed by the `csv` crate
//!
//! One `key,value` row per top-level pair. Value cells hold the JSON text
//! of the value, so nested structure survives; a cell that is not valid
//! JSON is read back as a plain string.

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::{Document, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvCodec;

fn codec_err<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::codec(CodecKind::Csv, e)
}

impl Codec for CsvCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Csv
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut writer = ::csv::Writer::from_writer(Vec::new());
        writer.write_record(["key", "value"]).map_err(codec_err)?;

        for (key, value) in doc {
            let cell = serde_json::to_string(value).map_err(codec_err)?;
            writer.write_record([key.as_str(), cell.as_str()]).map_err(codec_err)?;
        }

        writer.into_inner().map_err(codec_err)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let mut reader = ::csv::Reader::from_reader(bytes);
        let mut doc = Document::new();

        for record in reader.records() {
            let record = record.map_err(codec_err)?;
            let (key, cell) = match (record.get(0), record.get(1)) {
                (Some(key), Some(cell)) => (key, cell),
                _ => return Err(codec_err(format!("expected 2 columns, found {}", record.len()))),
            };
            let value = serde_json::from_str(cell).unwrap_or_else(|_| Value::from(cell));
            doc.insert(key.to_string(), value);
        }

        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codecs::sample_document;
    use serde_json::json;

    #[test]
    fn test_round_trip() {
        let mut d = sample_document();
        d.insert("quote".into(), json!("she said \"hi\", twice"));

        let bytes = CsvCodec.encode(&d).unwrap();
        assert_eq!(CsvCodec.decode(&bytes).unwrap(), d);
    }

    #[test]
    fn test_plain_cells_are_strings() {
        let d = CsvCodec.decode(b"key,value\ncity,Paris\ncount,3\n").unwrap();

        assert_eq!(d["city"], json!("Paris"));
        assert_eq!(d["count"], json!(3));
    }

    #[test]
    fn test_header_only_is_empty() {
        let bytes = CsvCodec.encode(&Document::new()).unwrap();
        assert_eq!(bytes, b"key,value\n".to_vec());
        assert!(CsvCodec.decode(&bytes).unwrap().is_empty());
    }
}
