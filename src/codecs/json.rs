//! JSON codec

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::value::Document;

/// Pretty-printed JSON; `spaces == 0` writes compact output
#[derive(Debug, Clone)]
pub struct JsonCodec {
    spaces: usize,
}

impl JsonCodec {
    pub fn new(spaces: usize) -> Self {
        JsonCodec { spaces }
    }
}

/// Shared with the HJSON codec, whose output is plain indented JSON
pub(crate) fn to_indented(doc: &Document, spaces: usize, format: CodecKind) -> Result<Vec<u8>> {
    let mut out = Vec::new();

    let written = if spaces == 0 {
        serde_json::to_writer(&mut out, doc)
    } else {
        let indent = vec![b' '; spaces];
        let mut ser = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(&indent));
        doc.serialize(&mut ser)
    };

    written.map_err(|e| StoreError::codec(format, e))?;
    Ok(out)
}

impl Codec for JsonCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Json
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        to_indented(doc, self.spaces, CodecKind::Json)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::codec(CodecKind::Json, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::{json, Value};

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_indent_width() {
        let d = doc(json!({"a": {"b": 1}}));

        let two = String::from_utf8(JsonCodec::new(2).encode(&d).unwrap()).unwrap();
        assert_eq!(two, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");

        let compact = String::from_utf8(JsonCodec::new(0).encode(&d).unwrap()).unwrap();
        assert_eq!(compact, r#"{"a":{"b":1}}"#);
    }

    #[test]
    fn test_preserves_insertion_order() {
        let mut d = Document::new();
        d.insert("zeta".into(), json!(1));
        d.insert("alpha".into(), json!(2));

        let text = String::from_utf8(JsonCodec::new(0).encode(&d).unwrap()).unwrap();
        assert_eq!(text, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_malformed_input() {
        let codec = JsonCodec::new(2);
        assert!(matches!(
            codec.decode(b"{not json"),
            Err(StoreError::Codec { format: CodecKind::Json, .. })
        ));
        // Top-level arrays are not documents
        assert!(codec.decode(b"[1, 2]").is_err());
    }

    fn arb_document() -> impl Strategy<Value = Document> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            "[^\\x00]{0,12}".prop_map(Value::from),
        ];
        let value = leaf.prop_recursive(3, 16, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        });
        prop::collection::btree_map("[a-z]{1,6}", value, 0..6)
            .prop_map(|m| m.into_iter().collect())
    }

    proptest! {
        #[test]
        fn prop_round_trip(d in arb_document(), spaces in 0usize..5) {
            let codec = JsonCodec::new(spaces);
            let decoded = codec.decode(&codec.encode(&d).unwrap()).unwrap();
            prop_assert_eq!(decoded, d);
        }
    }
}
