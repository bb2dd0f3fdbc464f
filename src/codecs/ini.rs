//! INI codec backed by `rust-ini`
//!
//! Layout:
//! - top-level scalars go to the general (unnamed) section,
//! - a top-level object becomes a `[section]`, and objects nested inside it
//!   become dotted sections (`[owner.stats]`),
//! - arrays are stored as JSON text.
//!
//! INI has no types: decoded values are strings, except `true`, `false`,
//! `null` and JSON array literals.
//!
//! Section names and the keys inside sections are read back as dotted
//! paths, so a key containing `.` anywhere below the general section is
//! refused at encode time.

use ::ini::{Ini, Properties};

use crate::core::accessor;
use crate::core::codec::{Codec, CodecKind};
use crate::core::errors::{Result, StoreError};
use crate::core::path::Path;
use crate::core::value::{Document, Value};

#[derive(Debug, Clone, Copy, Default)]
pub struct IniCodec;

fn scalar_text(value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Array(_) => serde_json::to_string(value).map_err(|e| StoreError::codec(CodecKind::Ini, e)),
        other => Ok(other.to_string()),
    }
}

fn parse_scalar(text: &str) -> Value {
    match text {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        "null" => Value::Null,
        t if t.starts_with('[') => serde_json::from_str(t).unwrap_or_else(|_| Value::from(t)),
        t => Value::from(t),
    }
}

fn check_key(section: Option<&str>, key: &str) -> Result<()> {
    if key.contains('.') {
        let location = match section {
            Some(name) => format!("in section [{}]", name),
            None => "as a section".to_string(),
        };
        return Err(StoreError::codec(
            CodecKind::Ini,
            format!("key '{}' contains '.' and cannot be stored {}", key, location),
        ));
    }
    Ok(())
}

/// Write `map` as section `name`, recursing into nested objects
fn write_section(ini: &mut Ini, name: &str, map: &Document) -> Result<()> {
    let mut props = Properties::new();
    for (key, value) in map {
        check_key(Some(name), key)?;
        if !value.is_object() {
            props.insert(key.as_str(), scalar_text(value)?);
        }
    }
    ini.entry(Some(name.to_string())).or_insert(props);

    for (key, value) in map {
        if let Value::Object(child) = value {
            write_section(ini, &format!("{}.{}", name, key), child)?;
        }
    }
    Ok(())
}

impl Codec for IniCodec {
    fn format(&self) -> CodecKind {
        CodecKind::Ini
    }

    fn encode(&self, doc: &Document) -> Result<Vec<u8>> {
        let mut ini = Ini::new();

        for (key, value) in doc {
            if !value.is_object() {
                ini.with_general_section().set(key.as_str(), scalar_text(value)?);
            }
        }
        for (key, value) in doc {
            if let Value::Object(map) = value {
                check_key(None, key)?;
                write_section(&mut ini, key, map)?;
            }
        }

        let mut out = Vec::new();
        ini.write_to(&mut out)?;
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Document> {
        let text = std::str::from_utf8(bytes).map_err(|e| StoreError::codec(CodecKind::Ini, e))?;
        let ini = Ini::load_from_str(text).map_err(|e| StoreError::codec(CodecKind::Ini, e))?;

        let mut doc = Document::new();
        for (section, props) in ini.iter() {
            let name = match section {
                Some(name) => name,
                None => {
                    for (key, value) in props.iter() {
                        doc.insert(key.to_string(), parse_scalar(value));
                    }
                    continue;
                }
            };

            let path: Path = name.parse()?;
            if !matches!(accessor::get(&doc, &path), Some(Value::Object(_))) {
                accessor::set(&mut doc, &path, Value::Object(Document::new()))?;
            }
            for (key, value) in props.iter() {
                let path: Path = format!("{}.{}", name, key).parse()?;
                accessor::set(&mut doc, &path, parse_scalar(value))?;
            }
        }
        Ok(doc)
    }
}
