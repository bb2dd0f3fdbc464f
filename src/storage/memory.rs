//! In-memory store for novadb
//!
//! Holds the document without ever touching disk except for explicit
//! `clone_to` calls, which write JSON.

use std::fs;
use std::path::Path as FsPath;

use crate::codecs::JsonCodec;
use crate::core::accessor;
use crate::core::codec::Codec;
use crate::core::errors::Result;
use crate::core::path::Path;
use crate::core::store::{Pairs, Store};
use crate::core::value::{Document, Value};

/// An in-memory store for the database
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    data: Document,
}

impl MemoryStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        MemoryStore {
            data: Document::new(),
        }
    }

    /// Create a memory store seeded with a document
    pub fn from_document(data: Document) -> Self {
        MemoryStore { data }
    }
}

impl Store for MemoryStore {
    fn set(&mut self, path: &Path, value: Value, _auto_write: bool) -> Result<Value> {
        accessor::set(&mut self.data, path, value.clone())?;
        Ok(value)
    }

    fn get(&self, path: &Path) -> Option<Value> {
        accessor::get(&self.data, path).cloned()
    }

    fn has(&self, path: &Path) -> bool {
        accessor::has(&self.data, path)
    }

    fn delete(&mut self, path: &Path, _auto_write: bool) -> Result<bool> {
        Ok(accessor::unset(&mut self.data, path))
    }

    fn clone_to(&self, destination: &FsPath) -> Result<()> {
        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(destination, JsonCodec::new(2).encode(&self.data)?)?;
        Ok(())
    }

    fn to_document(&self) -> Document {
        self.data.clone()
    }

    fn to_pairs(&self) -> Pairs {
        Pairs::from_document(&self.data)
    }

    fn len(&self) -> usize {
        self.data.len()
    }

    fn save(&self) -> Result<()> {
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Store>> {
        Ok(Box::new(self.clone()))
    }

    fn location(&self) -> Option<&FsPath> {
        None
    }
}
