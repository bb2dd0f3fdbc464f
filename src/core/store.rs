use std::path::Path as FsPath;

use serde::Serialize;

use crate::core::errors::Result;
use crate::core::path::Path;
use crate::core::value::{Document, Value};

/// Top-level keys and values as parallel vectors, for positional access
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pairs {
    pub keys: Vec<String>,
    pub values: Vec<Value>,
}

impl Pairs {
    pub fn from_document(doc: &Document) -> Self {
        let (keys, values) = doc
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .unzip();
        Pairs { keys, values }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Trait defining the core operations of a store.
///
/// A store owns the cached document. Reads are answered from the cache;
/// writes mutate the cache and, when `auto_write` is set, persist the whole
/// document before returning.
pub trait Store: Send {
    /// Set a value at the given path, returning it
    fn set(&mut self, path: &Path, value: Value, auto_write: bool) -> Result<Value>;

    /// Get a copy of the value at the given path
    fn get(&self, path: &Path) -> Option<Value>;

    /// Check if a path resolves to a value
    fn has(&self, path: &Path) -> bool;

    /// Delete the value at the given path; see `accessor::unset` for the
    /// meaning of the returned flag
    fn delete(&mut self, path: &Path, auto_write: bool) -> Result<bool>;

    /// Write the encoded document to another file
    fn clone_to(&self, destination: &FsPath) -> Result<()>;

    /// Copy of the whole cached document
    fn to_document(&self) -> Document;

    /// Top-level keys and values
    fn to_pairs(&self) -> Pairs;

    /// Number of top-level keys
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist the cache (no-op for in-memory stores)
    fn save(&self) -> Result<()>;

    /// A new, independent store seeded with this store's document
    fn fork(&self) -> Result<Box<dyn Store>>;

    /// The file backing this store, if any
    fn location(&self) -> Option<&FsPath>;
}
