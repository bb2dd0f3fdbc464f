//! Database façade
//!
//! A `Database` owns one store and the options it was opened with. Every
//! operation is expressed through the store's primitives; the database adds
//! the size cap and the derived helpers (arithmetic, array push/pull, bulk
//! assignment).

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use indexmap::IndexMap;
use log::{debug, warn};
use serde::Serialize;

use crate::codecs;
use crate::config::DatabaseOptions;
use crate::core::errors::{Result, StoreError};
use crate::core::path::Path;
use crate::core::store::{Pairs, Store};
use crate::core::value::{number_from_f64, type_name, Document, MathOperator, Value};
use crate::storage::{FileStore, MemoryStore};

/// One top-level pair, as returned by [`Database::all`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    pub key: String,
    pub value: Value,
}

/// Result of positional access; each field is `None` when its index is out
/// of range
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct At {
    pub key: Option<String>,
    pub value: Option<Value>,
}

/// Something `Database::assign` can copy pairs into.
///
/// `supports` is checked once before any pair is applied; `apply` may then
/// fail per key without stopping the batch.
pub trait AssignTarget {
    fn supports(&self, method: &str) -> bool;

    fn apply(&mut self, method: &str, key: &str, value: Value) -> Result<()>;
}

fn parse(key: &str) -> Result<Path> {
    Ok(key.parse::<Path>()?)
}

/// Main API for a novadb database
pub struct Database {
    store: Box<dyn Store>,
    options: DatabaseOptions,
}

impl Database {
    /// Open the file described by `options`, creating it if needed
    pub fn open(options: DatabaseOptions) -> Result<Self> {
        let codec = codecs::open(options.format, options.spaces)?;
        let store = FileStore::open(options.store_config(), codec)?;
        Ok(Self::with_store(Box::new(store), options))
    }

    /// A database that never touches disk
    pub fn in_memory(options: DatabaseOptions) -> Self {
        Self::with_store(Box::new(MemoryStore::new()), options)
    }

    pub fn with_store(store: Box<dyn Store>, options: DatabaseOptions) -> Self {
        Database { store, options }
    }

    pub fn options(&self) -> &DatabaseOptions {
        &self.options
    }

    /// The backing file, `None` for in-memory databases
    pub fn location(&self) -> Option<&FsPath> {
        self.store.location()
    }

    /// Number of top-level keys
    pub fn size(&self) -> usize {
        self.store.len()
    }

    fn check_limit(&self, path: &Path) -> Result<()> {
        let limit = self.options.size;
        if limit == 0 {
            return Ok(());
        }

        let root = Path::top_level(path.root().as_str());
        if !self.store.has(&root) && self.size() >= limit {
            debug!("Rejecting new key '{}': database holds {} keys", root, self.size());
            return Err(StoreError::LimitExceeded { limit });
        }
        Ok(())
    }

    fn set_at(&mut self, path: &Path, value: Value) -> Result<Value> {
        self.check_limit(path)?;
        self.store.set(path, value, self.options.auto_write)
    }

    fn update_at(&mut self, path: &Path, value: Value) -> Result<Value> {
        if self.store.has(path) {
            self.store.delete(path, false)?;
        }
        self.set_at(path, value)
    }

    /// Set a value at the given key
    pub fn set(&mut self, key: &str, value: Value) -> Result<Value> {
        let path = parse(key)?;
        self.set_at(&path, value)
    }

    /// Get a copy of the value at the given key
    pub fn get(&self, key: &str) -> Result<Option<Value>> {
        let path = parse(key)?;
        Ok(self.store.get(&path))
    }

    /// Check if a key resolves to a value
    pub fn has(&self, key: &str) -> Result<bool> {
        let path = parse(key)?;
        Ok(self.store.has(&path))
    }

    pub fn exists(&self, key: &str) -> Result<bool> {
        self.has(key)
    }

    /// Delete the value at the given key
    pub fn del(&mut self, key: &str) -> Result<bool> {
        let path = parse(key)?;
        self.store.delete(&path, self.options.auto_write)
    }

    /// Replace the value at `key`, setting it when absent
    pub fn update(&mut self, key: &str, value: Value) -> Result<Value> {
        let path = parse(key)?;
        self.update_at(&path, value)
    }

    /// Apply `op` to the number stored at `key` (0 when absent) and store
    /// the result. Negative results are clamped to 0 unless
    /// `allow_negative` is set.
    pub fn math(
        &mut self,
        key: &str,
        op: MathOperator,
        operand: f64,
        allow_negative: bool,
    ) -> Result<Value> {
        let path = parse(key)?;

        if !operand.is_finite() {
            return Err(StoreError::InvalidArgument(format!(
                "math operand must be a finite number, got {}",
                operand
            )));
        }

        let current = match self.store.get(&path) {
            None => 0.0,
            Some(Value::Number(n)) => n.as_f64().ok_or_else(|| {
                StoreError::InvalidArgument(format!("'{}' holds a number outside f64 range", key))
            })?,
            Some(other) => {
                return Err(StoreError::TypeMismatch {
                    key: key.to_string(),
                    expected: "number",
                    found: type_name(&other),
                })
            }
        };

        let mut result = op.apply(current, operand);
        if !allow_negative && result < 0.0 {
            result = 0.0;
        }

        let value = number_from_f64(result).ok_or_else(|| {
            StoreError::InvalidArgument(format!(
                "{} {} {} does not produce a finite number",
                current, op, operand
            ))
        })?;

        self.update_at(&path, value)
    }

    /// Add `amount` to the number at `key`, clamping at 0
    pub fn add(&mut self, key: &str, amount: f64) -> Result<Value> {
        self.math(key, MathOperator::Add, amount, false)
    }

    /// Subtract `amount` from the number at `key`, clamping at 0
    pub fn sub(&mut self, key: &str, amount: f64) -> Result<Value> {
        self.math(key, MathOperator::Sub, amount, false)
    }

    /// Append `values` to the array at `key`.
    ///
    /// An absent key is set to `values`. With `over_write` an existing array
    /// is replaced. A value that is not an array is overwritten with
    /// `values`.
    pub fn push(&mut self, key: &str, values: Vec<Value>) -> Result<Value> {
        let path = parse(key)?;

        let next = match self.store.get(&path) {
            Some(Value::Array(mut items)) if !self.options.over_write => {
                items.extend(values);
                items
            }
            _ => values,
        };

        self.set_at(&path, Value::Array(next))
    }

    /// Remove the elements of the array at `key` matching `predicate`.
    ///
    /// Returns the kept elements, or `None` when the key is absent.
    pub fn pull<F>(&mut self, key: &str, mut predicate: F) -> Result<Option<Vec<Value>>>
    where
        F: FnMut(&Value) -> bool,
    {
        let path = parse(key)?;

        let mut items = match self.store.get(&path) {
            None => return Ok(None),
            Some(Value::Array(items)) => items,
            Some(other) => {
                return Err(StoreError::TypeMismatch {
                    key: key.to_string(),
                    expected: "array",
                    found: type_name(&other),
                })
            }
        };

        items.retain(|item| !predicate(item));
        self.set_at(&path, Value::Array(items.clone()))?;
        Ok(Some(items))
    }

    /// Key at `key_index` and value at `value_index` of the top-level pairs
    pub fn at(&self, key_index: usize, value_index: usize) -> At {
        let Pairs { keys, values } = self.store.to_pairs();
        At {
            key: keys.get(key_index).cloned(),
            value: values.get(value_index).cloned(),
        }
    }

    /// Copy every top-level pair into `target` through `method`.
    ///
    /// Failures are recorded per key as `false`; a target that cannot
    /// perform `method` at all fails with `NotConstructible` before any
    /// pair is applied.
    pub fn assign<T>(&self, target: &mut T, method: &str) -> Result<IndexMap<String, bool>>
    where
        T: AssignTarget + ?Sized,
    {
        if !target.supports(method) {
            return Err(StoreError::NotConstructible(format!(
                "assign target has no '{}' method",
                method
            )));
        }

        let mut report = IndexMap::new();
        for (key, value) in self.store.to_document() {
            let applied = match target.apply(method, &key, value) {
                Ok(()) => true,
                Err(e) => {
                    warn!("assign: '{}' via {} failed: {}", key, method, e);
                    false
                }
            };
            report.insert(key, applied);
        }

        Ok(report)
    }

    /// An independent database seeded with this one's document
    pub fn copy(&self) -> Result<Database> {
        Ok(Database {
            store: self.store.fork()?,
            options: self.options.clone(),
        })
    }

    /// Copy of this database with every top-level key of `others` laid
    /// over it in order
    pub fn concat(&self, others: &[&Database]) -> Result<Database> {
        let mut merged = self.copy()?;

        for other in others {
            for (key, value) in other.store.to_document() {
                if let Err(e) = merged.set_at(&Path::top_level(key), value) {
                    merged.discard();
                    return Err(e);
                }
            }
        }

        Ok(merged)
    }

    /// Drop a database and remove its backing file, if any.
    ///
    /// Used to undo a `copy` whose result will not be handed out.
    pub(crate) fn discard(self) {
        if let Some(file) = self.location() {
            if let Err(e) = fs::remove_file(file) {
                warn!("Could not remove {}: {}", file.display(), e);
            }
        }
    }

    /// Top-level pairs; `amount > 0` keeps only the first `amount`
    pub fn all(&self, amount: usize) -> Vec<Entry> {
        let entries = self
            .store
            .to_document()
            .into_iter()
            .map(|(key, value)| Entry { key, value });

        if amount > 0 {
            entries.take(amount).collect()
        } else {
            entries.collect()
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.store.to_pairs().keys
    }

    pub fn values(&self) -> Vec<Value> {
        self.store.to_pairs().values
    }

    pub fn pairs(&self) -> Pairs {
        self.store.to_pairs()
    }

    /// The whole document
    pub fn json(&self) -> Document {
        self.store.to_document()
    }

    /// Type name of the value at `key`, `"undefined"` when absent
    pub fn type_of(&self, key: &str) -> Result<&'static str> {
        Ok(self.get(key)?.as_ref().map_or("undefined", type_name))
    }

    /// Write the encoded document to `destination`
    pub fn clone_to<P: AsRef<FsPath>>(&self, destination: P) -> Result<()> {
        self.store.clone_to(destination.as_ref())
    }

    /// Write a backup next to the database file as `<name>-clone.<ext>`
    pub fn backup(&self) -> Result<PathBuf> {
        let file = self.location().ok_or_else(|| {
            StoreError::InvalidArgument("an in-memory database has no file to back up".to_string())
        })?;

        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.options.name.clone());
        let destination = file.with_file_name(format!(
            "{}-clone.{}",
            stem,
            self.options.format.extension()
        ));

        self.clone_to(&destination)?;
        Ok(destination)
    }

    /// Persist the document; only needed when `auto_write` is off
    pub fn save(&self) -> Result<()> {
        self.store.save()
    }
}

impl AssignTarget for Database {
    fn supports(&self, method: &str) -> bool {
        matches!(method, "set" | "update" | "push")
    }

    fn apply(&mut self, method: &str, key: &str, value: Value) -> Result<()> {
        match method {
            "set" => self.set(key, value).map(drop),
            "update" => self.update(key, value).map(drop),
            "push" => {
                let values = match value {
                    Value::Array(items) => items,
                    other => vec![other],
                };
                self.push(key, values).map(drop)
            }
            other => Err(StoreError::NotConstructible(format!(
                "database has no '{}' method",
                other
            ))),
        }
    }
}

/// Plain documents accept `set`, keyed by top-level name
impl AssignTarget for Document {
    fn supports(&self, method: &str) -> bool {
        method == "set"
    }

    fn apply(&mut self, _method: &str, key: &str, value: Value) -> Result<()> {
        self.insert(key.to_string(), value);
        Ok(())
    }
}
