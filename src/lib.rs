//! novadb: a file-backed, path-addressable document store
//!
//! A database keeps one JSON-like document in memory, addresses it with
//! dotted paths (`"users.alice.email"`) and persists the whole document to
//! a single file through a pluggable codec (JSON, YAML, TOML, BSON, JSON5,
//! HJSON, INI, CSV).
//!
//! ```no_run
//! use novadb::{Database, DatabaseOptions};
//! use serde_json::json;
//!
//! let mut db = Database::open(DatabaseOptions::default().with_path("data"))?;
//! db.set("users.alice.age", json!(30))?;
//! db.add("users.alice.age", 1.0)?;
//! assert_eq!(db.get("users.alice.age")?, Some(json!(31)));
//! # Ok::<(), novadb::StoreError>(())
//! ```

pub mod core;
pub mod codecs;
pub mod storage;
pub mod config;
pub mod database;
pub mod manager;

pub use crate::config::DatabaseOptions;
pub use crate::core::codec::{Codec, CodecKind};
pub use crate::core::errors::{Result, StoreError};
pub use crate::core::path::Path;
pub use crate::core::store::{Pairs, Store};
pub use crate::core::value::{Document, MathOperator, Value};
pub use crate::database::{AssignTarget, At, Database, Entry};
pub use crate::manager::DatabaseManager;
pub use crate::storage::{FileStore, MemoryStore, StoreConfig};
