//! File-backed store for novadb
//!
//! The whole document lives in memory; the file on disk is the codec's
//! encoding of it, rewritten in full on every persisted mutation. There is
//! no locking: two processes sharing a file overwrite each other's writes.

use std::fs;
use std::path::{Path as FsPath, PathBuf};
use std::sync::Arc;

use log::{debug, info};

use crate::core::accessor;
use crate::core::codec::Codec;
use crate::core::errors::Result;
use crate::core::path::Path;
use crate::core::store::{Pairs, Store};
use crate::core::value::{Document, Value};

/// Where a file store keeps its document
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the file, or the file itself when it already
    /// carries the codec's extension. `None` means the working directory.
    pub path: Option<PathBuf>,
    /// File name without extension
    pub name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            path: None,
            name: "database".to_string(),
        }
    }
}

/// Join base path, name and extension into the file a store will use
pub fn resolve_file(base: Option<&FsPath>, name: &str, extension: &str) -> PathBuf {
    let base = base.map(FsPath::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

    if base.extension().map_or(false, |ext| ext == extension) {
        return base;
    }

    base.join(format!("{}.{}", name, extension))
}

/// First `<stem>.clone<N>.<ext>` next to `file` that does not exist yet
pub fn next_clone_path(file: &FsPath, extension: &str) -> PathBuf {
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "database".to_string());

    let mut number = 1;
    loop {
        let candidate = file.with_file_name(format!("{}.clone{}.{}", stem, number, extension));
        if !candidate.exists() {
            return candidate;
        }
        number += 1;
    }
}

fn ensure_parent(file: &FsPath) -> Result<()> {
    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// A store persisted to one file through a codec
pub struct FileStore {
    cache: Document,
    file: PathBuf,
    codec: Arc<dyn Codec>,
}

impl FileStore {
    /// Open (or create) the store described by `config`.
    ///
    /// A missing file is created holding the empty document; an existing
    /// one is decoded and merged into the cache.
    pub fn open(config: StoreConfig, codec: Box<dyn Codec>) -> Result<Self> {
        let codec: Arc<dyn Codec> = Arc::from(codec);
        let file = resolve_file(config.path.as_deref(), &config.name, codec.extension());
        ensure_parent(&file)?;

        let mut store = FileStore {
            cache: Document::new(),
            file,
            codec,
        };

        if store.file.exists() {
            store.load()?;
        } else {
            info!("Creating {} database at {}", store.codec.format(), store.file.display());
            store.save()?;
        }

        Ok(store)
    }

    /// Read the file and merge its document into the cache
    fn load(&mut self) -> Result<()> {
        let bytes = fs::read(&self.file)?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            debug!("{} is empty, starting from an empty document", self.file.display());
            return Ok(());
        }

        let doc = self.codec.decode(&bytes)?;
        debug!("Loaded {} top-level keys from {}", doc.len(), self.file.display());
        accessor::merge(&mut self.cache, doc);

        Ok(())
    }

    /// The codec this store writes with
    pub fn codec(&self) -> &dyn Codec {
        self.codec.as_ref()
    }

    pub fn file(&self) -> &FsPath {
        &self.file
    }
}

impl Store for FileStore {
    fn set(&mut self, path: &Path, value: Value, auto_write: bool) -> Result<Value> {
        accessor::set(&mut self.cache, path, value.clone())?;
        debug!("set {}", path);

        if auto_write {
            self.save()?;
        }
        Ok(value)
    }

    fn get(&self, path: &Path) -> Option<Value> {
        accessor::get(&self.cache, path).cloned()
    }

    fn has(&self, path: &Path) -> bool {
        accessor::has(&self.cache, path)
    }

    fn delete(&mut self, path: &Path, auto_write: bool) -> Result<bool> {
        let removed = accessor::unset(&mut self.cache, path);
        debug!("delete {} -> {}", path, removed);

        if removed && auto_write {
            self.save()?;
        }
        Ok(removed)
    }

    fn clone_to(&self, destination: &FsPath) -> Result<()> {
        ensure_parent(destination)?;
        fs::write(destination, self.codec.encode(&self.cache)?)?;
        info!("Cloned {} to {}", self.file.display(), destination.display());
        Ok(())
    }

    fn to_document(&self) -> Document {
        self.cache.clone()
    }

    fn to_pairs(&self) -> Pairs {
        Pairs::from_document(&self.cache)
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn save(&self) -> Result<()> {
        let bytes = self.codec.encode(&self.cache)?;
        fs::write(&self.file, bytes)?;
        debug!("Saved {}", self.file.display());
        Ok(())
    }

    fn fork(&self) -> Result<Box<dyn Store>> {
        let file = next_clone_path(&self.file, self.codec.extension());
        let store = FileStore {
            cache: self.cache.clone(),
            file,
            codec: Arc::clone(&self.codec),
        };
        store.save()?;
        Ok(Box::new(store))
    }

    fn location(&self) -> Option<&FsPath> {
        Some(&self.file)
    }
}
