//! Construction options for a database

use std::fs;
use std::path::{Path as FsPath, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::codec::CodecKind;
use crate::core::errors::{Result, StoreError};
use crate::storage::StoreConfig;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseOptions {
    /// Base directory, or the database file itself
    pub path: Option<PathBuf>,
    /// File name without extension
    pub name: String,
    pub format: CodecKind,
    /// Indent width for the formats that pretty-print
    pub spaces: usize,
    /// Maximum number of top-level keys, 0 for unbounded
    pub size: usize,
    /// `push` replaces an existing array instead of appending to it
    pub over_write: bool,
    /// Persist after every mutation
    pub auto_write: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            path: None,
            name: "database".to_string(),
            format: CodecKind::Json,
            spaces: 2,
            size: 0,
            over_write: false,
            auto_write: true,
        }
    }
}

impl DatabaseOptions {
    /// Load options from a `.json` or `.toml` file. Missing fields keep
    /// their defaults.
    pub fn from_file<P: AsRef<FsPath>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => {
                serde_json::from_str(&text).map_err(|e| StoreError::codec(CodecKind::Json, e))
            }
            #[cfg(feature = "toml")]
            "toml" => toml::from_str(&text).map_err(|e| StoreError::codec(CodecKind::Toml, e)),
            #[cfg(not(feature = "toml"))]
            "toml" => Err(CodecKind::Toml.missing()),
            other => Err(StoreError::InvalidArgument(format!(
                "unsupported options file extension '{}'",
                other
            ))),
        }
    }

    pub fn with_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_format(mut self, format: CodecKind) -> Self {
        self.format = format;
        self
    }

    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    pub fn with_over_write(mut self, over_write: bool) -> Self {
        self.over_write = over_write;
        self
    }

    pub fn with_auto_write(mut self, auto_write: bool) -> Self {
        self.auto_write = auto_write;
        self
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            path: self.path.clone(),
            name: self.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let o = DatabaseOptions::default();
        assert_eq!(o.name, "database");
        assert_eq!(o.format, CodecKind::Json);
        assert_eq!(o.spaces, 2);
        assert_eq!(o.size, 0);
        assert!(!o.over_write);
        assert!(o.auto_write);
        assert!(o.path.is_none());
    }

    #[test]
    fn test_from_json_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nova.json");
        fs::write(&file, r#"{"name": "users", "format": "yaml", "size": 10}"#).unwrap();

        let o = DatabaseOptions::from_file(&file).unwrap();
        assert_eq!(o.name, "users");
        assert_eq!(o.format, CodecKind::Yaml);
        assert_eq!(o.size, 10);
        assert_eq!(o.spaces, 2);
        assert!(o.auto_write);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nova.toml");
        fs::write(&file, "path = \"data\"\nover_write = true\nauto_write = false\n").unwrap();

        let o = DatabaseOptions::from_file(&file).unwrap();
        assert_eq!(o.path, Some(PathBuf::from("data")));
        assert!(o.over_write);
        assert!(!o.auto_write);
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nova.conf");
        fs::write(&file, "").unwrap();

        assert!(matches!(
            DatabaseOptions::from_file(&file),
            Err(StoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_builders() {
        let o = DatabaseOptions::default()
            .with_path("data")
            .with_name("users")
            .with_size(3);
        let config = o.store_config();
        assert_eq!(config.path, Some(PathBuf::from("data")));
        assert_eq!(config.name, "users");
        assert_eq!(o.size, 3);
    }
}
