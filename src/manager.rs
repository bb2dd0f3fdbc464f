//! Named registry of databases
//!
//! The manager owns every database it holds. Operations that hand a
//! database to another manager (`assign`, `concat`) give it a copy made
//! with [`Database::copy`], so a file-backed database produces a sibling
//! clone file.

use indexmap::IndexMap;
use log::warn;

use crate::core::errors::{Result, StoreError};
use crate::database::Database;

#[derive(Default)]
pub struct DatabaseManager {
    databases: IndexMap<String, Database>,
    size: usize,
}

impl DatabaseManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// A manager holding at most `size` databases, 0 for unbounded
    pub fn with_size(size: usize) -> Self {
        DatabaseManager {
            databases: IndexMap::new(),
            size,
        }
    }

    /// Register `db` under `name`, returning the database it replaced
    pub fn insert<S: Into<String>>(&mut self, name: S, db: Database) -> Result<Option<Database>> {
        let name = name.into();

        if !self.accepts(&name) {
            return Err(StoreError::LimitExceeded { limit: self.size });
        }

        Ok(self.databases.insert(name, db))
    }

    /// Whether `insert` under `name` would stay within the size cap
    fn accepts(&self, name: &str) -> bool {
        self.size == 0 || self.databases.contains_key(name) || self.len() < self.size
    }

    pub fn get(&self, name: &str) -> Option<&Database> {
        self.databases.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Database> {
        self.databases.get_mut(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Database> {
        self.databases.shift_remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.databases.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.databases.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.databases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.databases.is_empty()
    }

    /// Name and database at `index` in insertion order
    pub fn at(&self, index: usize) -> Option<(&str, &Database)> {
        self.databases
            .get_index(index)
            .map(|(name, db)| (name.as_str(), db))
    }

    /// Copy every database into `other`, reporting success per name.
    ///
    /// A name `other` has no room for is reported `false` without copying;
    /// a copy that fails to register has its file removed.
    pub fn assign(&self, other: &mut DatabaseManager) -> IndexMap<String, bool> {
        let mut report = IndexMap::new();

        for (name, db) in &self.databases {
            let applied = if other.accepts(name) {
                match db.copy().and_then(|copy| other.place(name, copy)) {
                    Ok(_) => true,
                    Err(e) => {
                        warn!("assign: database '{}' failed: {}", name, e);
                        false
                    }
                }
            } else {
                warn!("assign: no room for database '{}' (limit {})", name, other.size);
                false
            };
            report.insert(name.clone(), applied);
        }

        report
    }

    /// New manager holding copies of this one's databases and then each of
    /// `others` in order; later names win.
    ///
    /// A copy replaced by a later one is discarded with its file, as is
    /// every copy made so far on error.
    pub fn concat(&self, others: &[&DatabaseManager]) -> Result<DatabaseManager> {
        let mut merged = DatabaseManager::with_size(self.size);

        for manager in std::iter::once(self).chain(others.iter().copied()) {
            for (name, db) in &manager.databases {
                let result = if merged.accepts(name) {
                    db.copy().and_then(|copy| merged.place(name, copy)).map(|replaced| {
                        if let Some(previous) = replaced {
                            previous.discard();
                        }
                    })
                } else {
                    Err(StoreError::LimitExceeded { limit: merged.size })
                };

                if let Err(e) = result {
                    merged.discard_all();
                    return Err(e);
                }
            }
        }

        Ok(merged)
    }

    /// `insert` for a fresh copy; a refused copy has its file removed
    fn place(&mut self, name: &str, copy: Database) -> Result<Option<Database>> {
        if !self.accepts(name) {
            copy.discard();
            return Err(StoreError::LimitExceeded { limit: self.size });
        }
        Ok(self.databases.insert(name.to_string(), copy))
    }

    fn discard_all(self) {
        for (_, db) in self.databases {
            db.discard();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseOptions;
    use serde_json::json;
    use std::fs;
    use std::path::Path as FsPath;
    use tempfile::tempdir;

    fn db_with(key: &str, value: i64) -> Database {
        let mut db = Database::in_memory(DatabaseOptions::default());
        db.set(key, json!(value)).unwrap();
        db
    }

    fn file_db(dir: &FsPath, name: &str) -> Database {
        let options = DatabaseOptions::default().with_path(dir).with_name(name);
        let mut db = Database::open(options).unwrap();
        db.set("n", json!(name)).unwrap();
        db
    }

    fn files_in(dir: &FsPath) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_registry_basics() {
        let mut manager = DatabaseManager::new();
        assert!(manager.is_empty());

        manager.insert("users", db_with("n", 1)).unwrap();
        manager.insert("posts", db_with("n", 2)).unwrap();

        assert_eq!(manager.len(), 2);
        assert!(manager.contains("users"));
        assert_eq!(manager.names(), vec!["users", "posts"]);

        let (name, db) = manager.at(1).unwrap();
        assert_eq!(name, "posts");
        assert_eq!(db.get("n").unwrap(), Some(json!(2)));
        assert!(manager.at(2).is_none());

        manager.get_mut("users").unwrap().set("n", json!(10)).unwrap();
        assert_eq!(manager.get("users").unwrap().get("n").unwrap(), Some(json!(10)));

        assert!(manager.remove("users").is_some());
        assert!(!manager.contains("users"));
        assert_eq!(manager.names(), vec!["posts"]);
    }

    #[test]
    fn test_size_cap() {
        let mut manager = DatabaseManager::with_size(1);
        manager.insert("a", db_with("n", 1)).unwrap();

        assert!(matches!(
            manager.insert("b", db_with("n", 2)),
            Err(StoreError::LimitExceeded { limit: 1 })
        ));
        let replaced = manager.insert("a", db_with("n", 3)).unwrap();
        assert!(replaced.is_some());
    }

    #[test]
    fn test_assign_reports_failures() {
        let mut source = DatabaseManager::new();
        source.insert("a", db_with("n", 1)).unwrap();
        source.insert("b", db_with("n", 2)).unwrap();

        let mut target = DatabaseManager::with_size(1);
        let report = source.assign(&mut target);

        assert_eq!(report.get("a"), Some(&true));
        assert_eq!(report.get("b"), Some(&false));
        assert_eq!(target.names(), vec!["a"]);
    }

    #[test]
    fn test_rejected_assign_leaves_no_clone_file() {
        let dir = tempdir().unwrap();
        let mut source = DatabaseManager::new();
        source.insert("a", file_db(dir.path(), "a")).unwrap();
        source.insert("b", file_db(dir.path(), "b")).unwrap();

        let mut target = DatabaseManager::with_size(1);
        let report = source.assign(&mut target);

        assert_eq!(report.get("a"), Some(&true));
        assert_eq!(report.get("b"), Some(&false));
        assert_eq!(files_in(dir.path()), vec!["a.clone1.json", "a.json", "b.json"]);
        assert_eq!(
            target.get("a").unwrap().location(),
            Some(dir.path().join("a.clone1.json").as_path())
        );
    }

    #[test]
    fn test_concat_keeps_only_files_it_returns() {
        let dir = tempdir().unwrap();
        let mut first = DatabaseManager::new();
        first.insert("shared", file_db(dir.path(), "x")).unwrap();

        let mut second = DatabaseManager::new();
        second.insert("shared", file_db(dir.path(), "y")).unwrap();
        second.insert("extra", file_db(dir.path(), "z")).unwrap();

        let merged = first.concat(&[&second]).unwrap();
        assert_eq!(merged.get("shared").unwrap().get("n").unwrap(), Some(json!("y")));
        assert_eq!(
            files_in(dir.path()),
            vec!["x.json", "y.clone1.json", "y.json", "z.clone1.json", "z.json"]
        );

        let mut capped = DatabaseManager::with_size(1);
        capped.insert("shared", file_db(dir.path(), "w")).unwrap();
        assert!(matches!(
            capped.concat(&[&second]),
            Err(StoreError::LimitExceeded { limit: 1 })
        ));
        assert!(!dir.path().join("w.clone1.json").exists());
        assert!(!dir.path().join("y.clone2.json").exists());
        assert!(!dir.path().join("z.clone2.json").exists());
    }

    #[test]
    fn test_concat_later_wins() {
        let mut first = DatabaseManager::new();
        first.insert("shared", db_with("from", 1)).unwrap();
        first.insert("only_first", db_with("n", 1)).unwrap();

        let mut second = DatabaseManager::new();
        second.insert("shared", db_with("from", 2)).unwrap();

        let merged = first.concat(&[&second]).unwrap();
        assert_eq!(merged.names(), vec!["shared", "only_first"]);
        assert_eq!(
            merged.get("shared").unwrap().get("from").unwrap(),
            Some(json!(2))
        );
        assert_eq!(
            first.get("shared").unwrap().get("from").unwrap(),
            Some(json!(1))
        );
    }
}
