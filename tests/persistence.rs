use std::fs;

use novadb::{codecs, CodecKind, Database, DatabaseManager, DatabaseOptions, MathOperator, StoreError};
use serde_json::json;
use tempfile::tempdir;

fn options_in(dir: &std::path::Path, format: CodecKind) -> DatabaseOptions {
    DatabaseOptions::default().with_path(dir).with_format(format)
}

#[test]
fn reopen_sees_every_mutation() {
    let dir = tempdir().unwrap();
    let options = options_in(dir.path(), CodecKind::Json);

    {
        let mut db = Database::open(options.clone()).unwrap();
        db.set("users.alice", json!({"age": 30, "tags": []})).unwrap();
        db.push("users.alice.tags", vec![json!("admin"), json!("ops")]).unwrap();
        db.pull("users.alice.tags", |v| v == &json!("ops")).unwrap();
        db.math("users.alice.age", MathOperator::Mul, 2.0, false).unwrap();
        db.set("temp", json!(true)).unwrap();
        db.del("temp").unwrap();
    }

    let db = Database::open(options).unwrap();
    assert_eq!(
        db.get("users.alice").unwrap(),
        Some(json!({"age": 60, "tags": ["admin"]}))
    );
    assert!(!db.has("temp").unwrap());
    assert_eq!(db.size(), 1);
}

#[test]
fn file_written_by_hand_is_loaded() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("settings.json"),
        r#"{"theme": {"dark": false}, "count": 2}"#,
    )
    .unwrap();

    let mut db = Database::open(options_in(dir.path(), CodecKind::Json).with_name("settings")).unwrap();
    assert_eq!(db.get("theme.dark").unwrap(), Some(json!(false)));
    assert!(db.has("theme.dark").unwrap());
    assert_eq!(db.add("count", 3.0).unwrap(), json!(5));
}

/// INI reads numbers back as strings, so only string leaves are compared
#[test]
fn every_available_format_persists() {
    for kind in codecs::available() {
        let dir = tempdir().unwrap();
        let options = options_in(dir.path(), kind);

        {
            let mut db = Database::open(options.clone()).unwrap();
            db.set("name", json!("nova")).unwrap();
            db.set("owner.login", json!("alice")).unwrap();
        }

        let db = Database::open(options).unwrap();
        let file = dir.path().join(format!("database.{}", kind.extension()));
        assert!(file.exists(), "{} file missing", kind);
        assert_eq!(db.get("name").unwrap(), Some(json!("nova")), "{}", kind);
        assert_eq!(db.get("owner.login").unwrap(), Some(json!("alice")), "{}", kind);
    }
}

#[test]
fn corrupted_file_fails_to_open() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("database.json"), "not json at all {").unwrap();

    let result = Database::open(options_in(dir.path(), CodecKind::Json));
    assert!(matches!(result, Err(StoreError::Codec { .. })));
}

#[test]
fn manager_concat_copies_file_databases() {
    let dir = tempdir().unwrap();
    let mut db = Database::open(options_in(dir.path(), CodecKind::Json)).unwrap();
    db.set("k", json!(1)).unwrap();

    let mut manager = DatabaseManager::new();
    manager.insert("main", db).unwrap();

    let merged = manager.concat(&[]).unwrap();
    let copy = merged.get("main").unwrap();
    assert_eq!(copy.get("k").unwrap(), Some(json!(1)));
    assert_eq!(
        copy.location(),
        Some(dir.path().join("database.clone1.json").as_path())
    );
}
