//! Tests for the store module.

use tempfile::TempDir;

use crate::store::mock::MockStore;
use crate::store::{
    FileStore, LoadResult, MemoryStore, Persist, SettingsStore, StoreValue, load_or,
};

mod load_result {
    use super::*;

    #[test]
    fn unwrap_or_returns_loaded_value() {
        let result = LoadResult::Loaded(7);
        assert_eq!(result.unwrap_or(1), 7);
    }

    #[test]
    fn unwrap_or_returns_fallback_for_not_found() {
        let result: LoadResult<i32> = LoadResult::NotFound;
        assert_eq!(result.unwrap_or(1), 1);
    }

    #[test]
    fn unwrap_or_returns_fallback_for_corrupted() {
        let result: LoadResult<i32> = LoadResult::Corrupted {
            reason: "test".to_string(),
        };
        assert_eq!(result.unwrap_or(1), 1);
    }

    #[test]
    fn is_loaded_only_for_loaded() {
        assert!(LoadResult::Loaded(StoreValue::Bool(true)).is_loaded());
        assert!(!LoadResult::<StoreValue>::NotFound.is_loaded());
    }

    #[test]
    fn decode_converts_matching_type() {
        let result = LoadResult::Loaded(StoreValue::Int(42)).decode::<i32>();
        assert_eq!(result, LoadResult::Loaded(42));
    }

    #[test]
    fn decode_turns_type_mismatch_into_corrupted() {
        let result = LoadResult::Loaded(StoreValue::Str("yes".into())).decode::<bool>();

        match result {
            LoadResult::Corrupted { reason } => {
                assert!(reason.contains("expected bool"));
                assert!(reason.contains("string"));
            }
            other => panic!("Expected Corrupted, got {other:?}"),
        }
    }

    #[test]
    fn decode_keeps_not_found() {
        let result = LoadResult::<StoreValue>::NotFound.decode::<f32>();
        assert_eq!(result, LoadResult::NotFound);
    }
}

mod persist {
    use super::*;

    #[test]
    fn float_accepts_integer_records() {
        assert_eq!(f32::from_store(&StoreValue::Int(3)), Some(3.0));
    }

    #[test]
    fn integer_rejects_float_records() {
        assert_eq!(i32::from_store(&StoreValue::Float(3.0)), None);
    }

    #[test]
    fn i32_rejects_out_of_range_integers() {
        assert_eq!(i32::from_store(&StoreValue::Int(i64::MAX)), None);
    }

    #[test]
    fn string_rejects_bool() {
        assert_eq!(String::from_store(&StoreValue::Bool(true)), None);
    }

    #[test]
    fn display_is_plain_scalar() {
        assert_eq!(StoreValue::Str("Medium".into()).to_string(), "Medium");
        assert_eq!(StoreValue::Int(-1).to_string(), "-1");
        assert_eq!(StoreValue::Bool(false).to_string(), "false");
    }
}

mod load_or_helper {
    use super::*;

    #[test]
    fn returns_stored_value() {
        let store = MemoryStore::with_values([("Volume", 0.25_f64)]);
        assert!((load_or(&store, "Volume", 1.0_f64) - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn returns_fallback_for_missing_key() {
        let store = MemoryStore::new();
        assert!(load_or(&store, "Enabled", true));
    }

    #[test]
    fn returns_fallback_for_corrupted_key() {
        let store = MockStore::new();
        store.corrupt("Count", "bad bytes");
        assert_eq!(load_or(&store, "Count", 5_i32), 5);
    }

    #[test]
    fn returns_fallback_for_wrong_type() {
        let store = MemoryStore::with_values([("Count", "five")]);
        assert_eq!(load_or(&store, "Count", 5_i32), 5);
    }
}

mod memory_store {
    use super::*;

    #[test]
    fn missing_key_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(store.load("nope"), LoadResult::NotFound);
    }

    #[test]
    fn save_then_load() {
        let store = MemoryStore::new();
        store.save("Enabled", StoreValue::Bool(true)).unwrap();

        assert_eq!(store.load("Enabled"), LoadResult::Loaded(StoreValue::Bool(true)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn insert_and_remove() {
        let store = MemoryStore::new();
        store.insert("A", 1);
        assert_eq!(store.get("A"), Some(StoreValue::Int(1)));

        assert_eq!(store.remove("A"), Some(StoreValue::Int(1)));
        assert!(store.is_empty());
    }

    #[test]
    fn keys_are_sorted() {
        let store = MemoryStore::with_values([("b", 1), ("a", 2)]);
        assert_eq!(store.keys(), vec!["a".to_string(), "b".to_string()]);
    }
}

mod file_store {
    use super::*;

    #[test]
    fn open_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path().join("settings.json"));

        assert_eq!(store.load("anything"), LoadResult::NotFound);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn open_invalid_json_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not valid json {{{").unwrap();

        let store = FileStore::open(&path);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn open_incompatible_version_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"version": 999, "values": {"A": 1}}"#).unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.load("A"), LoadResult::NotFound);
    }

    #[test]
    fn non_scalar_value_loads_as_corrupted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{"version": 1, "values": {"A": [1, 2], "B": null, "C": 3}}"#,
        )
        .unwrap();

        let store = FileStore::open(&path);
        assert!(matches!(store.load("A"), LoadResult::Corrupted { .. }));
        assert!(matches!(store.load("B"), LoadResult::Corrupted { .. }));
        assert_eq!(store.load("C"), LoadResult::Loaded(StoreValue::Int(3)));
    }

    #[test]
    fn save_and_reopen_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileStore::open(&path);
        store.save("Enabled", StoreValue::Bool(false)).unwrap();
        store.save("Opacity", StoreValue::Float(0.5)).unwrap();
        store.save("Size", StoreValue::Int(12)).unwrap();
        store.save("Mode", StoreValue::Str("Compact".into())).unwrap();

        assert!(path.exists());

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.load("Enabled"), LoadResult::Loaded(StoreValue::Bool(false)));
        assert_eq!(reopened.load("Opacity"), LoadResult::Loaded(StoreValue::Float(0.5)));
        assert_eq!(reopened.load("Size"), LoadResult::Loaded(StoreValue::Int(12)));
        assert_eq!(
            reopened.load("Mode"),
            LoadResult::Loaded(StoreValue::Str("Compact".into()))
        );
    }

    #[test]
    fn whole_float_stays_float_after_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        FileStore::open(&path)
            .save("Scale", StoreValue::Float(100.0))
            .unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.load("Scale"), LoadResult::Loaded(StoreValue::Float(100.0)));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("deep").join("settings.json");

        let store = FileStore::open(&path);
        store.save("A", StoreValue::Int(1)).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        FileStore::open(&path).save("A", StoreValue::Int(1)).unwrap();

        assert!(!dir.path().join("settings.json.tmp").exists());
    }

    #[test]
    fn save_overwrites_corrupted_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = FileStore::open(&path);
        store.save("A", StoreValue::Int(1)).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.load("A"), LoadResult::Loaded(StoreValue::Int(1)));
    }

    #[test]
    fn refresh_picks_up_external_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");

        let store = FileStore::open(&path);
        store.save("A", StoreValue::Int(1)).unwrap();

        let other = FileStore::open(&path);
        other.save("A", StoreValue::Int(2)).unwrap();

        assert_eq!(store.load("A"), LoadResult::Loaded(StoreValue::Int(1)));
        store.refresh();
        assert_eq!(store.load("A"), LoadResult::Loaded(StoreValue::Int(2)));
    }

    #[test]
    fn path_returns_configured_path() {
        let store = FileStore::open("/tmp/some/settings.json");
        assert_eq!(store.path(), std::path::Path::new("/tmp/some/settings.json"));
    }
}

mod mock_store {
    use super::*;

    #[test]
    fn failed_write_is_reported_and_not_recorded() {
        let store = MockStore::new();
        store.fail_writes_to("A");

        assert!(store.save("A", StoreValue::Int(1)).is_err());
        assert!(store.writes().is_empty());
        assert_eq!(store.value("A"), None);
    }

    #[test]
    fn write_clears_corruption() {
        let store = MockStore::new();
        store.corrupt("A", "bad");
        store.save("A", StoreValue::Int(1)).unwrap();

        assert_eq!(store.load("A"), LoadResult::Loaded(StoreValue::Int(1)));
    }
}
