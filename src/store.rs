//! Persisted view preferences.
//!
//! Preferences live in a string key-value store. Storage is best effort:
//! a missing, unreadable or corrupt entry reads as "nothing saved", and a
//! failed write is logged and otherwise ignored.

use crate::error::StoreError;
use ahash::AHashMap;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

/// A string key-value store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        tracing::warn!("Store lock poisoned, continuing with last written state");
        poisoned.into_inner()
    })
}

/// Process-local store; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<AHashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store backed by a single JSON object on disk, rewritten on every `set`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match read_entries(&path) {
            Ok(entries) => entries,
            Err(StoreError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                tracing::warn!("Ignoring unreadable state file {}: {}", path.display(), e);
                Map::new()
            }
        };
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_entries(path: &Path) -> Result<Map<String, Value>, StoreError> {
    let text = std::fs::read_to_string(path)?;
    match serde_json::from_str(&text)? {
        Value::Object(entries) => Ok(entries),
        _ => Ok(Map::new()),
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries)
            .get(key)
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), Value::String(value.to_string()));

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&*entries)?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Navigation preferences stored under `<prefix>:openFolders` and
/// `<prefix>:navCollapsed`.
#[derive(Clone)]
pub struct ViewPrefs {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl std::fmt::Debug for ViewPrefs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewPrefs")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl ViewPrefs {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    fn key(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    /// Folder keys saved as open; empty when nothing valid is stored.
    pub fn open_folders(&self) -> BTreeSet<String> {
        let Some(raw) = self.store.get(&self.key("openFolders")) else {
            return BTreeSet::new();
        };
        match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(values) => values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    Value::Number(_) | Value::Bool(_) | Value::Null => Some(v.to_string()),
                    Value::Array(_) | Value::Object(_) => None,
                })
                .collect(),
            Err(e) => {
                tracing::debug!("Ignoring malformed open folder list: {}", e);
                BTreeSet::new()
            }
        }
    }

    pub fn save_open_folders(&self, folders: &BTreeSet<String>) {
        let result = serde_json::to_string(folders)
            .map_err(StoreError::from)
            .and_then(|json| self.store.set(&self.key("openFolders"), &json));
        if let Err(e) = result {
            tracing::warn!("Failed to save open folders: {}", e);
        }
    }

    /// Whether navigation was saved as collapsed; anything but `"1"` is false.
    pub fn nav_collapsed(&self) -> bool {
        self.store
            .get(&self.key("navCollapsed"))
            .is_some_and(|v| v == "1")
    }

    pub fn save_nav_collapsed(&self, collapsed: bool) {
        let value = if collapsed { "1" } else { "0" };
        if let Err(e) = self.store.set(&self.key("navCollapsed"), value) {
            tracing::warn!("Failed to save navigation state: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    /// Store whose every operation fails.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("storage unavailable")))
        }
    }

    fn prefs(store: Arc<dyn KeyValueStore>) -> ViewPrefs {
        ViewPrefs::new(store, "doc_engine")
    }

    #[test]
    fn test_round_trip_through_memory() {
        let store = Arc::new(MemoryStore::new());
        let prefs = prefs(store.clone());
        let folders: BTreeSet<String> = ["guides".to_string(), "guides/advanced".to_string()].into();

        prefs.save_open_folders(&folders);
        prefs.save_nav_collapsed(true);

        check!(prefs.open_folders() == folders);
        check!(prefs.nav_collapsed());
        check!(store.get("doc_engine:openFolders").as_deref() == Some(r#"["guides","guides/advanced"]"#));
        check!(store.get("doc_engine:navCollapsed").as_deref() == Some("1"));
    }

    #[rstest]
    #[case("not json")]
    #[case(r#"{"a": 1}"#)]
    #[case("42")]
    fn test_malformed_folders_read_as_empty(#[case] raw: &str) {
        let store = Arc::new(MemoryStore::new());
        store.set("doc_engine:openFolders", raw).unwrap();
        check!(prefs(store).open_folders().is_empty());
    }

    #[test]
    fn test_scalar_folder_entries_become_keys() {
        let store = Arc::new(MemoryStore::new());
        store
            .set("doc_engine:openFolders", r#"["guides", 2024, true, [1], {"k": 1}]"#)
            .unwrap();

        let expected: BTreeSet<String> =
            ["2024".to_string(), "guides".to_string(), "true".to_string()].into();
        check!(prefs(store).open_folders() == expected);
    }

    #[rstest]
    #[case("0", false)]
    #[case("1", true)]
    #[case("true", false)]
    fn test_nav_collapsed_values(#[case] raw: &str, #[case] expected: bool) {
        let store = Arc::new(MemoryStore::new());
        store.set("doc_engine:navCollapsed", raw).unwrap();
        check!(prefs(store).nav_collapsed() == expected);
    }

    #[test]
    fn test_write_failures_are_swallowed() {
        let prefs = prefs(Arc::new(BrokenStore));
        prefs.save_open_folders(&BTreeSet::from(["x".to_string()]));
        prefs.save_nav_collapsed(true);

        check!(prefs.open_folders().is_empty());
        check!(!prefs.nav_collapsed());
    }

    #[test]
    fn test_json_file_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let store = JsonFileStore::open(&path);
        check!(store.get("k").is_none());
        store.set("k", "v").unwrap();

        let reopened = JsonFileStore::open(&path);
        check!(reopened.get("k").as_deref() == Some("v"));
    }

    #[test]
    fn test_json_file_store_ignores_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ broken").unwrap();

        let store = JsonFileStore::open(&path);
        check!(store.get("k").is_none());
        store.set("k", "v").unwrap();
        check!(JsonFileStore::open(&path).get("k").as_deref() == Some("v"));
    }
}
