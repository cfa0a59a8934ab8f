use crate::errors::TrackerError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::{BTreeMap, HashMap},
    env, fs, io,
    path::{Path, PathBuf},
};
use tracing::{error, warn};

pub const SESSION_KEY: &str = "activeUser";
pub const USERS_KEY: &str = "users";

pub fn tasks_key(username: &str) -> String {
    format!("tasks_{username}")
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<(), TrackerError>;
    fn remove(&mut self, key: &str) -> Result<(), TrackerError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), TrackerError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store kept in a single JSON object on disk, rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = read_entries(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `next` to disk and adopts it only once the write succeeded.
    fn commit(&mut self, next: BTreeMap<String, String>) -> Result<(), TrackerError> {
        let payload = serde_json::to_vec_pretty(&next).map_err(TrackerError::storage)?;
        fs::write(&self.path, payload).map_err(TrackerError::storage)?;
        self.entries = next;
        Ok(())
    }
}

fn read_entries(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path) {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(entries) => entries,
            Err(err) => {
                error!("failed to parse store file {}: {err}", path.display());
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read store file {}: {err}", path.display());
            BTreeMap::new()
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), TrackerError> {
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value);
        self.commit(next)
    }

    fn remove(&mut self, key: &str) -> Result<(), TrackerError> {
        if !self.entries.contains_key(key) {
            return Ok(());
        }
        let mut next = self.entries.clone();
        next.remove(key);
        self.commit(next)
    }
}

pub fn resolve_data_path() -> PathBuf {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return PathBuf::from(path);
    }

    PathBuf::from("data/store.json")
}

/// Reads a JSON record, falling back to the default when absent or corrupt.
pub fn load_record<S, T>(store: &S, key: &str) -> T
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned + Default,
{
    let Some(raw) = store.get(key) else {
        return T::default();
    };
    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            warn!("discarding corrupt record under {key}: {err}");
            T::default()
        }
    }
}

pub fn save_record<S, T>(store: &mut S, key: &str, value: &T) -> Result<(), TrackerError>
where
    S: KeyValueStore + ?Sized,
    T: Serialize,
{
    let payload = serde_json::to_string(value).map_err(TrackerError::storage)?;
    store.set(key, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_get_set_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k"), None);
        store.set("k", "v".to_string()).unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = FileStore::open(&path);
        store.set(USERS_KEY, "{}".to_string()).unwrap();
        store.set(SESSION_KEY, "alice".to_string()).unwrap();
        store.remove(SESSION_KEY).unwrap();

        let reopened = FileStore::open(&path);
        assert_eq!(reopened.get(USERS_KEY).as_deref(), Some("{}"));
        assert_eq!(reopened.get(SESSION_KEY), None);
    }

    #[test]
    fn failed_write_keeps_previous_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut store = FileStore::open(&path);
        store.set(SESSION_KEY, "alice".to_string()).unwrap();

        store.path = dir.path().join("missing_dir").join("store.json");
        assert!(matches!(
            store.set(SESSION_KEY, "bob".to_string()),
            Err(TrackerError::Storage(_))
        ));
        assert!(store.remove(SESSION_KEY).is_err());
        assert_eq!(store.get(SESSION_KEY).as_deref(), Some("alice"));
    }

    #[test]
    fn failed_write_does_not_leak_into_task_log() {
        use crate::tasks::UserLog;

        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("missing_dir").join("store.json"));
        let mut log = UserLog::load(&store, "alice");

        assert!(log.adjust_count(&mut store, "2024-06-10", 5).is_err());
        assert_eq!(log.day("2024-06-10").count, 0);
        assert_eq!(UserLog::load(&store, "alice").day("2024-06-10").count, 0);
    }

    #[test]
    fn corrupt_store_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, b"not json").unwrap();

        let store = FileStore::open(&path);
        assert_eq!(store.get(USERS_KEY), None);
    }

    #[test]
    fn corrupt_record_loads_default() {
        let mut store = MemoryStore::new();
        store.set("tasks_bob", "[broken".to_string()).unwrap();
        let loaded: BTreeMap<String, u64> = load_record(&store, "tasks_bob");
        assert!(loaded.is_empty());
    }

    #[test]
    fn tasks_key_embeds_username() {
        assert_eq!(tasks_key("alice"), "tasks_alice");
    }
}
