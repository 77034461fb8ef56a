//! Credential storage
//!
//! Credentials live in a persistent key-value store under two fixed keys,
//! `token` and `uuid`. The store is written only by the login and logout
//! flows; the route guard and the HTTP gateway read it through a shared
//! [`Session`].

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Persistent key-value store
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value
    fn set(&self, key: &str, value: &str) -> CoreResult<()>;

    /// Remove a value; removing a missing key is not an error
    fn remove(&self, key: &str) -> CoreResult<()>;
}

/// In-process store, lost on exit
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::io_error("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::io_error("memory store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Store backed by a JSON object on disk
///
/// The whole map is rewritten on every mutation. A missing file opens as an
/// empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`
    pub fn open(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                HashMap::new()
            } else {
                serde_json::from_str(&raw)?
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened credential store");

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &HashMap<String, String>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serialized)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::io_error("file store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| CoreError::io_error("file store lock poisoned"))?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

/// Token and session id identifying an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub uuid: String,
}

/// Shared view of the credential store
///
/// Cloning is cheap; all clones see the same store.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
}

impl Session {
    /// Storage key for the bearer token
    pub const TOKEN_KEY: &'static str = "token";

    /// Storage key for the session id
    pub const UUID_KEY: &'static str = "uuid";

    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Session over a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Stored token; empty values read as absent
    pub fn token(&self) -> Option<String> {
        self.read(Self::TOKEN_KEY)
    }

    /// Stored session id; empty values read as absent
    pub fn uuid(&self) -> Option<String> {
        self.read(Self::UUID_KEY)
    }

    /// Both halves of the credential, if both are present
    pub fn credential(&self) -> Option<Credential> {
        Some(Credential {
            token: self.token()?,
            uuid: self.uuid()?,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persist a credential (login)
    pub fn store_credential(&self, credential: &Credential) -> CoreResult<()> {
        self.store.set(Self::TOKEN_KEY, &credential.token)?;
        self.store.set(Self::UUID_KEY, &credential.uuid)?;
        tracing::debug!("Stored session credential");
        Ok(())
    }

    /// Forget the credential (logout)
    pub fn clear(&self) -> CoreResult<()> {
        self.store.remove(Self::TOKEN_KEY)?;
        self.store.remove(Self::UUID_KEY)?;
        tracing::debug!("Cleared session credential");
        Ok(())
    }

    fn read(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::eq;

    fn credential() -> Credential {
        Credential {
            token: "abc123".to_string(),
            uuid: "u-42".to_string(),
        }
    }

    #[test]
    fn test_empty_values_read_as_absent() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_get()
            .with(eq(Session::TOKEN_KEY))
            .return_const(Some(String::new()));

        let session = Session::new(Arc::new(store));
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_store_and_clear_round_trip() {
        let session = Session::in_memory();
        assert!(session.credential().is_none());

        session.store_credential(&credential()).unwrap();
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(session.uuid().as_deref(), Some("u-42"));
        assert_eq!(session.credential(), Some(credential()));

        session.clear().unwrap();
        assert!(session.token().is_none());
        assert!(session.uuid().is_none());
    }

    #[test]
    fn test_clones_share_store() {
        let session = Session::in_memory();
        let other = session.clone();
        session.store_credential(&credential()).unwrap();
        assert!(other.is_authenticated());
    }

    #[test]
    fn test_store_failure_propagates() {
        let mut store = MockKeyValueStore::new();
        store
            .expect_set()
            .returning(|_, _| Err(CoreError::io_error("disk full")));

        let session = Session::new(Arc::new(store));
        let err = session.store_credential(&credential()).unwrap_err();
        assert!(matches!(err, CoreError::Io { .. }));
    }

    #[test]
    fn test_file_store_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("session.json");

        {
            let store = FileStore::open(&path).unwrap();
            store.set("token", "abc123").unwrap();
            store.set("uuid", "u-42").unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("token").as_deref(), Some("abc123"));

        reopened.remove("token").unwrap();
        let again = FileStore::open(&path).unwrap();
        assert!(again.get("token").is_none());
        assert_eq!(again.get("uuid").as_deref(), Some("u-42"));
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path().join("absent.json")).unwrap();
        assert!(store.get("token").is_none());
        store.remove("token").unwrap();
    }

    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            FileStore::open(&path),
            Err(CoreError::Serialization { .. })
        ));
    }
}
