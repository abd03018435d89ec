use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Local storage is not available")]
    Unavailable,
    #[error("Storage access failed: {0}")]
    Access(String),
    #[error("Invalid stored value: {0}")]
    Format(#[from] serde_json::Error),
}

/// Minimal string key/value store. Local storage in the browser, an
/// in-memory map in tests.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Reads `key` and decodes it as JSON.
///
/// Any failure (missing entry, unavailable storage, malformed JSON) yields
/// `None`; errors other than a missing entry are logged.
pub fn load_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read '{}' from storage: {}", key, e);
            return None;
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring corrupt value stored under '{}': {}", key, StorageError::from(e));
            None
        }
    }
}

/// Encodes `value` as JSON and writes it under `key`. Fire and forget:
/// failures are logged, never returned.
pub fn save_json<T, S>(store: &S, key: &str, value: &T)
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let result = serde_json::to_string(value)
        .map_err(StorageError::from)
        .and_then(|encoded| store.set_item(key, &encoded));
    if let Err(e) = result {
        log::warn!("Failed to persist '{}': {}", key, e);
    }
}

/// `window.localStorage`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|e| StorageError::Access(format!("{:?}", e)))?
            .ok_or(StorageError::Unavailable)
    }
}

impl KeyValueStore for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Access(format!("{:?}", e)))
    }
}

#[cfg(test)]
pub use memory::MemoryStorage;

#[cfg(test)]
mod memory {
    use super::{KeyValueStore, StorageError};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    /// Shared in-memory store. Clones see the same entries, so a clone
    /// handed to a fresh controller behaves like a page reload.
    #[derive(Clone, Default)]
    pub struct MemoryStorage {
        entries: Rc<RefCell<HashMap<String, String>>>,
        read_only: bool,
    }

    impl MemoryStorage {
        pub fn new() -> Self {
            Self::default()
        }

        /// A store whose writes always fail.
        pub fn read_only() -> Self {
            Self { read_only: true, ..Self::default() }
        }

        pub fn raw(&self, key: &str) -> Option<String> {
            self.entries.borrow().get(key).cloned()
        }

        pub fn put_raw(&self, key: &str, value: &str) {
            self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        }
    }

    impl KeyValueStore for MemoryStorage {
        fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.raw(key))
        }

        fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
            if self.read_only {
                return Err(StorageError::Access("quota exceeded".to_string()));
            }
            self.put_raw(key, value);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_loads_as_none() {
        let store = MemoryStorage::new();
        assert_eq!(load_json::<Vec<String>, _>(&store, "absent"), None);
    }

    #[test]
    fn malformed_json_loads_as_none() {
        let store = MemoryStorage::new();
        store.put_raw("tags", "[\"React\",");
        assert_eq!(load_json::<Vec<String>, _>(&store, "tags"), None);
    }

    #[test]
    fn wrong_shape_loads_as_none() {
        let store = MemoryStorage::new();
        store.put_raw("tags", "{\"React\": true}");
        assert_eq!(load_json::<Vec<String>, _>(&store, "tags"), None);
    }

    #[test]
    fn saved_value_reads_back() {
        let store = MemoryStorage::new();
        save_json(&store, "tags", &vec!["Go".to_string(), "Rust".to_string()]);
        assert_eq!(store.raw("tags").as_deref(), Some("[\"Go\",\"Rust\"]"));
        assert_eq!(
            load_json::<Vec<String>, _>(&store, "tags"),
            Some(vec!["Go".to_string(), "Rust".to_string()])
        );
    }

    #[test]
    fn failed_write_is_swallowed() {
        let store = MemoryStorage::read_only();
        save_json(&store, "tags", &vec!["Go".to_string()]);
        assert_eq!(store.raw("tags"), None);
    }
}
