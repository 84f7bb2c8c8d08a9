//! Key-value persistence
//!
//! The browser build stores everything in LocalStorage. Native runs and tests
//! use [`MemoryStorage`].

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub enum PersistError {
    /// No storage backend (private browsing, sandboxed iframe, ...)
    Unavailable,
    /// The backend rejected the operation
    Backend(String),
    Json(serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PersistError>;

impl std::error::Error for PersistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PersistError::Unavailable => write!(f, "storage is not available"),
            PersistError::Backend(msg) => write!(f, "storage error: {}", msg),
            PersistError::Json(err) => write!(f, "invalid stored JSON: {}", err),
        }
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(e: serde_json::Error) -> Self {
        PersistError::Json(e)
    }
}

/// String key-value store
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// `window.localStorage`
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    inner: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    /// Open LocalStorage for the current window
    pub fn open() -> Result<Self> {
        let inner = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistError::Unavailable)?;
        Ok(Self { inner })
    }
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: wasm_bindgen::JsValue) -> PersistError {
    PersistError::Backend(format!("{:?}", err))
}

#[cfg(target_arch = "wasm32")]
impl Storage for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.inner.set_item(key, value).map_err(js_error)
    }
}

/// Load a JSON value, returning `T::default()` if missing or invalid
pub fn load_json_or_default<T: Default + DeserializeOwned>(storage: &dyn Storage, key: &str) -> T {
    match storage.get(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable '{}': {}", key, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Could not read '{}': {}", key, e);
            T::default()
        }
    }
}

/// Save a value as JSON
pub fn save_json<T: Serialize>(storage: &mut dyn Storage, key: &str, data: &T) -> Result<()> {
    let json = serde_json::to_string(data)?;
    storage.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Sample {
        value: u32,
    }

    /// Backend that fails every call
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(PersistError::Unavailable)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
            Err(PersistError::Backend("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_memory_storage_set_get() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k").unwrap(), None);
        storage.set("k", "v").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("v"));
        storage.set("k", "w").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("w"));
    }

    #[test]
    fn test_json_helpers() {
        let mut storage = MemoryStorage::new();
        save_json(&mut storage, "sample", &Sample { value: 9 }).unwrap();
        let loaded: Sample = load_json_or_default(&storage, "sample");
        assert_eq!(loaded, Sample { value: 9 });
    }

    #[test]
    fn test_load_falls_back_on_garbage_and_errors() {
        let mut storage = MemoryStorage::new();
        storage.set("sample", "{not json").unwrap();
        let loaded: Sample = load_json_or_default(&storage, "sample");
        assert_eq!(loaded, Sample::default());

        let loaded: Sample = load_json_or_default(&BrokenStorage, "sample");
        assert_eq!(loaded, Sample::default());
    }

    #[test]
    fn test_save_surfaces_backend_error() {
        let err = save_json(&mut BrokenStorage, "sample", &Sample { value: 1 }).unwrap_err();
        assert!(matches!(err, PersistError::Backend(_)));
        assert_eq!(err.to_string(), "storage error: quota exceeded");
    }
}
