//! Browser `localStorage` driver (wasm32 only)

use web_sys::Storage;

use crate::driver::StorageDriver;
use crate::{Result, StorageError};

/// Resolves `window.localStorage` per call rather than holding the JS
/// handle, which keeps the driver `Send + Sync`.
#[derive(Debug, Clone, Copy)]
pub struct LocalStorageDriver {
    _private: (),
}

impl LocalStorageDriver {
    pub fn from_window() -> Result<Self> {
        storage()?;
        Ok(Self { _private: () })
    }
}

fn storage() -> Result<Storage> {
    let window = web_sys::window()
        .ok_or_else(|| StorageError::Unavailable("no global window".to_string()))?;

    window
        .local_storage()
        .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))?
        .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))
}

impl StorageDriver for LocalStorageDriver {
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        storage()?
            .get_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Backend(format!("{:?}", e)))
    }

    fn backend_name(&self) -> &'static str {
        "localStorage"
    }
}
