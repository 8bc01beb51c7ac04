//! Driver capability

use std::sync::Arc;

use crate::Result;

/// Synchronous string key-value storage.
///
/// Implementations use interior locking so a single driver can back any
/// number of clients.
pub trait StorageDriver: Send + Sync {
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Returns `None` when the key has no entry.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Short backend name for diagnostics
    fn backend_name(&self) -> &'static str;
}

pub type SharedDriver = Arc<dyn StorageDriver>;
