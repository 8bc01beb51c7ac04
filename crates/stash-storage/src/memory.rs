//! Volatile in-process driver
//!
//! Contents live as long as the driver; nothing survives a restart.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::driver::StorageDriver;
use crate::Result;

#[derive(Default)]
pub struct MemoryDriver {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

impl StorageDriver for MemoryDriver {
    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.read().get(key).cloned())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.write().remove(key);
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

impl Clone for MemoryDriver {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}
