//! Persistent/volatile driver selection
//!
//! ```text
//! open persistent ──ok──> probe ──ok──> Persistent
//!        │                  │
//!        └──err──┬──────────┘
//!                ↓
//!            Volatile (MemoryDriver)
//! ```
//!
//! The decision is made once; a selection never changes state afterwards.

use std::sync::Arc;

use crate::driver::{SharedDriver, StorageDriver};
use crate::memory::MemoryDriver;
use crate::{Result, StorageError};

/// Written and removed to verify the backend accepts writes
const PROBE_KEY: &str = "__stash_probe__";
const PROBE_VALUE: &str = "probe";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverMode {
    /// Backed by durable storage
    Persistent,
    /// In-process map, lost on restart
    Volatile,
}

impl DriverMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverMode::Persistent => "persistent",
            DriverMode::Volatile => "volatile",
        }
    }
}

impl std::fmt::Display for DriverMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

pub struct DriverSelection {
    driver: SharedDriver,
    mode: DriverMode,
    fallback_reason: Option<String>,
}

impl DriverSelection {
    /// Try the persistent driver produced by `open`; fall back to memory on
    /// any open or probe failure.
    pub fn persistent_or_volatile<F, D>(open: F) -> Self
    where
        F: FnOnce() -> Result<D>,
        D: StorageDriver + 'static,
    {
        let attempt = open().and_then(|driver| {
            probe(&driver)?;
            Ok(driver)
        });

        match attempt {
            Ok(driver) => {
                tracing::info!(backend = driver.backend_name(), "Using persistent storage");
                Self {
                    driver: Arc::new(driver),
                    mode: DriverMode::Persistent,
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Persistent storage unavailable, falling back to in-memory storage"
                );
                Self {
                    driver: Arc::new(MemoryDriver::new()),
                    mode: DriverMode::Volatile,
                    fallback_reason: Some(e.to_string()),
                }
            }
        }
    }

    /// Explicitly volatile, no probing
    pub fn volatile() -> Self {
        Self {
            driver: Arc::new(MemoryDriver::new()),
            mode: DriverMode::Volatile,
            fallback_reason: None,
        }
    }

    /// SQLite file at `path`, or memory when it cannot be opened
    #[cfg(not(target_arch = "wasm32"))]
    pub fn sqlite_or_volatile<P: AsRef<std::path::Path>>(path: P) -> Self {
        Self::persistent_or_volatile(|| crate::SqliteDriver::open(path))
    }

    /// `window.localStorage`, or memory when the page denies access
    #[cfg(target_arch = "wasm32")]
    pub fn local_storage_or_volatile() -> Self {
        Self::persistent_or_volatile(crate::LocalStorageDriver::from_window)
    }

    pub fn driver(&self) -> SharedDriver {
        Arc::clone(&self.driver)
    }

    pub fn mode(&self) -> DriverMode {
        self.mode
    }

    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }

    /// Why the persistent driver was rejected, if it was
    pub fn fallback_reason(&self) -> Option<&str> {
        self.fallback_reason.as_deref()
    }

    pub fn into_driver(self) -> SharedDriver {
        self.driver
    }
}

fn probe(driver: &dyn StorageDriver) -> Result<()> {
    driver
        .set_item(PROBE_KEY, PROBE_VALUE)
        .map_err(|e| StorageError::Probe(e.to_string()))?;
    driver
        .remove_item(PROBE_KEY)
        .map_err(|e| StorageError::Probe(e.to_string()))?;
    Ok(())
}
