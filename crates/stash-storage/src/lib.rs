//! Stash Storage Layer
//!
//! Synchronous string key-value drivers.
//! The client layer owns namespacing and encoding; drivers only persist strings.

mod driver;
mod error;
mod fallback;
mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod database;
#[cfg(not(target_arch = "wasm32"))]
mod migrations;

#[cfg(target_arch = "wasm32")]
mod local;

pub use driver::{SharedDriver, StorageDriver};
pub use error::StorageError;
pub use fallback::{DriverMode, DriverSelection};
pub use memory::MemoryDriver;

#[cfg(not(target_arch = "wasm32"))]
pub use database::SqliteDriver;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageDriver;

pub type Result<T> = std::result::Result<T, StorageError>;
