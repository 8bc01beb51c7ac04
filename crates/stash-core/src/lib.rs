//! Stash Core
//!
//! Namespaced key-value client over a synchronous storage driver.
//! Values are stored as JSON envelopes `{ data, expiresAt? }`; expired
//! entries are evicted lazily on read.

mod client;
mod clock;
mod config;
mod duration;
mod envelope;
mod error;
mod options;

pub use client::StorageClient;
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::StashConfig;
pub use duration::{calculate_expiration_timestamp, ExpiresIn, TimeUnit};
pub use envelope::Envelope;
pub use error::ClientError;
pub use options::{ExecuteOptions, SetOptions};

// Re-export the driver layer
pub use stash_storage::{
    DriverMode, DriverSelection, MemoryDriver, SharedDriver, StorageDriver, StorageError,
};

#[cfg(not(target_arch = "wasm32"))]
pub use stash_storage::SqliteDriver;

#[cfg(target_arch = "wasm32")]
pub use stash_storage::LocalStorageDriver;

pub type Result<T> = std::result::Result<T, ClientError>;

/// Install a `RUST_LOG`-filtered fmt subscriber for the client's `tracing`
/// events (default level `info`).
///
/// Only for binaries and tests that do not set up their own subscriber.
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging() -> bool {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_twice() {
        init_logging();
        // The second call finds the subscriber already installed
        assert!(!init_logging());

        let client = StorageClient::open(&StashConfig::volatile("logged")).unwrap();
        client.set("k", &1, &SetOptions::default()).unwrap();
        assert_eq!(client.get::<i32>("k").unwrap(), Some(1));
    }
}
