//! Storage Client
//!
//! Every logical key is stored under `"<prefix>:<key>"` as a JSON envelope.
//! Expiration is enforced when an entry is read; there is no background sweep.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use stash_storage::{DriverSelection, SharedDriver};

use crate::clock::{Clock, SystemClock};
use crate::config::StashConfig;
use crate::duration::calculate_expiration_timestamp;
use crate::envelope::Envelope;
use crate::error::ClientError;
use crate::options::{ExecuteOptions, SetOptions};
use crate::Result;

#[derive(Clone)]
pub struct StorageClient {
    /// Namespace, fixed at construction
    prefix: String,
    driver: SharedDriver,
    clock: Arc<dyn Clock>,
}

impl StorageClient {
    pub fn new(prefix: impl Into<String>, driver: SharedDriver) -> Result<Self> {
        let prefix = prefix.into();
        if prefix.trim().is_empty() {
            return Err(ClientError::EmptyPrefix);
        }

        Ok(Self {
            prefix,
            driver,
            clock: Arc::new(SystemClock),
        })
    }

    /// Build a client from configuration, falling back to in-memory storage
    /// when the persistent backend cannot be used.
    pub fn open(config: &StashConfig) -> Result<Self> {
        if config.prefix.trim().is_empty() {
            return Err(ClientError::EmptyPrefix);
        }

        let selection = match &config.database_path {
            #[cfg(not(target_arch = "wasm32"))]
            Some(path) => DriverSelection::sqlite_or_volatile(path),
            #[cfg(target_arch = "wasm32")]
            Some(_) => DriverSelection::local_storage_or_volatile(),
            None => DriverSelection::volatile(),
        };

        tracing::info!(
            prefix = %config.prefix,
            mode = %selection.mode(),
            backend = selection.driver().backend_name(),
            "Opened storage client"
        );

        Self::new(config.prefix.clone(), selection.into_driver())
    }

    /// Replace the time source used for expiration
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn prefix_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }

    pub fn set<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
        options: &SetOptions,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value, options)
    }

    pub fn set_value(&self, key: &str, value: Value, options: &SetOptions) -> Result<()> {
        // Reject bad durations before touching storage
        let expires_at = options
            .expires_in
            .as_deref()
            .map(|duration| calculate_expiration_timestamp(duration, self.clock.now_millis()))
            .transpose()?;

        let envelope = if options.merge {
            let existing = self.read_envelope(key)?;
            let previous_expiry = existing.as_ref().and_then(|e| e.expires_at);
            let base = existing.and_then(Envelope::into_data);

            Envelope {
                data: merge_shallow(base, value),
                expires_at: expires_at.or(previous_expiry),
            }
        } else {
            Envelope {
                data: value,
                expires_at,
            }
        };

        self.driver.set_item(&self.prefix_key(key), &envelope.encode()?)?;

        tracing::debug!(
            prefix = %self.prefix,
            key = %key,
            merge = options.merge,
            expires_at = ?envelope.expires_at,
            "Stored item"
        );

        Ok(())
    }

    /// Shallow-merge `obj` into the mapping stored under `key`
    pub fn merge<T: Serialize + ?Sized>(&self, key: &str, obj: &T) -> Result<()> {
        self.set(key, obj, &SetOptions::new().merge(true))
    }

    /// Stored value decoded as `T`. Entries that do not decode as `T` read as `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(value) = self.get_value(key)? else {
            return Ok(None);
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Ok(Some(decoded)),
            Err(e) => {
                tracing::debug!(
                    prefix = %self.prefix,
                    key = %key,
                    error = %e,
                    "Stored data has unexpected shape"
                );
                Ok(None)
            }
        }
    }

    pub fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.read_envelope(key)?.and_then(Envelope::into_data))
    }

    pub fn erase(&self, key: &str) -> Result<()> {
        self.driver.remove_item(&self.prefix_key(key))?;
        Ok(())
    }

    /// Run `callback` on the value under `key` if it is truthy.
    /// Returns whether the callback ran.
    pub fn execute_on_key<F>(
        &self,
        key: &str,
        callback: F,
        options: &ExecuteOptions,
    ) -> Result<bool>
    where
        F: FnOnce(Value),
    {
        let ran = match self.get_value(key)? {
            Some(value) if is_truthy(&value) => {
                callback(value);
                true
            }
            _ => false,
        };

        if options.erase {
            self.erase(key)?;
        }

        Ok(ran)
    }

    /// Whether the driver holds a non-empty entry, ignoring expiration
    pub fn key_exists(&self, key: &str) -> Result<bool> {
        Ok(self
            .driver
            .get_item(&self.prefix_key(key))?
            .is_some_and(|raw| !raw.is_empty()))
    }

    pub fn is_expired(&self, envelope: Option<&Envelope>) -> bool {
        envelope.is_some_and(|e| e.is_expired_at(self.clock.now_millis()))
    }

    /// Live envelope under `key`. Expired entries are erased; undecodable
    /// ones read as absent.
    fn read_envelope(&self, key: &str) -> Result<Option<Envelope>> {
        let Some(raw) = self.driver.get_item(&self.prefix_key(key))? else {
            return Ok(None);
        };

        let envelope = match Envelope::decode(&raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(
                    prefix = %self.prefix,
                    key = %key,
                    error = %e,
                    "Ignoring undecodable item"
                );
                return Ok(None);
            }
        };

        if self.is_expired(Some(&envelope)) {
            tracing::debug!(prefix = %self.prefix, key = %key, "Evicting expired item");
            self.erase(key)?;
            return Ok(None);
        }

        Ok(Some(envelope))
    }
}

impl std::fmt::Debug for StorageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageClient")
            .field("prefix", &self.prefix)
            .field("backend", &self.driver.backend_name())
            .finish()
    }
}

/// Fields of `patch` over `base` when both are objects; otherwise `patch`.
fn merge_shallow(base: Option<Value>, patch: Value) -> Value {
    match (base, patch) {
        (Some(Value::Object(mut base)), Value::Object(patch)) => {
            base.extend(patch);
            Value::Object(base)
        }
        (_, patch) => patch,
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
