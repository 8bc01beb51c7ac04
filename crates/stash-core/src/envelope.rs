//! Persisted item wrapper

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `{ "data": ..., "expiresAt": <epoch ms> }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Missing or `null` means no data
    #[serde(default)]
    pub data: Value,
    /// Absent means the item never expires
    #[serde(rename = "expiresAt", default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl Envelope {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            expires_at: None,
        }
    }

    pub fn with_expiration(data: Value, expires_at: i64) -> Self {
        Self {
            data,
            expires_at: Some(expires_at),
        }
    }

    /// Expired once `now_millis` reaches `expires_at`
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now_millis)
    }

    pub fn encode(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn decode(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// The stored value, `None` for JSON null
    pub fn into_data(self) -> Option<Value> {
        match self.data {
            Value::Null => None,
            data => Some(data),
        }
    }
}
