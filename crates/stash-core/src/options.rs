//! Per-call option records

use serde::{Deserialize, Serialize};

/// Options for [`StorageClient::set`](crate::StorageClient::set)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptions {
    /// Shallow-merge into an existing mapping instead of replacing it.
    /// Default: `false`
    #[serde(default)]
    pub merge: bool,
    /// Lifetime such as `"2 minutes"`. Default: never expires
    #[serde(default)]
    pub expires_in: Option<String>,
}

impl SetOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    pub fn expires_in(mut self, duration: impl Into<String>) -> Self {
        self.expires_in = Some(duration.into());
        self
    }
}

/// Options for [`StorageClient::execute_on_key`](crate::StorageClient::execute_on_key)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteOptions {
    /// Erase the key after the read, whether or not the callback ran.
    /// Default: `false`
    #[serde(default)]
    pub erase: bool,
}

impl ExecuteOptions {
    pub fn erase() -> Self {
        Self { erase: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let set = SetOptions::default();
        assert!(!set.merge);
        assert_eq!(set.expires_in, None);

        assert!(!ExecuteOptions::default().erase);
    }

    #[test]
    fn test_deserialize_from_partial_json() {
        let options: SetOptions = serde_json::from_str(r#"{"expiresIn":"1 day"}"#).unwrap();
        assert_eq!(options, SetOptions::new().expires_in("1 day"));

        let options: ExecuteOptions = serde_json::from_str("{}").unwrap();
        assert!(!options.erase);
    }
}
