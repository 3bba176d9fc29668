//! # Client identity
//!
//! A random client key, persisted locally, ties a browser-like client to the orders it
//! placed. It is a correlation tag: anyone who knows a key can list its orders.

pub mod storage;

pub use storage::*;

use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument};

/// Storage key the client key lives under.
pub const CLIENT_KEY_ITEM: &str = "client_key";

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("could not access client state at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("client state at {} is corrupt: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `ck_<base36 random>_<unix millis>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientKey(String);

impl ClientKey {
    pub fn generate() -> Self {
        let random = to_base36(uuid::Uuid::new_v4().as_u128());
        let millis = chrono::Utc::now().timestamp_millis();
        ClientKey(format!("ck_{random}_{millis}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl Display for ClientKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Reads or creates the persisted client key.
#[derive(Clone)]
pub struct ClientKeyStore {
    storage: Arc<dyn LocalStorage>,
}

impl ClientKeyStore {
    pub fn new(storage: Arc<dyn LocalStorage>) -> Self {
        Self { storage }
    }

    /// The stored key, unchanged, or a freshly generated one that is persisted first.
    /// An empty stored value counts as missing.
    #[instrument(skip(self))]
    pub fn get_or_create_client_key(&self) -> Result<ClientKey, IdentityError> {
        if let Some(existing) = self.storage.get_item(CLIENT_KEY_ITEM)? {
            if !existing.is_empty() {
                debug!("Using stored client key");
                return Ok(ClientKey(existing));
            }
        }
        let key = ClientKey::generate();
        self.storage.set_item(CLIENT_KEY_ITEM, key.as_str())?;
        info!(client_key = %key, "Generated new client key");
        Ok(key)
    }

    /// The stored key without creating one.
    pub fn current(&self) -> Result<Option<ClientKey>, IdentityError> {
        Ok(self
            .storage
            .get_item(CLIENT_KEY_ITEM)?
            .filter(|k| !k.is_empty())
            .map(ClientKey))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base36_encodes() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u128::MAX).len(), 25);
    }

    #[test]
    fn generated_key_has_expected_shape() {
        let key = ClientKey::generate();
        let parts: Vec<&str> = key.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "ck");
        assert!(!parts[1].is_empty());
        assert!(parts[1].bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
        assert!(parts[2].parse::<i64>().unwrap() > 0);
    }

    #[test]
    fn key_is_created_once_and_reused() {
        let storage = Arc::new(MemoryStorage::new());
        let store = ClientKeyStore::new(storage.clone());
        assert_eq!(store.current().unwrap(), None);

        let first = store.get_or_create_client_key().unwrap();
        let second = store.get_or_create_client_key().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            storage.get_item(CLIENT_KEY_ITEM).unwrap().as_deref(),
            Some(first.as_str())
        );
    }

    #[test]
    fn stored_key_is_returned_unchanged() {
        let store = ClientKeyStore::new(Arc::new(MemoryStorage::with_item(
            CLIENT_KEY_ITEM,
            "hand-written-key",
        )));
        assert_eq!(
            store.get_or_create_client_key().unwrap().as_str(),
            "hand-written-key"
        );
    }

    #[test]
    fn empty_stored_key_is_replaced() {
        let store = ClientKeyStore::new(Arc::new(MemoryStorage::with_item(CLIENT_KEY_ITEM, "")));
        let key = store.get_or_create_client_key().unwrap();
        assert!(key.as_str().starts_with("ck_"));
    }

    #[test]
    fn key_survives_a_restart_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("client_state.json");

        let first = ClientKeyStore::new(Arc::new(FileStorage::new(&path)))
            .get_or_create_client_key()
            .unwrap();
        let second = ClientKeyStore::new(Arc::new(FileStorage::new(&path)))
            .get_or_create_client_key()
            .unwrap();
        assert_eq!(first, second);
    }
}
