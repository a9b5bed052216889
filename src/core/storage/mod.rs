mod memory;
mod state;

use std::future::Future;

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::StorageError;

pub use memory::MemoryStorage;
pub use state::{ConnGuard, SqliteStorage};

/// Key holding the persisted auth session.
pub const AUTH_STORAGE_KEY: &str = "auth-storage";
/// Key holding the persisted dark-mode flag.
pub const THEME_STORAGE_KEY: &str = "theme-storage";

/// Durable string-keyed storage. Values are opaque strings (JSON in practice).
pub trait KeyValueStorage {
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>>;
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>>;
    fn delete(&self, key: &str) -> impl Future<Output = Result<(), StorageError>>;
}

/// Wrapper written around every persisted record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

pub async fn load_json<S, T>(storage: &S, key: &str) -> Result<Option<T>, StorageError>
where
    S: KeyValueStorage,
    T: DeserializeOwned,
{
    match storage.get(key).await? {
        Some(raw) => {
            let persisted: Persisted<T> = serde_json::from_str(&raw)?;
            Ok(Some(persisted.state))
        }
        None => Ok(None),
    }
}

pub async fn save_json<S, T>(storage: &S, key: &str, state: &T) -> Result<(), StorageError>
where
    S: KeyValueStorage,
    T: Serialize,
{
    let raw = serde_json::to_string(&Persisted { state, version: 0 })?;
    storage.set(key, &raw).await
}
