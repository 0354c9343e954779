use std::{collections::HashMap, path::PathBuf, sync::Arc};

use tokio::{fs, sync::RwLock};
use uuid::Uuid;

use crate::errors::ServiceError;

/// JSON file-backed map keyed by record id.
///
/// Holds the working set in memory and writes the whole map back after every
/// mutation. Suited to small record collections where a database would be
/// overkill; consistency across processes is not attempted.
#[derive(Clone)]
pub struct JsonFileStore<V> {
    inner: Arc<RwLock<HashMap<Uuid, V>>>,
    file_path: PathBuf,
}

impl<V> JsonFileStore<V>
where
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Open the store, creating an empty file if none exists. A file that
    /// exists but does not parse is an error rather than a silent reset.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).await.ok();
        }

        let map: HashMap<Uuid, V> = match fs::read(&file_path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| ServiceError::Storage(format!("corrupt store file: {e}")))?,
            Err(_) => {
                let empty: HashMap<Uuid, V> = HashMap::new();
                let data = serde_json::to_vec(&empty)
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                fs::write(&file_path, data)
                    .await
                    .map_err(|e| ServiceError::Storage(e.to_string()))?;
                empty
            }
        };

        Ok(Self { inner: Arc::new(RwLock::new(map)), file_path })
    }

    async fn persist(&self) -> Result<(), ServiceError> {
        let map = self.inner.read().await;
        let data = serde_json::to_vec(&*map).map_err(|e| ServiceError::Storage(e.to_string()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(())
    }

    /// All values, in map order. Callers impose their own ordering.
    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    pub async fn read(&self, id: &Uuid) -> Option<V> {
        let map = self.inner.read().await;
        map.get(id).cloned()
    }

    /// Insert or replace a value and write through to disk.
    pub async fn put(&self, id: Uuid, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.insert(id, value);
        drop(map);
        self.persist().await
    }

    /// Remove a value and write through; returns the removed value.
    pub async fn take(&self, id: &Uuid) -> Result<Option<V>, ServiceError> {
        let mut map = self.inner.write().await;
        let removed = map.remove(id);
        drop(map);
        self.persist().await?;
        Ok(removed)
    }
}
