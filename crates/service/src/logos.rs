use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use configs::StorageConfig;
use models::logo::{Logo, LogoInput};
use models::user::UserProfile;

use crate::errors::ServiceError;
use crate::page_token;
use crate::storage::json_file_store::JsonFileStore;

/// One page of a listing plus the cursor for the next one, if any.
#[derive(Clone, Debug, PartialEq)]
pub struct LogoPage {
    pub logos: Vec<Logo>,
    pub next_page_token: Option<String>,
}

/// Storage contract consumed by the route handlers.
///
/// The implementation is picked once at process start by [`from_config`] and
/// injected as `Arc<dyn LogoStore>`; handlers never resolve a backend per
/// request. Every operation is all-or-nothing.
#[async_trait]
pub trait LogoStore: Send + Sync {
    /// Up to `limit` records plus a cursor when more remain.
    async fn list(&self, limit: usize, page_token: Option<&str>) -> Result<LogoPage, ServiceError>;

    /// Same as [`list`](Self::list) but scoped to records created by `owner_id`.
    async fn list_by(
        &self,
        owner_id: &str,
        limit: usize,
        page_token: Option<&str>,
    ) -> Result<LogoPage, ServiceError>;

    async fn read(&self, id: Uuid) -> Result<Logo, ServiceError>;

    /// Persist a new record; the backend assigns the id.
    async fn create(
        &self,
        input: LogoInput,
        creator: Option<&UserProfile>,
    ) -> Result<Logo, ServiceError>;

    /// Full replace of the mutable fields.
    async fn update(&self, id: Uuid, input: LogoInput) -> Result<Logo, ServiceError>;

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;
}

/// Resolve the backend named by configuration. Unknown keys abort startup
/// instead of failing on first use.
pub async fn from_config(cfg: &StorageConfig) -> Result<Arc<dyn LogoStore>, ServiceError> {
    let store: Arc<dyn LogoStore> = match cfg.backend.as_str() {
        "memory" => Arc::new(MemoryLogoStore::new()),
        "json" => Arc::new(JsonLogoStore::open(&cfg.data_path).await?),
        other => {
            return Err(ServiceError::Validation(format!(
                "unknown storage backend '{other}' (expected 'memory' or 'json')"
            )))
        }
    };
    info!(backend = %cfg.backend, "logo store initialized");
    Ok(store)
}

/// Order by creation time (ties broken by id) and cut the requested page.
fn page_of(
    mut logos: Vec<Logo>,
    limit: usize,
    token: Option<&str>,
) -> Result<LogoPage, ServiceError> {
    let offset = page_token::decode(token)?;
    logos.sort_by(|a, b| (a.created_at, a.id).cmp(&(b.created_at, b.id)));
    let has_more = logos.len() > offset.saturating_add(limit);
    let page: Vec<Logo> = logos.into_iter().skip(offset).take(limit).collect();
    let next_page_token = has_more.then(|| page_token::encode(offset + limit));
    Ok(LogoPage { logos: page, next_page_token })
}

fn owned_by(logos: Vec<Logo>, owner_id: &str) -> Vec<Logo> {
    logos
        .into_iter()
        .filter(|l| l.created_by_id.as_deref() == Some(owner_id))
        .collect()
}

/// In-memory backend for tests and development.
pub struct MemoryLogoStore {
    inner: RwLock<HashMap<Uuid, Logo>>,
}

impl MemoryLogoStore {
    pub fn new() -> Self {
        Self { inner: RwLock::new(HashMap::new()) }
    }
}

impl Default for MemoryLogoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LogoStore for MemoryLogoStore {
    async fn list(&self, limit: usize, page_token: Option<&str>) -> Result<LogoPage, ServiceError> {
        let map = self.inner.read().await;
        page_of(map.values().cloned().collect(), limit, page_token)
    }

    async fn list_by(
        &self,
        owner_id: &str,
        limit: usize,
        page_token: Option<&str>,
    ) -> Result<LogoPage, ServiceError> {
        let map = self.inner.read().await;
        page_of(owned_by(map.values().cloned().collect(), owner_id), limit, page_token)
    }

    async fn read(&self, id: Uuid) -> Result<Logo, ServiceError> {
        let map = self.inner.read().await;
        map.get(&id).cloned().ok_or_else(|| ServiceError::not_found("logo"))
    }

    async fn create(
        &self,
        input: LogoInput,
        creator: Option<&UserProfile>,
    ) -> Result<Logo, ServiceError> {
        input.validate()?;
        let logo = Logo::from_input(input, creator);
        let mut map = self.inner.write().await;
        map.insert(logo.id, logo.clone());
        Ok(logo)
    }

    async fn update(&self, id: Uuid, input: LogoInput) -> Result<Logo, ServiceError> {
        input.validate()?;
        let mut map = self.inner.write().await;
        let logo = map.get_mut(&id).ok_or_else(|| ServiceError::not_found("logo"))?;
        logo.apply(input);
        Ok(logo.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        map.remove(&id).ok_or_else(|| ServiceError::not_found("logo"))?;
        Ok(())
    }
}

/// JSON file-backed backend. Persists through [`JsonFileStore`] so records
/// survive restarts.
pub struct JsonLogoStore {
    store: JsonFileStore<Logo>,
}

impl JsonLogoStore {
    pub async fn open<P: Into<std::path::PathBuf>>(path: P) -> Result<Self, ServiceError> {
        let store = JsonFileStore::<Logo>::open(path).await?;
        Ok(Self { store })
    }
}

#[async_trait]
impl LogoStore for JsonLogoStore {
    async fn list(&self, limit: usize, page_token: Option<&str>) -> Result<LogoPage, ServiceError> {
        page_of(self.store.values().await, limit, page_token)
    }

    async fn list_by(
        &self,
        owner_id: &str,
        limit: usize,
        page_token: Option<&str>,
    ) -> Result<LogoPage, ServiceError> {
        page_of(owned_by(self.store.values().await, owner_id), limit, page_token)
    }

    async fn read(&self, id: Uuid) -> Result<Logo, ServiceError> {
        self.store.read(&id).await.ok_or_else(|| ServiceError::not_found("logo"))
    }

    async fn create(
        &self,
        input: LogoInput,
        creator: Option<&UserProfile>,
    ) -> Result<Logo, ServiceError> {
        input.validate()?;
        let logo = Logo::from_input(input, creator);
        self.store.put(logo.id, logo.clone()).await?;
        Ok(logo)
    }

    async fn update(&self, id: Uuid, input: LogoInput) -> Result<Logo, ServiceError> {
        input.validate()?;
        let mut logo = self.store.read(&id).await.ok_or_else(|| ServiceError::not_found("logo"))?;
        logo.apply(input);
        self.store.put(id, logo.clone()).await?;
        Ok(logo)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        self.store
            .take(&id)
            .await?
            .ok_or_else(|| ServiceError::not_found("logo"))?;
        Ok(())
    }
}
