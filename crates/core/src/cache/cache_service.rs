use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, error, warn};

use super::cache_model::{CacheKey, Cached};
use super::cache_traits::CacheStoreTrait;
use crate::auth::AuthSession;
use crate::errors::Result;

/// Typed access to the admin cache.
///
/// Reads never fail: a missing, unreadable or corrupt entry reads as empty
/// so views can fall through to the next data source.
#[derive(Clone)]
pub struct CacheService {
    store: Arc<dyn CacheStoreTrait>,
}

impl CacheService {
    pub fn new(store: Arc<dyn CacheStoreTrait>) -> Self {
        Self { store }
    }

    fn read_raw(&self, key: CacheKey) -> Option<String> {
        match self.store.get_item(key.as_str()) {
            Ok(value) => value,
            Err(e) => {
                error!("Failed to read cache entry '{}': {}", key, e);
                None
            }
        }
    }

    pub fn load<T: Cached>(&self) -> Vec<T> {
        let Some(raw) = self.read_raw(T::KEY) else {
            return Vec::new();
        };
        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(rows) => rows,
            Err(e) => {
                warn!("Ignoring corrupt cache entry '{}': {}", T::KEY, e);
                Vec::new()
            }
        }
    }

    pub fn find<T: Cached>(&self, id: &str) -> Option<T> {
        self.load::<T>().into_iter().find(|row| row.cache_id() == id)
    }

    pub async fn store<T: Cached>(&self, rows: &[T]) -> Result<()> {
        let json = serde_json::to_string(rows)?;
        self.store.set_item(T::KEY.as_str(), json).await?;
        debug!("Cached {} row(s) under '{}'", rows.len(), T::KEY);
        Ok(())
    }

    /// Merges fetched rows into the cached list by id. Fetched rows replace
    /// cached ones in place; unseen rows are appended.
    pub async fn upsert<T: Cached>(&self, fetched: &[T]) -> Result<()> {
        if fetched.is_empty() {
            return Ok(());
        }
        let mut rows = self.load::<T>();
        for row in fetched {
            match rows.iter_mut().find(|r| r.cache_id() == row.cache_id()) {
                Some(existing) => *existing = row.clone(),
                None => rows.push(row.clone()),
            }
        }
        self.store(&rows).await
    }

    /// Drops rows with the given ids and returns what is left.
    pub async fn remove_ids<T: Cached>(&self, ids: &[String]) -> Result<Vec<T>> {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut rows = self.load::<T>();
        rows.retain(|row| !targets.contains(row.cache_id()));
        self.store(&rows).await?;
        Ok(rows)
    }

    /// Applies `update` to rows with the given ids; returns how many matched.
    pub async fn map_ids<T, F>(&self, ids: &[String], update: F) -> Result<usize>
    where
        T: Cached,
        F: Fn(&mut T) + Send + Sync,
    {
        let targets: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let mut rows = self.load::<T>();
        let mut changed = 0;
        for row in rows.iter_mut() {
            if targets.contains(row.cache_id()) {
                update(row);
                changed += 1;
            }
        }
        self.store(&rows).await?;
        Ok(changed)
    }

    pub fn session(&self) -> Option<AuthSession> {
        let raw = self.read_raw(CacheKey::Auth)?;
        match serde_json::from_str::<AuthSession>(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Ignoring corrupt auth session: {}", e);
                None
            }
        }
    }

    pub async fn set_session(&self, session: &AuthSession) -> Result<()> {
        let json = serde_json::to_string(session)?;
        self.store.set_item(CacheKey::Auth.as_str(), json).await
    }

    pub async fn clear_session(&self) -> Result<()> {
        self.store.remove_item(CacheKey::Auth.as_str()).await
    }

    /// Removes every admin cache entry, the session included.
    pub async fn clear_all(&self) -> Result<()> {
        self.store.clear().await
    }
}
