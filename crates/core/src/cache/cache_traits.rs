use async_trait::async_trait;

use crate::errors::Result;

/// Namespaced string key-value store backing the admin cache.
///
/// Implementations prefix every key with [`crate::constants::CACHE_PREFIX`]
/// and `clear` removes only prefixed entries.
#[async_trait]
pub trait CacheStoreTrait: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: String) -> Result<()>;
    async fn remove_item(&self, key: &str) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}
