use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::CacheEntryDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::cache_entries::dsl::*;
use synckaro_core::cache::CacheStoreTrait;
use synckaro_core::constants::CACHE_PREFIX;
use synckaro_core::errors::Result;

fn prefixed(key: &str) -> String {
    format!("{}{}", CACHE_PREFIX, key)
}

pub struct CacheRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CacheRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CacheRepository { pool, writer }
    }
}

#[async_trait]
impl CacheStoreTrait for CacheRepository {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut conn = get_connection(&self.pool)?;
        let value = cache_entries
            .find(prefixed(key))
            .select(cache_value)
            .first::<String>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(value)
    }

    async fn set_item(&self, key: &str, value: String) -> Result<()> {
        let entry = CacheEntryDB {
            cache_key: prefixed(key),
            cache_value: value,
            updated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
        self.writer
            .exec(move |conn| {
                diesel::replace_into(cache_entries)
                    .values(&entry)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        let full_key = prefixed(key);
        self.writer
            .exec(move |conn| {
                diesel::delete(cache_entries.find(full_key))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(())
            })
            .await
    }

    async fn clear(&self) -> Result<()> {
        let removed = self
            .writer
            .exec(|conn| {
                // `_` is a LIKE wildcard, so the prefix is matched in Rust.
                let owned: Vec<String> = cache_entries
                    .select(cache_key)
                    .load::<String>(conn)
                    .map_err(StorageError::from)?
                    .into_iter()
                    .filter(|k| k.starts_with(CACHE_PREFIX))
                    .collect();
                let count = diesel::delete(cache_entries.filter(cache_key.eq_any(owned)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(count)
            })
            .await?;
        debug!("Cleared {} cache entries", removed);
        Ok(())
    }
}
