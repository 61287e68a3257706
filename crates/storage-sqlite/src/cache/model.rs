//! Database model for cache entries.

use diesel::prelude::*;

/// One prefixed key and its JSON value.
#[derive(Queryable, Insertable, Selectable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::cache_entries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CacheEntryDB {
    pub cache_key: String,
    pub cache_value: String,
    pub updated_at: String,
}
