use std::fmt;

/// Keys of the admin cache. Stores prefix them before persisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Auth,
    Teachers,
    Students,
    Trades,
    ActivityLogs,
}

impl CacheKey {
    pub const ALL: [CacheKey; 5] = [
        CacheKey::Auth,
        CacheKey::Teachers,
        CacheKey::Students,
        CacheKey::Trades,
        CacheKey::ActivityLogs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Auth => "auth",
            CacheKey::Teachers => "teachers",
            CacheKey::Students => "students",
            CacheKey::Trades => "trades",
            CacheKey::ActivityLogs => "activityLogs",
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record types kept as lists in the cache.
pub trait Cached: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync {
    const KEY: CacheKey;

    fn cache_id(&self) -> &str;
}

impl Cached for crate::teachers::Teacher {
    const KEY: CacheKey = CacheKey::Teachers;

    fn cache_id(&self) -> &str {
        &self.id
    }
}

impl Cached for crate::students::Student {
    const KEY: CacheKey = CacheKey::Students;

    fn cache_id(&self) -> &str {
        &self.id
    }
}

impl Cached for crate::trades::Trade {
    const KEY: CacheKey = CacheKey::Trades;

    fn cache_id(&self) -> &str {
        &self.id
    }
}

impl Cached for crate::activity::ActivityLog {
    const KEY: CacheKey = CacheKey::ActivityLogs;

    fn cache_id(&self) -> &str {
        &self.id
    }
}
