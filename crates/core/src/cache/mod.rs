//! Cache module - the namespaced key-value mirror of backend data.

mod cache_model;
mod cache_service;
mod cache_traits;


pub use cache_model::{CacheKey, Cached};
pub use cache_service::CacheService;
pub use cache_traits::CacheStoreTrait;
