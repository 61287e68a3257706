//! SQLite implementation of the admin cache store.

mod model;
mod repository;

pub use model::CacheEntryDB;
pub use repository::CacheRepository;
