//! SQLite storage for the SyncKaro admin dashboard.
//!
//! The dashboard keeps a namespaced key-value cache of backend data. This
//! crate persists it with Diesel over SQLite and contains:
//! - Database connection pooling and management
//! - Embedded Diesel migrations
//! - The single writer actor
//! - [`CacheRepository`], the `CacheStoreTrait` implementation
//!
//! # Architecture
//!
//! ```text
//! core (domain)          connect (HTTP)
//!       │                      │
//!       └──────────┬───────────┘
//!                  │
//!                  ▼
//!          storage-sqlite (this crate)
//!                  │
//!                  ▼
//!              SQLite DB
//! ```

pub mod cache;
pub mod db;
pub mod errors;
pub mod schema;

pub use cache::CacheRepository;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from synckaro-core for convenience
pub use synckaro_core::errors::{DatabaseError, Error, Result};
