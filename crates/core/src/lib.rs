//! SyncKaro Core - Domain records, view-models and services of the admin
//! dashboard.
//!
//! This crate is transport-agnostic: the backend is reached through
//! [`api::AdminApiTrait`] (implemented by `synckaro-connect`) and the local
//! cache through [`cache::CacheStoreTrait`] (implemented by
//! `synckaro-storage-sqlite`).

pub mod activity;
pub mod api;
pub mod auth;
pub mod cache;
pub mod constants;
pub mod errors;
pub mod fallback;
pub mod listing;
pub mod seed;
pub mod stats;
pub mod students;
pub mod system;
pub mod teachers;
pub mod trades;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod test_support;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
