//! SyncKaro Connect - HTTP access to the admin REST backend.
//!
//! [`AdminApiClient`] implements [`synckaro_core::api::AdminApiTrait`] over
//! `reqwest`, so the services in `synckaro-core` never see HTTP directly.

mod client;

pub use client::{AdminApiClient, DEFAULT_API_BASE_URL, DEFAULT_TIMEOUT_SECS};
