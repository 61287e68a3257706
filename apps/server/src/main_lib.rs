use std::sync::Arc;

use chrono::Utc;
use synckaro_connect::AdminApiClient;
use synckaro_core::{
    api::AdminApiTrait,
    auth::{AuthService, AuthServiceTrait},
    cache::CacheService,
    seed::{seed_cache, DEFAULT_SEED},
    students::{StudentService, StudentServiceTrait},
    system::{SystemService, SystemServiceTrait},
    teachers::{TeacherService, TeacherServiceTrait},
};
use synckaro_storage_sqlite::{create_pool, init, run_migrations, spawn_writer, CacheRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub auth_service: Arc<dyn AuthServiceTrait>,
    pub teacher_service: Arc<dyn TeacherServiceTrait>,
    pub student_service: Arc<dyn StudentServiceTrait>,
    pub system_service: Arc<dyn SystemServiceTrait>,
}

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry.with(fmt::layer()).init(),
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Cache database in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.clone());
    let cache = CacheService::new(Arc::new(CacheRepository::new(pool, writer)));

    let client = AdminApiClient::with_timeout(&config.api_base_url, config.request_timeout)?;
    tracing::info!("Admin backend: {}", client.base_url());
    let api: Arc<dyn AdminApiTrait> = Arc::new(client);

    let auth_service = Arc::new(AuthService::new(api.clone(), cache.clone()));
    if auth_service.restore_token() {
        tracing::info!("Restored the cached admin session");
    }

    if config.seed_demo_data && seed_cache(&cache, DEFAULT_SEED, Utc::now()).await? {
        tracing::info!("Seeded the cache with demo data");
    }

    Ok(Arc::new(AppState {
        auth_service,
        teacher_service: Arc::new(TeacherService::new(api.clone(), cache.clone())),
        student_service: Arc::new(StudentService::new(api.clone(), cache.clone())),
        system_service: Arc::new(SystemService::new(api, cache)),
    }))
}
