use std::sync::Arc;

use anyhow::Context;
use axum::{
    http::{header, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use synckaro_core::activity::{ActionFilter, CsvExport};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

mod auth;
mod session;
mod students;
mod system;
mod teachers;

pub async fn healthz() -> &'static str {
    "ok"
}

/// `?filter=` of the log endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LogQuery {
    #[serde(default)]
    filter: Option<String>,
}

impl LogQuery {
    pub(crate) fn action_filter(&self) -> ApiResult<ActionFilter> {
        self.filter
            .as_deref()
            .unwrap_or_default()
            .parse()
            .map_err(ApiError::BadRequest)
    }
}

/// Selected rows of a bulk action.
#[derive(Debug, Deserialize)]
pub(crate) struct BulkIds {
    pub ids: Vec<String>,
}

/// Sends a rendered export as a download, or 204 when there was nothing to export.
pub(crate) fn csv_download(export: Option<CsvExport>) -> ApiResult<Response> {
    let Some(export) = export else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.file_name
    ))
    .map_err(|e| ApiError::Internal(format!("Invalid export file name: {}", e)))?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let allow_origin = if config.cors_allow.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin: {}", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let protected = Router::new()
        .merge(teachers::router())
        .merge(students::router())
        .merge(system::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            session::require_session,
        ));

    let api = Router::new()
        .route("/healthz", get(healthz))
        .merge(auth::router())
        .merge(protected)
        .with_state(state);

    Ok(Router::new()
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid)))
}
