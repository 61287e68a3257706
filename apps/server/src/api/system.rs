use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use synckaro_core::{
    listing::{SortConfig, SortDirection},
    system::{ApiSortField, ApiUsageView, Overview, TableCountsView},
};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Debug, Default, Deserialize)]
struct UsageQuery {
    sort: Option<String>,
    direction: Option<SortDirection>,
}

impl UsageQuery {
    fn sort_config(&self) -> ApiResult<SortConfig<ApiSortField>> {
        let field = match self.sort.as_deref() {
            Some(name) => name.parse().map_err(ApiError::BadRequest)?,
            None => ApiSortField::default(),
        };
        Ok(SortConfig {
            field,
            direction: self.direction.unwrap_or_default(),
        })
    }
}

async fn overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<Overview>> {
    Ok(Json(state.system_service.overview()?))
}

async fn api_usage(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UsageQuery>,
) -> ApiResult<Json<ApiUsageView>> {
    let sort = query.sort_config()?;
    Ok(Json(state.system_service.api_usage(sort).await?))
}

async fn table_counts(State(state): State<Arc<AppState>>) -> ApiResult<Json<TableCountsView>> {
    Ok(Json(state.system_service.table_counts().await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/overview", get(overview))
        .route("/system/api-usage", get(api_usage))
        .route("/system/table-counts", get(table_counts))
}
