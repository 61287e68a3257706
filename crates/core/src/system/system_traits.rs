use async_trait::async_trait;

use super::system_model::{ApiSortField, ApiUsageView, Overview, TableCountsView};
use crate::errors::Result;
use crate::listing::SortConfig;

/// Backend health pages and the landing overview.
#[async_trait]
pub trait SystemServiceTrait: Send + Sync {
    async fn api_usage(&self, sort: SortConfig<ApiSortField>) -> Result<ApiUsageView>;
    async fn table_counts(&self) -> Result<TableCountsView>;
    fn overview(&self) -> Result<Overview>;
}
