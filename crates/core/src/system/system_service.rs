use std::sync::Arc;

use async_trait::async_trait;
use log::warn;

use super::system_model::{ApiSortField, ApiUsageView, Overview, TableCountsView};
use super::system_summary::{build_overview, summarize_api_usage, summarize_table_counts};
use super::system_traits::SystemServiceTrait;
use crate::api::{AdminApiTrait, DataEnvelope};
use crate::cache::CacheService;
use crate::errors::{Error, Result};
use crate::listing::SortConfig;
use crate::students::Student;
use crate::teachers::Teacher;
use crate::trades::Trade;

const INVALID_RESPONSE: &str = "Invalid response format";

/// These endpoints only need `data` to be a list.
fn require_rows<T>(envelope: DataEnvelope<Vec<T>>) -> Result<Vec<T>> {
    envelope.data.ok_or_else(|| Error::api(INVALID_RESPONSE))
}

pub struct SystemService {
    api: Arc<dyn AdminApiTrait>,
    cache: CacheService,
}

impl SystemService {
    pub fn new(api: Arc<dyn AdminApiTrait>, cache: CacheService) -> Self {
        Self { api, cache }
    }
}

#[async_trait]
impl SystemServiceTrait for SystemService {
    async fn api_usage(&self, sort: SortConfig<ApiSortField>) -> Result<ApiUsageView> {
        match self.api.api_logs().await.and_then(require_rows) {
            Ok(entries) => Ok(summarize_api_usage(entries, sort)),
            Err(e) => {
                warn!("Failed to fetch API logs: {}", e);
                Ok(ApiUsageView {
                    error: Some(e.user_message()),
                    ..summarize_api_usage(Vec::new(), sort)
                })
            }
        }
    }

    async fn table_counts(&self) -> Result<TableCountsView> {
        match self.api.table_counts().await.and_then(require_rows) {
            Ok(tables) => Ok(summarize_table_counts(tables)),
            Err(e) => {
                warn!("Failed to fetch table counts: {}", e);
                Ok(TableCountsView {
                    error: Some(e.user_message()),
                    ..summarize_table_counts(Vec::new())
                })
            }
        }
    }

    fn overview(&self) -> Result<Overview> {
        Ok(build_overview(
            &self.cache.load::<Teacher>(),
            &self.cache.load::<Student>(),
            &self.cache.load::<Trade>(),
        ))
    }
}
