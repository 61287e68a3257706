use serde::{Deserialize, Serialize};

use crate::api::{ApiLogEntry, TableCountEntry};
use crate::listing::SortConfig;

/// Sortable columns of the API usage table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiSortField {
    #[default]
    HitCount,
    ExecutionTimeMs,
}

impl std::str::FromStr for ApiSortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hit_count" => Ok(ApiSortField::HitCount),
            "execution_time_ms" => Ok(ApiSortField::ExecutionTimeMs),
            other => Err(format!("Unknown sort field: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiUsageView {
    pub entries: Vec<ApiLogEntry>,
    pub total_hits: u64,
    /// Mean over endpoints, 0 when there are none.
    pub average_execution_time_ms: f64,
    pub sort: SortConfig<ApiSortField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCountsView {
    pub tables: Vec<TableCountEntry>,
    pub total_tables: usize,
    pub total_rows: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub busiest_table: Option<TableCountEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewCard {
    pub name: String,
    /// Count with Indian digit grouping.
    pub value: String,
}

/// The dashboard landing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Overview {
    pub total_teachers: u64,
    pub total_students: u64,
    pub total_trades: u64,
    /// Active teachers plus active students.
    pub active_users: u64,
    pub cards: Vec<OverviewCard>,
}
