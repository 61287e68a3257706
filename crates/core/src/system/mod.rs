//! System module - API usage, table counts and the dashboard overview.

mod system_model;
mod system_service;
mod system_summary;
mod system_traits;

#[cfg(test)]
mod system_tests;

pub use system_model::{
    ApiSortField, ApiUsageView, Overview, OverviewCard, TableCountsView,
};
pub use system_service::SystemService;
pub use system_summary::{
    build_overview, sort_api_logs, summarize_api_usage, summarize_table_counts,
};
pub use system_traits::SystemServiceTrait;
