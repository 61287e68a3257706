use std::cmp::Ordering;

use super::system_model::{
    ApiSortField, ApiUsageView, Overview, OverviewCard, TableCountsView,
};
use crate::api::{ApiLogEntry, TableCountEntry};
use crate::listing::SortConfig;
use crate::students::Student;
use crate::teachers::Teacher;
use crate::trades::Trade;
use crate::utils::format_count;

fn compare_entries(field: ApiSortField, a: &ApiLogEntry, b: &ApiLogEntry) -> Ordering {
    match field {
        ApiSortField::HitCount => a.hit_count.cmp(&b.hit_count),
        ApiSortField::ExecutionTimeMs => a
            .execution_time_ms
            .partial_cmp(&b.execution_time_ms)
            .unwrap_or(Ordering::Equal),
    }
}

pub fn sort_api_logs(entries: &mut [ApiLogEntry], sort: SortConfig<ApiSortField>) {
    sort.sort(entries, compare_entries);
}

pub fn summarize_api_usage(
    mut entries: Vec<ApiLogEntry>,
    sort: SortConfig<ApiSortField>,
) -> ApiUsageView {
    let total_hits = entries.iter().map(|e| e.hit_count).sum();
    let average_execution_time_ms = if entries.is_empty() {
        0.0
    } else {
        entries.iter().map(|e| e.execution_time_ms).sum::<f64>() / entries.len() as f64
    };
    sort_api_logs(&mut entries, sort);

    ApiUsageView {
        entries,
        total_hits,
        average_execution_time_ms,
        sort,
        error: None,
    }
}

pub fn summarize_table_counts(tables: Vec<TableCountEntry>) -> TableCountsView {
    // First table wins a tie.
    let busiest_table = tables
        .iter()
        .fold(None::<&TableCountEntry>, |best, t| match best {
            Some(b) if t.count <= b.count => Some(b),
            _ => Some(t),
        })
        .cloned();

    TableCountsView {
        total_tables: tables.len(),
        total_rows: tables.iter().map(|t| t.count).sum(),
        busiest_table,
        tables,
        error: None,
    }
}

pub fn build_overview(teachers: &[Teacher], students: &[Student], trades: &[Trade]) -> Overview {
    let total_teachers = teachers.len() as u64;
    let total_students = students.len() as u64;
    let total_trades = trades.len() as u64;
    let active_users = (teachers.iter().filter(|t| t.status.is_active()).count()
        + students.iter().filter(|s| s.is_active()).count()) as u64;

    let cards = [
        ("Total Teachers", total_teachers),
        ("Total Students", total_students),
        ("Total Trades", total_trades),
        ("Active Users", active_users),
    ]
    .into_iter()
    .map(|(name, value)| OverviewCard {
        name: name.to_string(),
        value: format_count(value),
    })
    .collect();

    Overview {
        total_teachers,
        total_students,
        total_trades,
        active_users,
        cards,
    }
}
