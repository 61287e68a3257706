use std::sync::Arc;

use super::*;
use crate::api::{ApiLogEntry, DataEnvelope, TableCountEntry};
use crate::listing::{SortConfig, SortDirection};
use crate::students::StudentStatus;
use crate::teachers::TeacherStatus;
use crate::test_support::{memory_cache, student, teacher, trade, MockAdminApi};

fn entry(endpoint: &str, hits: u64, ms: f64) -> ApiLogEntry {
    ApiLogEntry {
        id: endpoint.to_string(),
        endpoint: endpoint.to_string(),
        hit_count: hits,
        execution_time_ms: ms,
    }
}

fn table(name: &str, count: u64) -> TableCountEntry {
    TableCountEntry {
        table_name: name.to_string(),
        count,
    }
}

fn endpoints(view: &ApiUsageView) -> Vec<&str> {
    view.entries.iter().map(|e| e.endpoint.as_str()).collect()
}

#[test]
fn api_usage_totals_and_default_sort() {
    let view = summarize_api_usage(
        vec![
            entry("/a", 5, 10.0),
            entry("/b", 20, 30.0),
            entry("/c", 1, 50.0),
        ],
        SortConfig::new(ApiSortField::default()),
    );

    assert_eq!(view.total_hits, 26);
    assert!((view.average_execution_time_ms - 30.0).abs() < f64::EPSILON);
    assert_eq!(endpoints(&view), vec!["/b", "/a", "/c"]);
}

#[test]
fn api_usage_sorts_by_execution_time_ascending() {
    let sort = SortConfig::new(ApiSortField::HitCount).toggle(ApiSortField::ExecutionTimeMs);
    assert_eq!(sort.direction, SortDirection::Desc);
    let sort = sort.toggle(ApiSortField::ExecutionTimeMs);

    let view = summarize_api_usage(
        vec![entry("/slow", 1, 90.5), entry("/fast", 2, 1.5), entry("/mid", 3, 12.0)],
        sort,
    );

    assert_eq!(endpoints(&view), vec!["/fast", "/mid", "/slow"]);
}

#[test]
fn empty_api_usage_averages_to_zero() {
    let view = summarize_api_usage(Vec::new(), SortConfig::new(ApiSortField::HitCount));
    assert_eq!(view.total_hits, 0);
    assert_eq!(view.average_execution_time_ms, 0.0);
}

#[test]
fn sort_field_parses_wire_names() {
    assert_eq!("hit_count".parse::<ApiSortField>(), Ok(ApiSortField::HitCount));
    assert_eq!(
        "execution_time_ms".parse::<ApiSortField>(),
        Ok(ApiSortField::ExecutionTimeMs)
    );
    assert!("endpoint".parse::<ApiSortField>().is_err());
}

#[test]
fn busiest_table_keeps_first_maximum() {
    let view = summarize_table_counts(vec![
        table("users", 40),
        table("trades", 90),
        table("logs", 90),
    ]);

    assert_eq!(view.total_tables, 3);
    assert_eq!(view.total_rows, 220);
    assert_eq!(view.busiest_table.unwrap().table_name, "trades");
}

#[test]
fn no_tables_has_no_busiest() {
    let view = summarize_table_counts(Vec::new());
    assert_eq!(view.total_tables, 0);
    assert!(view.busiest_table.is_none());
}

#[test]
fn overview_counts_active_users() {
    let mut off = teacher("2", "Off Duty");
    off.status = TeacherStatus::Inactive;
    let mut paused = student("12", "Paused", "1");
    paused.status = StudentStatus::Inactive;

    let teachers = vec![teacher("1", "On Duty"), off];
    let mut students: Vec<_> = (0..1200)
        .map(|i| student(&format!("s{}", i), "Learner", "1"))
        .collect();
    students.push(paused);
    let trades = vec![trade("t1", "1", "s1", "INFY", "2024-05-01T10:00:00Z", 100)];

    let overview = build_overview(&teachers, &students, &trades);

    assert_eq!(overview.total_teachers, 2);
    assert_eq!(overview.total_students, 1201);
    assert_eq!(overview.total_trades, 1);
    assert_eq!(overview.active_users, 1201);
    assert_eq!(overview.cards[1].name, "Total Students");
    assert_eq!(overview.cards[1].value, "1,201");
    assert_eq!(overview.cards[3].name, "Active Users");
}

#[tokio::test]
async fn api_usage_accepts_data_without_status_flag() {
    let api = MockAdminApi::default();
    *api.api_logs.lock().unwrap() = Some(DataEnvelope {
        status: None,
        success: None,
        message: None,
        data: Some(vec![entry("/admin/students", 7, 4.0)]),
    });
    let (_store, cache) = memory_cache();
    let service = SystemService::new(Arc::new(api), cache);

    let view = service
        .api_usage(SortConfig::new(ApiSortField::HitCount))
        .await
        .unwrap();

    assert!(view.error.is_none());
    assert_eq!(view.total_hits, 7);
}

#[tokio::test]
async fn api_usage_reports_missing_data() {
    let api = MockAdminApi::default();
    *api.api_logs.lock().unwrap() = Some(DataEnvelope {
        status: None,
        success: None,
        message: None,
        data: None,
    });
    let (_store, cache) = memory_cache();
    let service = SystemService::new(Arc::new(api), cache);

    let view = service
        .api_usage(SortConfig::new(ApiSortField::HitCount))
        .await
        .unwrap();

    assert_eq!(view.error.as_deref(), Some("Invalid response format"));
    assert!(view.entries.is_empty());
}

#[tokio::test]
async fn table_counts_surface_backend_failure() {
    let (_store, cache) = memory_cache();
    let service = SystemService::new(Arc::new(MockAdminApi::failing("Database offline")), cache);

    let view = service.table_counts().await.unwrap();

    assert_eq!(view.error.as_deref(), Some("Database offline"));
    assert_eq!(view.total_rows, 0);
}

#[tokio::test]
async fn table_counts_summarize_rows() {
    let api = MockAdminApi::default();
    *api.table_counts.lock().unwrap() = Some(DataEnvelope::ok(vec![
        table("students", 542),
        table("teachers", 24),
    ]));
    let (_store, cache) = memory_cache();
    let service = SystemService::new(Arc::new(api), cache);

    let view = service.table_counts().await.unwrap();

    assert_eq!(view.total_rows, 566);
    assert_eq!(view.busiest_table.unwrap().table_name, "students");
}

#[tokio::test]
async fn overview_reads_cache() {
    let (_store, cache) = memory_cache();
    cache.store(&[teacher("1", "Asha Rao")]).await.unwrap();
    cache
        .store(&[student("10", "Ravi", "1"), student("11", "Meena", "1")])
        .await
        .unwrap();
    let service = SystemService::new(Arc::new(MockAdminApi::default()), cache);

    let overview = service.overview().unwrap();

    assert_eq!(overview.total_teachers, 1);
    assert_eq!(overview.total_students, 2);
    assert_eq!(overview.total_trades, 0);
    assert_eq!(overview.active_users, 3);
}
