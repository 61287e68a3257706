use std::sync::Arc;

use rust_decimal_macros::dec;

use super::*;
use crate::activity::{ActionFilter, ActivityAction};
use crate::api::{
    ActivityLogDto, MessageResponse, StatsDataDto, StatusFlag, StudentRefDto, TeacherDetailDto,
    TeacherListItem, TeacherSummaryDto, TradeDto,
};
use crate::cache::CacheService;
use crate::errors::{Error, ValidationError};
use crate::listing::PageRequest;
use crate::students::{Student, StudentStatus};
use crate::test_support::{activity, memory_cache, student, teacher, trade, MockAdminApi};
use crate::trades::Trade;

fn setup(api: MockAdminApi) -> (Arc<MockAdminApi>, CacheService, TeacherService) {
    let api = Arc::new(api);
    let (_store, cache) = memory_cache();
    let service = TeacherService::new(api.clone(), cache.clone());
    (api, cache, service)
}

fn list_item(id: &str, name: &str) -> TeacherListItem {
    TeacherListItem {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
        doj: Some("2024-03-01".to_string()),
        status: Some("live".to_string()),
    }
}

#[tokio::test]
async fn list_merges_backend_over_cache() {
    let (api, cache, service) = setup(MockAdminApi::default());
    let mut cached = teacher("1", "Old Name");
    cached.specialization = Some("Options".into());
    cache.store(&[cached]).await.unwrap();
    *api.teacher_list.lock().unwrap() = (1..=12)
        .map(|i| list_item(&i.to_string(), &format!("Teacher {}", i)))
        .collect();

    let view = service
        .list_teachers("", PageRequest::teachers(Some(2)))
        .await
        .unwrap();

    assert!(view.error.is_none());
    assert_eq!(view.page.total_items, 12);
    assert_eq!(view.page.total_pages, 2);
    assert_eq!(view.page.items.len(), 2);
    assert_eq!(view.page.page_start, 11);

    let merged = cache.find::<Teacher>("1").unwrap();
    assert_eq!(merged.name, "Teacher 1");
    assert_eq!(merged.email, "old.name@synckaro.in");
    assert_eq!(merged.specialization.as_deref(), Some("Options"));
    assert_eq!(merged.status, TeacherStatus::Live);
    assert_eq!(cache.load::<Teacher>().len(), 12);
}

#[tokio::test]
async fn list_failure_uses_cache_and_keeps_error() {
    let (_api, cache, service) = setup(MockAdminApi::failing("Gateway timeout"));
    cache
        .store(&[teacher("1", "Rajesh Kumar"), teacher("2", "Sneha Iyer")])
        .await
        .unwrap();

    let view = service
        .list_teachers("sneha", PageRequest::teachers(None))
        .await
        .unwrap();

    assert_eq!(view.error.as_deref(), Some("Gateway timeout"));
    assert_eq!(view.page.items.len(), 1);
    assert_eq!(view.page.items[0].name, "Sneha Iyer");
}

#[tokio::test]
async fn options_list_every_teacher() {
    let (api, _cache, service) = setup(MockAdminApi::default());
    *api.teacher_list.lock().unwrap() = vec![list_item("4", "Arjun Mehta")];

    let options = service.teacher_options().await.unwrap();
    assert_eq!(
        options,
        vec![TeacherOption {
            id: "4".into(),
            name: "Arjun Mehta".into()
        }]
    );
}

fn trade_dto(id: &str, at: &str) -> TradeDto {
    TradeDto {
        id: id.to_string(),
        stock: "INFY".to_string(),
        quantity: Some(5),
        timestamp: Some(at.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn view_maps_summary_students_and_recent_trades() {
    let (api, cache, service) = setup(MockAdminApi::default());
    let mut trades: Vec<TradeDto> = (1..=12)
        .map(|d| trade_dto(&d.to_string(), &format!("2024-05-{:02}T10:00:00Z", d)))
        .collect();
    trades.reverse();
    *api.teacher_view.lock().unwrap() = Some(TeacherDetailDto {
        teacher_id: "9".into(),
        name: "Rajesh Kumar".into(),
        status: Some("active".into()),
        email: Some("rajesh@synckaro.in".into()),
        phone: Some("+91 98111-22233".into()),
        last_updated: Some("2024-05-12T10:00:00Z".into()),
        summary: Some(TeacherSummaryDto {
            total_students: Some(2),
            total_trades: Some(12),
            total_capital: Some(dec!(250000)),
            win_rate: Some(dec!(62.5)),
        }),
        associated_students: vec![
            StudentRefDto {
                id: "21".into(),
                name: "Rahul Verma".into(),
                status: Some("active".into()),
                initial_capital: Some(dec!(100000)),
                current_capital: Some(dec!(90000)),
                ..Default::default()
            },
            StudentRefDto {
                id: "22".into(),
                name: "Pooja Nair".into(),
                status: Some("inactive".into()),
                ..Default::default()
            },
        ],
        recent_trades: trades,
        ..Default::default()
    });

    let view = service.get_teacher("9").await.unwrap();

    assert!(view.error.is_none());
    assert_eq!(view.teacher.mobile, "919811122233");
    assert_eq!(view.teacher.win_rate, Some(62.5));
    assert_eq!(view.students.len(), 2);
    assert_eq!(view.students[0].profit_loss, dec!(-10000));
    assert_eq!(view.students[0].student.teacher_id, "9");
    assert_eq!(view.active_students, 1);
    assert_eq!(view.recent_trades.len(), 10);
    assert_eq!(view.recent_trades[0].id, "12");
    assert_eq!(view.last_updated.as_deref(), Some("2024-05-12T10:00:00Z"));

    assert!(cache.find::<Teacher>("9").is_some());
    assert_eq!(cache.load::<Student>().len(), 2);
    assert_eq!(cache.load::<Trade>().len(), 10);
}

#[tokio::test]
async fn view_failure_falls_back_to_cache() {
    let (_api, cache, service) = setup(MockAdminApi::failing("Teacher service down"));

    let err = service.get_teacher("9").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    cache.store(&[teacher("9", "Rajesh Kumar")]).await.unwrap();
    cache
        .store(&[student("21", "Rahul Verma", "9"), student("22", "Other", "3")])
        .await
        .unwrap();
    cache
        .store(&[trade("t1", "9", "21", "TCS", "2024-05-01T10:00:00Z", 100)])
        .await
        .unwrap();

    let view = service.get_teacher("9").await.unwrap();
    assert_eq!(view.error.as_deref(), Some("Teacher service down"));
    assert_eq!(view.students.len(), 1);
    assert_eq!(view.recent_trades.len(), 1);
}

fn update_form() -> TeacherUpdate {
    TeacherUpdate {
        name: " Rajesh Kumar ".into(),
        email: "rajesh@synckaro.in".into(),
        phone: "+91 98111 22233".into(),
        specialization: "".into(),
        status: TeacherStatus::Inactive,
    }
}

#[tokio::test]
async fn update_validates_before_calling_backend() {
    let (api, _cache, service) = setup(MockAdminApi::default());
    let mut form = update_form();
    form.email = "not-an-email".into();

    let err = service.update_teacher("9", form).await.unwrap_err();
    match err {
        Error::Validation(ValidationError::Form(errors)) => assert!(errors.contains_key("email")),
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn update_needs_status_and_message() {
    let (api, cache, service) = setup(MockAdminApi::default());
    cache.store(&[teacher("9", "Old")]).await.unwrap();

    *api.mutation_response.lock().unwrap() = MessageResponse {
        status: Some(StatusFlag::Bool(true)),
        message: None,
    };
    let err = service.update_teacher("9", update_form()).await.unwrap_err();
    assert_eq!(err.user_message(), "Failed to update teacher");
    assert_eq!(cache.find::<Teacher>("9").unwrap().name, "Old");

    *api.mutation_response.lock().unwrap() = MockAdminApi::ok_message("Teacher updated");
    let updated = service.update_teacher("9", update_form()).await.unwrap();
    assert_eq!(updated.name, "Rajesh Kumar");
    assert_eq!(updated.mobile, "919811122233");
    assert_eq!(updated.status, TeacherStatus::Inactive);
    assert_eq!(cache.find::<Teacher>("9"), Some(updated));

    let sent = api.last_teacher_update.lock().unwrap().clone().unwrap();
    assert_eq!(sent.status, "inactive");
    assert_eq!(sent.specialization, None);
}

#[tokio::test]
async fn failed_delete_still_removes_teacher() {
    let (_api, cache, service) = setup(MockAdminApi::failing("Cannot delete"));
    cache
        .store(&[teacher("9", "A"), teacher("10", "B")])
        .await
        .unwrap();

    let outcome = service.delete_teacher("9").await.unwrap();

    assert!(!outcome.remote_ok);
    assert_eq!(outcome.error.as_deref(), Some("Cannot delete"));
    assert!(cache.find::<Teacher>("9").is_none());
    assert!(cache.find::<Teacher>("10").is_some());
}

#[tokio::test]
async fn delete_without_message_is_a_failure() {
    let (api, cache, service) = setup(MockAdminApi::default());
    cache.store(&[teacher("9", "A")]).await.unwrap();

    let outcome = service.delete_teacher("9").await.unwrap();
    assert_eq!(outcome.error.as_deref(), Some("Delete operation failed"));
    assert_eq!(*api.last_ids.lock().unwrap(), vec![9]);
    assert!(cache.load::<Teacher>().is_empty());
}

#[tokio::test]
async fn bulk_actions_stay_local() {
    let (api, cache, service) = setup(MockAdminApi::default());
    cache
        .store(&[teacher("1", "A"), teacher("2", "B"), teacher("3", "C")])
        .await
        .unwrap();

    let ids = vec!["1".to_string(), "2".to_string()];
    service
        .bulk_update_status(&ids, TeacherStatus::Inactive)
        .await
        .unwrap();
    assert_eq!(
        cache.find::<Teacher>("2").map(|t| t.status),
        Some(TeacherStatus::Inactive)
    );

    let outcome = service.bulk_delete(&ids[..1]).await.unwrap();
    assert!(outcome.remote_ok);
    assert_eq!(cache.load::<Teacher>().len(), 2);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn toggles_student_of_teacher() {
    let (_api, cache, service) = setup(MockAdminApi::default());
    cache
        .store(&[student("21", "Rahul Verma", "9")])
        .await
        .unwrap();

    let toggled = service.toggle_student_status("9", "21").await.unwrap();
    assert_eq!(toggled.status, StudentStatus::Inactive);
    assert_eq!(
        cache.find::<Student>("21").map(|s| s.status),
        Some(StudentStatus::Inactive)
    );

    assert!(service.toggle_student_status("8", "21").await.is_err());
}

#[tokio::test]
async fn stats_fall_back_to_samples() {
    let (api, cache, service) = setup(MockAdminApi::default());
    cache.store(&[teacher("9", "Rajesh Kumar")]).await.unwrap();
    *api.stats.lock().unwrap() = Some(StatsDataDto::default());

    let view = service.teacher_stats("9").await.unwrap();

    assert!(view.from_fallback);
    assert!(view.error.is_none());
    assert_eq!(view.total_students, 3);
    assert_eq!(view.trades.total_trades, 5);
    assert_eq!(view.trades.total_pnl, dec!(10800));
    assert_eq!(view.top_students[0].student.student.name, "Rahul Verma");
    assert_eq!(view.top_students[2].student.profit_loss, dec!(-12000));
}

#[tokio::test]
async fn stats_use_backend_rows() {
    let (api, cache, service) = setup(MockAdminApi::default());
    cache.store(&[teacher("9", "Rajesh Kumar")]).await.unwrap();
    *api.stats.lock().unwrap() = Some(StatsDataDto {
        students: Some(vec![StudentRefDto {
            id: "21".into(),
            name: "Rahul Verma".into(),
            status: Some("active".into()),
            initial_capital: Some(dec!(1000)),
            current_capital: Some(dec!(1500)),
            ..Default::default()
        }]),
        trades: vec![
            TradeDto {
                pnl: Some(dec!(200)),
                ..trade_dto("1", "2024-05-01T10:00:00Z")
            },
            TradeDto {
                pnl: Some(dec!(-50)),
                ..trade_dto("2", "2024-05-02T10:00:00Z")
            },
        ],
    });

    let view = service.teacher_stats("9").await.unwrap();
    assert!(!view.from_fallback);
    assert_eq!(view.total_students, 1);
    assert_eq!(view.active_students, 1);
    assert_eq!(view.top_students[0].pnl_percent, 50.0);
    assert_eq!(view.trades.win_rate, 50.0);
    assert_eq!(view.trades.most_traded_stock, "INFY");
    assert_eq!(cache.load::<Trade>().len(), 2);
}

#[tokio::test]
async fn logs_prefer_backend_then_cache() {
    let (api, cache, service) = setup(MockAdminApi::default());
    cache.store(&[teacher("9", "Rajesh Kumar")]).await.unwrap();
    cache
        .store(&[
            activity("c1", Some("9"), None, ActivityAction::TradeExecuted, "2024-05-01T10:00:00Z"),
            activity("c2", Some("4"), None, ActivityAction::StudentAdded, "2024-05-01T10:00:00Z"),
        ])
        .await
        .unwrap();

    let view = service.teacher_logs("9", ActionFilter::All).await.unwrap();
    assert_eq!(view.owner_name, "Rajesh Kumar");
    assert_eq!(view.counts.all, 1);
    assert!(!view.from_fallback);

    *api.logs.lock().unwrap() = vec![
        ActivityLogDto {
            id: "a1".into(),
            teacher_id: Some("9".into()),
            action: "trade_executed".into(),
            timestamp: "2024-05-03T10:00:00Z".into(),
            details: "Bought TCS".into(),
            ..Default::default()
        },
        ActivityLogDto {
            id: "a2".into(),
            teacher_id: Some("9".into()),
            action: "profile_updated".into(),
            timestamp: "2024-05-04T10:00:00Z".into(),
            details: "Changed email".into(),
            ..Default::default()
        },
        ActivityLogDto {
            id: "a3".into(),
            action: "unknown_action".into(),
            timestamp: "2024-05-04T10:00:00Z".into(),
            ..Default::default()
        },
    ];

    let view = service.teacher_logs("9", ActionFilter::Trades).await.unwrap();
    assert_eq!(view.counts.all, 2);
    assert_eq!(view.counts.trades, 1);
    assert_eq!(view.logs.len(), 1);
    assert_eq!(view.logs[0].log.id, "a1");
}

#[tokio::test]
async fn logs_export_uses_filter_and_owner_name() {
    let (_api, cache, service) = setup(MockAdminApi::default());
    cache.store(&[teacher("9", "Rajesh Kumar")]).await.unwrap();

    let export = service
        .export_teacher_logs("9", ActionFilter::Trades)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(export.file_name, "Rajesh_Kumar_activity_logs.csv");
    assert_eq!(export.rows, 3);
    assert_eq!(export.content.lines().count(), 4);

    let none = service
        .export_teacher_logs("9", ActionFilter::Action(ActivityAction::TeacherAssigned))
        .await
        .unwrap();
    assert!(none.is_none());
}
