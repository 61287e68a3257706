use super::*;
use crate::errors::{Error, ValidationError};
use crate::teachers::{Teacher, TeacherStatus};
use std::cmp::Ordering;

fn teacher(id: &str, name: &str, email: &str) -> Teacher {
    Teacher {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        mobile: String::new(),
        phone: None,
        status: TeacherStatus::Active,
        total_students: 0,
        total_trades: 0,
        total_capital: None,
        win_rate: None,
        specialization: None,
        joined_date: String::new(),
    }
}

#[test]
fn paginate_slices_and_reports_bounds() {
    let rows: Vec<u32> = (1..=25).collect();
    let page = paginate(rows.clone(), PageRequest::teachers(Some(3)));
    assert_eq!(page.items, vec![21, 22, 23, 24, 25]);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.page_start, 21);
    assert_eq!(page.page_end, 25);

    let first = paginate(rows, PageRequest::teachers(None));
    assert_eq!(first.items.len(), 10);
    assert_eq!((first.page_start, first.page_end), (1, 10));
}

#[test]
fn paginate_clamps_out_of_range_pages() {
    let rows: Vec<u32> = (1..=5).collect();
    let page = paginate(rows, PageRequest::teachers(Some(9)));
    assert_eq!(page.page, 1);
    assert_eq!(page.items.len(), 5);
}

#[test]
fn empty_list_has_one_page_and_zero_bounds() {
    let page = paginate(Vec::<u32>::new(), PageRequest::teachers(Some(1)));
    assert_eq!(page.total_pages, 1);
    assert_eq!((page.page_start, page.page_end), (0, 0));
    assert!(page.items.is_empty());
}

#[test]
fn displayed_rows_never_exceed_page_size() {
    for len in [0usize, 1, 49, 50, 51, 120] {
        let rows: Vec<usize> = (0..len).collect();
        let request = PageRequest::students(Some(1), Some(50)).unwrap();
        let page = from_server_page(rows, request);
        assert_eq!(page.items.len(), len.min(50));
        assert_eq!(page.total_pages, len.div_ceil(50).max(1));
    }
}

#[test]
fn huge_page_numbers_do_not_overflow() {
    let request = PageRequest::students(Some(usize::MAX), None).unwrap();
    let page = from_server_page(vec![1, 2, 3], request);
    assert_eq!(page.page, usize::MAX);
    assert_eq!(page.items, vec![1, 2, 3]);
    assert_eq!(page.page_start, usize::MAX);
    assert_eq!(page.page_end, usize::MAX);

    let page = paginate(vec![1, 2, 3], PageRequest::teachers(Some(usize::MAX)));
    assert_eq!(page.page, 1);
    assert_eq!(page.page_end, 3);
}

#[test]
fn student_page_sizes_are_restricted() {
    assert!(PageRequest::students(None, Some(100)).is_ok());
    assert_eq!(PageRequest::students(None, None).unwrap().page_size, 50);
    let err = PageRequest::students(None, Some(25)).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::InvalidInput(_))
    ));
}

#[test]
fn search_matches_name_or_email_case_insensitively() {
    let rows = vec![
        teacher("1", "Rajesh Kumar", "rajesh@synckaro.in"),
        teacher("2", "Priya Sharma", "priya@example.com"),
        teacher("3", "Amit Shah", "amit@SYNCKARO.in"),
    ];
    let hits = filter_by_query(&rows, "  SyncKaro ");
    let ids: Vec<&str> = hits.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    assert_eq!(filter_by_query(&rows, "sharma").len(), 1);
    assert_eq!(filter_by_query(&rows, "").len(), 3);
    assert_eq!(rows.len(), 3);
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Hits,
    Time,
}

#[test]
fn sort_toggle_cycles_and_new_field_starts_desc() {
    let config = SortConfig::new(Field::Hits);
    assert_eq!(config.direction, SortDirection::Desc);

    let asc = config.toggle(Field::Hits);
    assert_eq!(asc.direction, SortDirection::Asc);
    let desc = asc.toggle(Field::Hits);
    assert_eq!(desc.direction, SortDirection::Desc);
    let asc_again = desc.toggle(Field::Hits);
    assert_eq!(asc_again.direction, SortDirection::Asc);

    let other = asc_again.toggle(Field::Time);
    assert_eq!(other.field, Field::Time);
    assert_eq!(other.direction, SortDirection::Desc);
}

#[test]
fn sorting_only_reorders() {
    let compare = |field: Field, a: &(u32, u32), b: &(u32, u32)| -> Ordering {
        match field {
            Field::Hits => a.0.cmp(&b.0),
            Field::Time => a.1.cmp(&b.1),
        }
    };
    let mut rows = vec![(3, 10), (1, 30), (2, 20)];
    let mut original = rows.clone();

    SortConfig::new(Field::Hits).sort(&mut rows, compare);
    assert_eq!(rows, vec![(3, 10), (2, 20), (1, 30)]);

    SortConfig::new(Field::Hits).toggle(Field::Hits).sort(&mut rows, compare);
    assert_eq!(rows, vec![(1, 30), (2, 20), (3, 10)]);

    rows.sort();
    original.sort();
    assert_eq!(rows, original);
}

#[test]
fn numeric_ids_drop_non_numeric_entries() {
    let ids = vec!["12".to_string(), "abc".to_string(), " 7 ".to_string()];
    assert_eq!(numeric_ids(&ids).unwrap(), vec![12, 7]);

    let err = numeric_ids(&["x".to_string()]).unwrap_err();
    assert_eq!(err.user_message(), "No valid student IDs selected");
}

#[test]
fn outcome_reports_remote_error() {
    let ok = MutationOutcome::remote(vec!["1".into()], Ok("Deleted".into()));
    assert!(ok.remote_ok);
    assert_eq!(ok.message.as_deref(), Some("Deleted"));

    let failed = MutationOutcome::remote(
        vec!["1".into()],
        Err(crate::errors::Error::api("Student not found")),
    );
    assert!(!failed.remote_ok);
    assert_eq!(failed.error.as_deref(), Some("Student not found"));
    assert_eq!(failed.affected_ids, vec!["1".to_string()]);
}
