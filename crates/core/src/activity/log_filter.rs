use chrono::{DateTime, Utc};

use super::activity_model::{
    ActionFilter, ActivityAction, ActivityLog, ActivityLogRow, ActivityLogView, FilterCounts,
};
use crate::utils::relative_time;

impl ActionFilter {
    /// Whether a log is shown under this filter.
    ///
    /// `ProfileUpdates` shows `profile_updated` rows only, even though its
    /// tab count also includes `profile_created`.
    pub fn matches(&self, action: ActivityAction) -> bool {
        match self {
            ActionFilter::All => true,
            ActionFilter::Trades => action == ActivityAction::TradeExecuted,
            ActionFilter::ProfileUpdates => action == ActivityAction::ProfileUpdated,
            ActionFilter::StudentAdded => action == ActivityAction::StudentAdded,
            ActionFilter::Action(only) => action == *only,
        }
    }
}

/// Logs visible under `filter`. The input is left untouched.
pub fn filter_logs(logs: &[ActivityLog], filter: ActionFilter) -> Vec<ActivityLog> {
    logs.iter()
        .filter(|log| filter.matches(log.action))
        .cloned()
        .collect()
}

pub fn filter_counts(logs: &[ActivityLog]) -> FilterCounts {
    let mut counts = FilterCounts {
        all: logs.len(),
        ..FilterCounts::default()
    };
    for log in logs {
        match log.action {
            ActivityAction::TradeExecuted => counts.trades += 1,
            ActivityAction::ProfileUpdated | ActivityAction::ProfileCreated => counts.profile += 1,
            ActivityAction::StudentAdded => counts.student_added += 1,
            _ => {}
        }
    }
    counts
}

/// Orders logs newest first; unparseable timestamps sink to the end.
pub fn sort_logs_newest_first(logs: &mut [ActivityLog]) {
    logs.sort_by(|a, b| b.parsed_timestamp().cmp(&a.parsed_timestamp()));
}

pub fn to_rows(logs: Vec<ActivityLog>, now: DateTime<Utc>) -> Vec<ActivityLogRow> {
    logs.into_iter()
        .map(|log| {
            let relative = log
                .parsed_timestamp()
                .map(|ts| relative_time(ts, now))
                .unwrap_or_else(|| log.timestamp.clone());
            ActivityLogRow {
                log,
                relative_time: relative,
            }
        })
        .collect()
}

/// Shapes a log view: tab counts over every log, rows for the filter only.
pub fn build_log_view(
    owner_name: &str,
    logs: &[ActivityLog],
    filter: ActionFilter,
    from_fallback: bool,
    error: Option<String>,
    now: DateTime<Utc>,
) -> ActivityLogView {
    ActivityLogView {
        owner_name: owner_name.to_string(),
        filter,
        counts: filter_counts(logs),
        logs: to_rows(filter_logs(logs, filter), now),
        from_fallback,
        error,
    }
}
