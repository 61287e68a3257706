//! Activity log domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::utils::parse_timestamp;

/// Audit trail action types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    TradeExecuted,
    StudentAdded,
    ProfileUpdated,
    ProfileCreated,
    TeacherAssigned,
    TeacherReassigned,
}

impl ActivityAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::TradeExecuted => "trade_executed",
            ActivityAction::StudentAdded => "student_added",
            ActivityAction::ProfileUpdated => "profile_updated",
            ActivityAction::ProfileCreated => "profile_created",
            ActivityAction::TeacherAssigned => "teacher_assigned",
            ActivityAction::TeacherReassigned => "teacher_reassigned",
        }
    }

    /// Export label: upper-cased with underscores as spaces.
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_uppercase()
    }
}

impl std::str::FromStr for ActivityAction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "trade_executed" => Ok(ActivityAction::TradeExecuted),
            "student_added" => Ok(ActivityAction::StudentAdded),
            "profile_updated" => Ok(ActivityAction::ProfileUpdated),
            "profile_created" => Ok(ActivityAction::ProfileCreated),
            "teacher_assigned" => Ok(ActivityAction::TeacherAssigned),
            "teacher_reassigned" => Ok(ActivityAction::TeacherReassigned),
            other => Err(format!("Unknown activity action: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLog {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    pub action: ActivityAction,
    pub timestamp: String,
    pub details: String,
}

impl ActivityLog {
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    pub fn belongs_to_teacher(&self, teacher_id: &str) -> bool {
        self.teacher_id.as_deref() == Some(teacher_id)
    }

    pub fn belongs_to_student(&self, student_id: &str) -> bool {
        self.student_id.as_deref() == Some(student_id)
    }
}

/// Which logs a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionFilter {
    #[default]
    All,
    Trades,
    /// Counted as updates plus creations, filtered as updates only.
    ProfileUpdates,
    StudentAdded,
    /// Exactly one action.
    Action(ActivityAction),
}

impl std::str::FromStr for ActionFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "" | "all" => Ok(ActionFilter::All),
            "trades" | "trade_executed" => Ok(ActionFilter::Trades),
            "profile" | "profile_updated" => Ok(ActionFilter::ProfileUpdates),
            "student_added" => Ok(ActionFilter::StudentAdded),
            other => other
                .parse::<ActivityAction>()
                .map(ActionFilter::Action)
                .map_err(|_| format!("Unknown log filter: {}", other)),
        }
    }
}

/// Tab counts shown above a log list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCounts {
    pub all: usize,
    pub trades: usize,
    pub profile: usize,
    pub student_added: usize,
}

/// One log row as rendered, with its relative time.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogRow {
    #[serde(flatten)]
    pub log: ActivityLog,
    pub relative_time: String,
}

/// The logs view for one teacher or student.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogView {
    pub owner_name: String,
    pub filter: ActionFilter,
    pub counts: FilterCounts,
    pub logs: Vec<ActivityLogRow>,
    pub from_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A rendered CSV file.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
    pub rows: usize,
}
