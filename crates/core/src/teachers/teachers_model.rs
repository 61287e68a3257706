//! Teacher domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::listing::Page;
use crate::stats::{TopStudent, TradeStats};
use crate::students::StudentRow;
use crate::trades::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeacherStatus {
    #[default]
    Active,
    Inactive,
    Live,
    Open,
    Close,
    Test,
}

impl TeacherStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeacherStatus::Active => "active",
            TeacherStatus::Inactive => "inactive",
            TeacherStatus::Live => "live",
            TeacherStatus::Open => "open",
            TeacherStatus::Close => "close",
            TeacherStatus::Test => "test",
        }
    }

    /// Maps a backend status string. Unknown values are treated as inactive.
    pub fn from_wire(value: &str) -> Self {
        value
            .trim()
            .to_ascii_lowercase()
            .parse()
            .unwrap_or(TeacherStatus::Inactive)
    }

    /// `active`, `live` and `open` teachers are taking trades.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TeacherStatus::Active | TeacherStatus::Live | TeacherStatus::Open
        )
    }

    /// The two-state status offered by the edit form.
    pub fn edit_status(&self) -> TeacherStatus {
        if self.is_active() {
            TeacherStatus::Active
        } else {
            TeacherStatus::Inactive
        }
    }
}

impl std::str::FromStr for TeacherStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(TeacherStatus::Active),
            "inactive" => Ok(TeacherStatus::Inactive),
            "live" => Ok(TeacherStatus::Live),
            "open" => Ok(TeacherStatus::Open),
            "close" => Ok(TeacherStatus::Close),
            "test" => Ok(TeacherStatus::Test),
            other => Err(format!("Unknown teacher status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: TeacherStatus,
    #[serde(default)]
    pub total_students: u32,
    #[serde(default)]
    pub total_trades: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_capital: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
    #[serde(default)]
    pub joined_date: String,
}

/// Edit form for a teacher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherUpdate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub specialization: String,
    pub status: TeacherStatus,
}

/// Entry of the teacher picker on the student edit form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherOption {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherListView {
    pub page: Page<Teacher>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDetailView {
    pub teacher: Teacher,
    pub students: Vec<StudentRow>,
    pub active_students: usize,
    pub recent_trades: Vec<Trade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherStatsView {
    pub teacher: Teacher,
    #[serde(flatten)]
    pub trades: TradeStats,
    pub total_students: usize,
    pub active_students: usize,
    pub top_students: Vec<TopStudent>,
    pub from_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
