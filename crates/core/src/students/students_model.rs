//! Student domain models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::listing::Page;
use crate::stats::TradeStats;
use crate::teachers::Teacher;
use crate::trades::Trade;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl StudentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentStatus::Active => "active",
            StudentStatus::Inactive => "inactive",
        }
    }

    /// Maps a backend status string; anything but `active` is inactive.
    pub fn from_wire(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("active") {
            StudentStatus::Active
        } else {
            StudentStatus::Inactive
        }
    }
}

impl std::str::FromStr for StudentStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            other => Err(format!("Unknown student status: {}", other)),
        }
    }
}

/// A student enrolled under a teacher.
///
/// Profit and loss is never stored; see [`Student::profit_loss`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub status: StudentStatus,
    #[serde(default)]
    pub initial_capital: Decimal,
    #[serde(default)]
    pub current_capital: Decimal,
    #[serde(default)]
    pub risk_percentage: f64,
    #[serde(default)]
    pub strategy: String,
    #[serde(default)]
    pub joined_date: String,
}

impl Student {
    pub fn profit_loss(&self) -> Decimal {
        self.current_capital.saturating_sub(self.initial_capital)
    }

    pub fn is_active(&self) -> bool {
        self.status == StudentStatus::Active
    }
}

/// A student as shown in lists, with the derived P&L.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow {
    #[serde(flatten)]
    pub student: Student,
    pub profit_loss: Decimal,
}

impl From<Student> for StudentRow {
    fn from(student: Student) -> Self {
        let profit_loss = student.profit_loss();
        Self {
            student,
            profit_loss,
        }
    }
}

/// Edit form for a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentUpdate {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub teacher_id: String,
    pub status: StudentStatus,
    pub initial_capital: Decimal,
    pub current_capital: Decimal,
    pub risk_percentage: f64,
    #[serde(default)]
    pub strategy: String,
}

/// The student directory page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentListView {
    pub page: Page<StudentRow>,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The student profile page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentDetailView {
    pub student: StudentRow,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teacher: Option<Teacher>,
    pub trades: Vec<Trade>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The student statistics page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatsView {
    pub student: StudentRow,
    #[serde(flatten)]
    pub trades: TradeStats,
    pub capital_pnl: Decimal,
    pub capital_pnl_percent: f64,
    pub from_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
