//! Wire types of the admin REST API.
//!
//! Field names follow the backend (snake_case). Ids arrive as numbers or
//! strings and are normalised to strings; money arrives as numbers or
//! numeric strings and is normalised to `Decimal`.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::errors::Error;
use crate::utils::parse_decimal_lenient;

// ─────────────────────────────────────────────────────────────────────────────
// Lenient field decoders
// ─────────────────────────────────────────────────────────────────────────────

fn value_to_id(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_id(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(value_to_id))
}

pub(crate) fn de_opt_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => Decimal::from_str(&n.to_string())
            .or_else(|_| Decimal::from_scientific(&n.to_string()))
            .ok(),
        Some(Value::String(s)) => parse_decimal_lenient(&s),
        _ => None,
    })
}

/// A `status`/`success` flag. Backends send either a boolean or a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatusFlag {
    Bool(bool),
    Text(String),
}

impl StatusFlag {
    /// `true`, or any non-empty word other than a failure word.
    pub fn is_truthy(&self) -> bool {
        match self {
            StatusFlag::Bool(b) => *b,
            StatusFlag::Text(s) => {
                let s = s.trim().to_ascii_lowercase();
                !s.is_empty() && !matches!(s.as_str(), "false" | "error" | "failed" | "fail" | "0")
            }
        }
    }
}

pub fn flag_is_truthy(flag: &Option<StatusFlag>) -> bool {
    flag.as_ref().is_some_and(StatusFlag::is_truthy)
}

// ─────────────────────────────────────────────────────────────────────────────
// Envelopes
// ─────────────────────────────────────────────────────────────────────────────

/// `{status, message}` reply of mutations and OTP requests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub status: Option<StatusFlag>,
    #[serde(default)]
    pub message: Option<String>,
}

impl MessageResponse {
    /// The message, when non-blank.
    pub fn message_text(&self) -> Option<&str> {
        self.message.as_deref().map(str::trim).filter(|m| !m.is_empty())
    }
}

/// `{status?, success?, data}` reply of read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataEnvelope<T> {
    #[serde(default)]
    pub status: Option<StatusFlag>,
    #[serde(default)]
    pub success: Option<StatusFlag>,
    #[serde(default)]
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> DataEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            status: Some(StatusFlag::Bool(true)),
            success: Some(StatusFlag::Bool(true)),
            message: None,
            data: Some(data),
        }
    }

    /// Data of an envelope whose `status` or `success` flag is set.
    pub fn into_data(self) -> Option<T> {
        let flagged = flag_is_truthy(&self.status) || flag_is_truthy(&self.success);
        if flagged {
            self.data
        } else {
            None
        }
    }

    /// Like [`DataEnvelope::into_data`], turning a missing payload into an
    /// API error carrying the backend message or `default_message`.
    pub fn into_result(self, default_message: &str) -> Result<T, Error> {
        let message = self
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| default_message.to_string());
        self.into_data().ok_or_else(|| Error::api(message))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Requests
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub mobile: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub mobile: String,
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListRequest {
    pub page: usize,
    pub limit: usize,
    pub search: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentIdRequest {
    pub student_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherIdRequest {
    pub teacher_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherViewRequest {
    pub teacher_id: i64,
    pub admin_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkStudentsRequest {
    pub student_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentUpdateRequest {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub teacher_id: i64,
    pub status: String,
    pub initial_capital: Decimal,
    pub current_capital: Decimal,
    pub risk_percent: f64,
    pub strategy: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeacherUpdateRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub status: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Responses
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifyResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Row of `/admin/student/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentListItem {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default)]
    pub joined_on: Option<String>,
}

/// Row of `/admin/teacher/list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherListItem {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub doj: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// `data` of `/admin/student/view`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentDetailDto {
    #[serde(default, deserialize_with = "de_id")]
    pub student_id: String,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub teacher_id: Option<String>,
    #[serde(default)]
    pub teacher_name: Option<String>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub initial_capital: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub current_capital: Option<Decimal>,
    #[serde(default)]
    pub risk_percent: Option<f64>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub joined_on: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherSummaryDto {
    #[serde(default)]
    pub total_students: Option<u32>,
    #[serde(default)]
    pub total_trades: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub total_capital: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub win_rate: Option<Decimal>,
}

/// Student row nested in teacher and stats payloads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudentRefDto {
    #[serde(default, alias = "student_id", deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, alias = "student_name")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub teacher_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub initial_capital: Option<Decimal>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub current_capital: Option<Decimal>,
    #[serde(default)]
    pub risk_percent: Option<f64>,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default)]
    pub joined_on: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeDto {
    #[serde(default, alias = "trade_id", deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub teacher_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default, alias = "symbol")]
    pub stock: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub price: Option<Decimal>,
    #[serde(default, alias = "type", alias = "side")]
    pub trade_type: Option<String>,
    #[serde(default)]
    pub exchange: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "de_opt_decimal")]
    pub pnl: Option<Decimal>,
}

/// `data` of `/admin/teacher/view`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherDetailDto {
    #[serde(default, deserialize_with = "de_id")]
    pub teacher_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub joined_on: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
    #[serde(default)]
    pub specialization: Option<String>,
    #[serde(default)]
    pub summary: Option<TeacherSummaryDto>,
    #[serde(default)]
    pub associated_students: Vec<StudentRefDto>,
    #[serde(default)]
    pub recent_trades: Vec<TradeDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogDto {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub teacher_id: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub student_id: Option<String>,
    #[serde(default)]
    pub action: String,
    #[serde(default, alias = "created_at")]
    pub timestamp: String,
    #[serde(default)]
    pub details: String,
}

/// `data` of the teacher and student stats endpoints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDataDto {
    #[serde(default)]
    pub students: Option<Vec<StudentRefDto>>,
    #[serde(default)]
    pub trades: Vec<TradeDto>,
}

/// Row of `/admin/api-logs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiLogEntry {
    #[serde(default, deserialize_with = "de_id")]
    pub id: String,
    pub endpoint: String,
    #[serde(default)]
    pub hit_count: u64,
    #[serde(default)]
    pub execution_time_ms: f64,
}

/// Row of `/admin/db/table-counts`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableCountEntry {
    pub table_name: String,
    #[serde(default)]
    pub count: u64,
}
