//! Mapping of wire rows into domain records.
//!
//! Merges follow one precedence: backend value, then the cached copy, then
//! a default.

use chrono::{DateTime, SecondsFormat, Utc};
use log::warn;
use rust_decimal::prelude::ToPrimitive;

use super::api_model::{
    ActivityLogDto, StudentDetailDto, StudentListItem, StudentRefDto, TeacherDetailDto,
    TeacherListItem, TradeDto,
};
use crate::activity::{ActivityAction, ActivityLog};
use crate::students::{Student, StudentStatus};
use crate::teachers::{Teacher, TeacherStatus};
use crate::trades::{Exchange, Trade, TradeSide, TradeStatus};

fn iso(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn merge_student_list_item(
    item: StudentListItem,
    cached: Option<&Student>,
    now: DateTime<Utc>,
) -> Student {
    Student {
        id: item.id,
        name: item.name,
        email: item
            .email
            .or_else(|| cached.map(|c| c.email.clone()))
            .unwrap_or_default(),
        mobile: item
            .mobile
            .or_else(|| cached.map(|c| c.mobile.clone()))
            .unwrap_or_default(),
        teacher_id: item
            .teacher_id
            .or_else(|| cached.map(|c| c.teacher_id.clone()))
            .unwrap_or_default(),
        teacher_name: item
            .teacher_name
            .or_else(|| cached.and_then(|c| c.teacher_name.clone())),
        status: item
            .status
            .as_deref()
            .map(StudentStatus::from_wire)
            .or_else(|| cached.map(|c| c.status))
            .unwrap_or_default(),
        initial_capital: cached.map(|c| c.initial_capital).unwrap_or_default(),
        current_capital: cached.map(|c| c.current_capital).unwrap_or_default(),
        risk_percentage: cached.map(|c| c.risk_percentage).unwrap_or_default(),
        strategy: cached
            .map(|c| c.strategy.clone())
            .filter(|s| !s.is_empty())
            .unwrap_or_default(),
        joined_date: non_blank(item.joined_on)
            .or_else(|| cached.map(|c| c.joined_date.clone()).filter(|d| !d.is_empty()))
            .unwrap_or_else(|| iso(now)),
    }
}

pub fn student_from_detail(dto: StudentDetailDto, now: DateTime<Utc>) -> Student {
    Student {
        id: dto.student_id,
        name: dto.student_name,
        email: dto.email.unwrap_or_default(),
        mobile: dto.mobile.unwrap_or_default(),
        teacher_id: dto.teacher_id.unwrap_or_default(),
        teacher_name: dto.teacher_name,
        status: dto
            .status
            .as_deref()
            .map(StudentStatus::from_wire)
            .unwrap_or_default(),
        initial_capital: dto.initial_capital.unwrap_or_default(),
        current_capital: dto.current_capital.unwrap_or_default(),
        risk_percentage: dto.risk_percent.unwrap_or_default(),
        strategy: dto.strategy.unwrap_or_default(),
        joined_date: non_blank(dto.joined_on).unwrap_or_else(|| iso(now)),
    }
}

/// Student nested in a teacher or stats payload.
pub fn student_from_ref(
    dto: StudentRefDto,
    teacher: Option<&Teacher>,
    cached: Option<&Student>,
    now: DateTime<Utc>,
) -> Student {
    Student {
        id: dto.id,
        name: dto.name,
        email: dto
            .email
            .or_else(|| cached.map(|c| c.email.clone()))
            .unwrap_or_default(),
        mobile: dto
            .mobile
            .or_else(|| cached.map(|c| c.mobile.clone()))
            .unwrap_or_default(),
        teacher_id: dto
            .teacher_id
            .or_else(|| teacher.map(|t| t.id.clone()))
            .or_else(|| cached.map(|c| c.teacher_id.clone()))
            .unwrap_or_default(),
        teacher_name: teacher
            .map(|t| t.name.clone())
            .or_else(|| cached.and_then(|c| c.teacher_name.clone())),
        status: dto
            .status
            .as_deref()
            .map(StudentStatus::from_wire)
            .or_else(|| cached.map(|c| c.status))
            .unwrap_or_default(),
        initial_capital: dto
            .initial_capital
            .or_else(|| cached.map(|c| c.initial_capital))
            .unwrap_or_default(),
        current_capital: dto
            .current_capital
            .or_else(|| cached.map(|c| c.current_capital))
            .unwrap_or_default(),
        risk_percentage: dto
            .risk_percent
            .or_else(|| cached.map(|c| c.risk_percentage))
            .unwrap_or_default(),
        strategy: dto
            .strategy
            .or_else(|| cached.map(|c| c.strategy.clone()))
            .unwrap_or_default(),
        joined_date: non_blank(dto.joined_on)
            .or_else(|| cached.map(|c| c.joined_date.clone()))
            .unwrap_or_else(|| iso(now)),
    }
}

pub fn teacher_from_list_item(
    item: TeacherListItem,
    cached: Option<&Teacher>,
    now: DateTime<Utc>,
) -> Teacher {
    Teacher {
        id: item.id,
        name: item.name,
        email: item
            .email
            .or_else(|| cached.map(|c| c.email.clone()))
            .unwrap_or_default(),
        mobile: cached.map(|c| c.mobile.clone()).unwrap_or_default(),
        phone: cached.and_then(|c| c.phone.clone()),
        status: item
            .status
            .as_deref()
            .map(TeacherStatus::from_wire)
            .or_else(|| cached.map(|c| c.status))
            .unwrap_or_default(),
        total_students: cached.map(|c| c.total_students).unwrap_or_default(),
        total_trades: cached.map(|c| c.total_trades).unwrap_or_default(),
        total_capital: cached.and_then(|c| c.total_capital),
        win_rate: cached.and_then(|c| c.win_rate),
        specialization: cached.and_then(|c| c.specialization.clone()),
        joined_date: non_blank(item.doj)
            .or_else(|| cached.map(|c| c.joined_date.clone()).filter(|d| !d.is_empty()))
            .unwrap_or_else(|| iso(now)),
    }
}

pub fn teacher_from_detail(
    dto: &TeacherDetailDto,
    cached: Option<&Teacher>,
    now: DateTime<Utc>,
) -> Teacher {
    let summary = dto.summary.clone().unwrap_or_default();
    let phone = non_blank(dto.phone.clone());
    let mobile = phone
        .as_deref()
        .map(|p| p.chars().filter(char::is_ascii_digit).collect::<String>())
        .or_else(|| cached.map(|c| c.mobile.clone()))
        .unwrap_or_default();

    Teacher {
        id: dto.teacher_id.clone(),
        name: dto.name.clone(),
        email: dto
            .email
            .clone()
            .or_else(|| cached.map(|c| c.email.clone()))
            .unwrap_or_default(),
        mobile,
        phone,
        status: dto
            .status
            .as_deref()
            .map(TeacherStatus::from_wire)
            .or_else(|| cached.map(|c| c.status))
            .unwrap_or_default(),
        total_students: summary.total_students.unwrap_or_default(),
        total_trades: summary.total_trades.unwrap_or_default(),
        total_capital: summary
            .total_capital
            .or_else(|| cached.and_then(|c| c.total_capital)),
        win_rate: summary
            .win_rate
            .and_then(|w| w.to_f64())
            .or_else(|| cached.and_then(|c| c.win_rate)),
        specialization: non_blank(dto.specialization.clone())
            .or_else(|| cached.and_then(|c| c.specialization.clone())),
        joined_date: non_blank(dto.joined_on.clone()).unwrap_or_else(|| iso(now)),
    }
}

pub fn trade_from_dto(dto: TradeDto, default_teacher_id: &str) -> Trade {
    let trade_type = match dto.trade_type.as_deref().map(str::to_ascii_uppercase) {
        Some(t) if t == "SELL" => TradeSide::Sell,
        _ => TradeSide::Buy,
    };
    let exchange = match dto.exchange.as_deref().map(str::to_ascii_uppercase) {
        Some(e) if e == "BSE" => Exchange::Bse,
        _ => Exchange::Nse,
    };
    let status = match dto.status.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("pending") => TradeStatus::Pending,
        Some("completed") => TradeStatus::Completed,
        Some("failed") => TradeStatus::Failed,
        _ => TradeStatus::Executed,
    };

    Trade {
        id: dto.id,
        teacher_id: dto
            .teacher_id
            .unwrap_or_else(|| default_teacher_id.to_string()),
        teacher_name: None,
        student_id: dto.student_id,
        student_name: dto.student_name,
        stock: dto.stock,
        quantity: dto.quantity.unwrap_or_default(),
        price: dto.price,
        trade_type,
        exchange,
        status,
        timestamp: non_blank(dto.timestamp),
        created_at: non_blank(dto.created_at),
        pnl: dto.pnl,
    }
}

/// `None` for actions this dashboard does not know.
pub fn activity_log_from_dto(dto: ActivityLogDto) -> Option<ActivityLog> {
    match dto.action.parse::<ActivityAction>() {
        Ok(action) => Some(ActivityLog {
            id: dto.id,
            teacher_id: dto.teacher_id,
            student_id: dto.student_id,
            action,
            timestamp: dto.timestamp,
            details: dto.details,
        }),
        Err(e) => {
            warn!("Skipping activity log {}: {}", dto.id, e);
            None
        }
    }
}
