//! Trade domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::parse_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeSide {
    #[default]
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "BUY",
            TradeSide::Sell => "SELL",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    #[default]
    Nse,
    Bse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Pending,
    #[default]
    Executed,
    Completed,
    Failed,
}

/// A trade placed by a teacher and mirrored to a student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub teacher_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teacher_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_name: Option<String>,
    pub stock: String,
    pub quantity: u32,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(rename = "type", default)]
    pub trade_type: TradeSide,
    #[serde(default)]
    pub exchange: Exchange,
    #[serde(default)]
    pub status: TradeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub pnl: Option<Decimal>,
}

impl Trade {
    /// The execution time, falling back to the creation time.
    pub fn effective_timestamp(&self) -> Option<DateTime<Utc>> {
        self.timestamp
            .as_deref()
            .and_then(parse_timestamp)
            .or_else(|| self.created_at.as_deref().and_then(parse_timestamp))
    }

    /// `price * quantity`, zero when the price is unknown. Capped at the
    /// `Decimal` bounds.
    pub fn value(&self) -> Decimal {
        self.price
            .unwrap_or_default()
            .saturating_mul(Decimal::from(self.quantity))
    }
}

/// Sorts trades newest first. Trades without a usable timestamp go last.
pub fn sort_newest_first(trades: &mut [Trade]) {
    trades.sort_by(|a, b| b.effective_timestamp().cmp(&a.effective_timestamp()));
}

pub fn for_teacher<'a>(trades: &'a [Trade], teacher_id: &'a str) -> impl Iterator<Item = &'a Trade> {
    trades.iter().filter(move |t| t.teacher_id == teacher_id)
}

pub fn for_student<'a>(trades: &'a [Trade], student_id: &'a str) -> impl Iterator<Item = &'a Trade> {
    trades
        .iter()
        .filter(move |t| t.student_id.as_deref() == Some(student_id))
}

/// Newest `limit` trades for a teacher.
pub fn recent_for_teacher(trades: &[Trade], teacher_id: &str, limit: usize) -> Vec<Trade> {
    let mut owned: Vec<Trade> = for_teacher(trades, teacher_id).cloned().collect();
    sort_newest_first(&mut owned);
    owned.truncate(limit);
    owned
}
