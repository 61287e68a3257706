use rust_decimal::Decimal;
use serde::Serialize;

use crate::students::StudentRow;

/// Net P&L booked on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPnl {
    /// `d/m/yyyy`, or `N/A` when there were no dated trades.
    pub date: String,
    pub pnl: Decimal,
}

/// Aggregates over a set of trades.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    /// Percentage of trades with a positive P&L.
    pub win_rate: f64,
    pub total_pnl: Decimal,
    pub avg_trade_value: Decimal,
    pub most_traded_stock: String,
    pub best_day: DayPnl,
    pub worst_day: DayPnl,
}

/// A student ranked by capital P&L.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopStudent {
    #[serde(flatten)]
    pub student: StudentRow,
    pub pnl_percent: f64,
}
