use std::collections::HashMap;

use log::warn;
use rust_decimal::Decimal;

use super::stats_model::{DayPnl, TopStudent, TradeStats};
use crate::constants::NOT_AVAILABLE;
use crate::students::{Student, StudentRow};
use crate::trades::Trade;
use crate::utils::{format_date_short, percent_of};

impl DayPnl {
    fn none() -> Self {
        Self {
            date: NOT_AVAILABLE.to_string(),
            pnl: Decimal::ZERO,
        }
    }
}

impl TradeStats {
    pub fn from_trades(trades: &[Trade]) -> Self {
        let total_trades = trades.len();
        let pnl_of = |t: &Trade| t.pnl.unwrap_or_default();

        let winning_trades = trades.iter().filter(|t| pnl_of(*t) > Decimal::ZERO).count();
        let losing_trades = trades.iter().filter(|t| pnl_of(*t) < Decimal::ZERO).count();
        let win_rate = if total_trades > 0 {
            winning_trades as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };
        let total_pnl = saturating_sum(trades.iter().map(pnl_of), "P&L");
        let avg_trade_value = if total_trades > 0 {
            saturating_sum(trades.iter().map(Trade::value), "trade value")
                / Decimal::from(total_trades)
        } else {
            Decimal::ZERO
        };

        let (best_day, worst_day) = best_and_worst_day(trades);

        Self {
            total_trades,
            winning_trades,
            losing_trades,
            win_rate,
            total_pnl,
            avg_trade_value,
            most_traded_stock: most_traded_stock(trades),
            best_day,
            worst_day,
        }
    }
}

/// Sums backend amounts, pinning the total at the `Decimal` bounds instead
/// of overflowing.
fn saturating_sum(values: impl Iterator<Item = Decimal>, what: &str) -> Decimal {
    let mut overflowed = false;
    let total = values.fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v).unwrap_or_else(|| {
            overflowed = true;
            acc.saturating_add(v)
        })
    });
    if overflowed {
        warn!("Total {} overflowed, capped at {}", what, total);
    }
    total
}

/// Stock with the most trades. Ties go to the stock seen first.
pub fn most_traded_stock(trades: &[Trade]) -> String {
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for trade in trades {
        let entry = counts.entry(trade.stock.as_str()).or_insert_with(|| {
            order.push(trade.stock.as_str());
            0
        });
        *entry += 1;
    }

    let mut best: Option<(&str, usize)> = None;
    for stock in order {
        let count = counts.get(stock).copied().unwrap_or_default();
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((stock, count));
        }
    }
    best.map(|(stock, _)| stock.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Days ranked by summed P&L. The best day is the first of the highest,
/// the worst the last of the lowest, in order of first appearance.
pub fn best_and_worst_day(trades: &[Trade]) -> (DayPnl, DayPnl) {
    let mut days: Vec<DayPnl> = Vec::new();
    for trade in trades {
        let Some(ts) = trade.effective_timestamp() else {
            continue;
        };
        let date = format_date_short(ts);
        let pnl = trade.pnl.unwrap_or_default();
        match days.iter_mut().find(|d| d.date == date) {
            Some(day) => day.pnl = day.pnl.saturating_add(pnl),
            None => days.push(DayPnl { date, pnl }),
        }
    }

    // stable sort keeps first-seen order among equal totals
    days.sort_by(|a, b| b.pnl.cmp(&a.pnl));
    let best = days.first().cloned().unwrap_or_else(DayPnl::none);
    let worst = days.last().cloned().unwrap_or_else(DayPnl::none);
    (best, worst)
}

/// Students ordered by capital P&L, highest first.
pub fn top_students(students: &[Student], limit: usize) -> Vec<TopStudent> {
    let mut ranked: Vec<TopStudent> = students
        .iter()
        .cloned()
        .map(|s| {
            let pnl_percent = if s.initial_capital > Decimal::ZERO {
                percent_of(s.profit_loss(), s.initial_capital)
            } else {
                0.0
            };
            TopStudent {
                student: StudentRow::from(s),
                pnl_percent,
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.student.profit_loss.cmp(&a.student.profit_loss));
    ranked.truncate(limit);
    ranked
}

/// Capital P&L and its percentage of the initial capital.
pub fn capital_pnl(student: &Student) -> (Decimal, f64) {
    let pnl = student.profit_loss();
    let percent = if student.initial_capital > Decimal::ZERO {
        percent_of(pnl, student.initial_capital)
    } else {
        0.0
    };
    (pnl, percent)
}
