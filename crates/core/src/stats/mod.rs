//! Stats module - trade and capital aggregates for the statistics pages.

mod stats_model;
mod trade_stats;


pub use stats_model::{DayPnl, TopStudent, TradeStats};
pub use trade_stats::{best_and_worst_day, capital_pnl, most_traded_stock, top_students};
