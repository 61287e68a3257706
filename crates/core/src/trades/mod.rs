//! Trades module - read-only trade records and ordering helpers.

mod trades_model;


pub use trades_model::{
    for_student, for_teacher, recent_for_teacher, sort_newest_first, Exchange, Trade, TradeSide,
    TradeStatus,
};
