pub mod format;
pub mod time_utils;

pub use format::{format_count, format_inr, parse_decimal_lenient, percent_of};
pub use time_utils::{
    format_date_medium, format_date_short, format_time_short, parse_timestamp, relative_time,
};
