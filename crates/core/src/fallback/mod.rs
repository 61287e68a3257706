//! Fallback module - source precedence and the built-in sample rows.

mod sample_data;
mod source;


pub use sample_data::{
    sample_student_logs, sample_student_trades, sample_students, sample_teacher_logs,
    sample_teacher_trades,
};
pub use source::{resolve_rows, DataSource, Sourced};
