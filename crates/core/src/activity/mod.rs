//! Activity module - audit log models, filtering and CSV export.

mod activity_model;
mod csv_export;
mod log_filter;


pub use activity_model::{
    ActionFilter, ActivityAction, ActivityLog, ActivityLogRow, ActivityLogView, CsvExport,
    FilterCounts,
};
pub use csv_export::{build_export, export_csv, export_file_name, CSV_HEADERS};
pub use log_filter::{
    build_log_view, filter_counts, filter_logs, sort_logs_newest_first, to_rows,
};
