use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::activity_model::{ActivityLog, CsvExport};
use crate::errors::{Error, Result};
use crate::utils::{format_date_short, format_time_short};

pub const CSV_HEADERS: [&str; 4] = ["Date", "Time", "Action", "Details"];

const FILE_SUFFIX: &str = "_activity_logs.csv";

/// Download name for an owner's log export. Only the first space is replaced.
pub fn export_file_name(owner_name: &str) -> String {
    format!("{}{}", owner_name.replacen(' ', "_", 1), FILE_SUFFIX)
}

/// Renders logs as CSV: a plain header line followed by one fully quoted
/// row per log, in the given order.
pub fn export_csv(logs: &[ActivityLog]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for log in logs {
        let (date, time) = match log.parsed_timestamp() {
            Some(ts) => (format_date_short(ts), format_time_short(ts)),
            None => ("Invalid Date".to_string(), "Invalid Date".to_string()),
        };
        writer.write_record([
            date.as_str(),
            time.as_str(),
            log.action.label().as_str(),
            log.details.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Unexpected(format!("Failed to flush CSV export: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| Error::Serialization(format!("CSV export is not UTF-8: {}", e)))?;

    let mut content = CSV_HEADERS.join(",");
    if !body.is_empty() {
        content.push('\n');
        content.push_str(body.strip_suffix('\n').unwrap_or(&body));
    }
    Ok(content)
}

/// Builds the downloadable export, or `None` when there is nothing to export.
pub fn build_export(owner_name: &str, logs: &[ActivityLog]) -> Result<Option<CsvExport>> {
    if logs.is_empty() {
        return Ok(None);
    }
    Ok(Some(CsvExport {
        file_name: export_file_name(owner_name),
        content: export_csv(logs)?,
        rows: logs.len(),
    }))
}
