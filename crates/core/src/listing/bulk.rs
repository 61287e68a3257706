use serde::Serialize;

use crate::errors::{Result, ValidationError};

/// Outcome of a delete or status change.
///
/// The cached mirror is changed whether or not the backend accepted the
/// call; `error` carries the backend failure for inline display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationOutcome {
    pub affected_ids: Vec<String>,
    pub remote_ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MutationOutcome {
    /// A change that never reaches the backend.
    pub fn local(affected_ids: Vec<String>) -> Self {
        Self {
            affected_ids,
            remote_ok: true,
            message: None,
            error: None,
        }
    }

    pub fn remote(affected_ids: Vec<String>, result: Result<String>) -> Self {
        match result {
            Ok(message) => Self {
                affected_ids,
                remote_ok: true,
                message: Some(message),
                error: None,
            },
            Err(err) => Self {
                affected_ids,
                remote_ok: false,
                message: None,
                error: Some(err.user_message()),
            },
        }
    }
}

/// Numeric ids the backend accepts. Ids that do not parse are dropped.
pub fn numeric_ids(ids: &[String]) -> Result<Vec<i64>> {
    let parsed: Vec<i64> = ids
        .iter()
        .filter_map(|id| id.trim().parse::<i64>().ok())
        .collect();
    if parsed.is_empty() {
        return Err(
            ValidationError::InvalidInput("No valid student IDs selected".to_string()).into(),
        );
    }
    Ok(parsed)
}

/// Parses one record id for a path or body parameter.
pub fn numeric_id(id: &str, label: &str) -> Result<i64> {
    id.trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidInput(format!("Invalid {} ID", label)).into())
}
