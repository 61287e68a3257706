use log::debug;
use serde::Serialize;

use crate::errors::Result;

/// Where a view's rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Api,
    Cache,
    Sample,
}

/// Rows resolved from the first source that had any.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<T> {
    pub rows: Vec<T>,
    pub source: DataSource,
    /// Backend failure, kept for inline display.
    pub error: Option<String>,
}

impl<T> Sourced<T> {
    pub fn from_fallback(&self) -> bool {
        self.source == DataSource::Sample
    }
}

/// Picks the backend rows, then the cached rows, then the sample rows.
///
/// An empty backend result falls through just like a failed call, but only
/// a failure is reported in `error`.
pub fn resolve_rows<T>(
    remote: Result<Vec<T>>,
    cached: impl FnOnce() -> Vec<T>,
    sample: impl FnOnce() -> Vec<T>,
) -> Sourced<T> {
    let error = match remote {
        Ok(rows) if !rows.is_empty() => {
            return Sourced {
                rows,
                source: DataSource::Api,
                error: None,
            }
        }
        Ok(_) => None,
        Err(e) => Some(e.user_message()),
    };

    let rows = cached();
    if !rows.is_empty() {
        return Sourced {
            rows,
            source: DataSource::Cache,
            error,
        };
    }

    debug!("No backend or cached rows, using sample data");
    Sourced {
        rows: sample(),
        source: DataSource::Sample,
        error,
    }
}
