use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort column and direction of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortConfig<F> {
    pub field: F,
    pub direction: SortDirection,
}

impl<F: Copy + PartialEq> SortConfig<F> {
    pub fn new(field: F) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Clicking the active column flips it; a new column starts descending.
    pub fn toggle(self, field: F) -> Self {
        if self.field == field {
            Self {
                field,
                direction: self.direction.flipped(),
            }
        } else {
            Self::new(field)
        }
    }

    /// Stable in-place sort. `compare` orders ascending for the given field.
    pub fn sort<T>(&self, rows: &mut [T], compare: impl Fn(F, &T, &T) -> Ordering) {
        let field = self.field;
        match self.direction {
            SortDirection::Asc => rows.sort_by(|a, b| compare(field, a, b)),
            SortDirection::Desc => rows.sort_by(|a, b| compare(field, b, a)),
        }
    }
}
