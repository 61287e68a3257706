use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_STUDENT_PAGE_SIZE, STUDENT_PAGE_SIZE_OPTIONS, TEACHER_PAGE_SIZE};
use crate::errors::{Result, ValidationError};

/// Requested page, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page: usize,
    pub page_size: usize,
}

impl PageRequest {
    /// Student directory page. Only the offered page sizes are accepted.
    pub fn students(page: Option<usize>, page_size: Option<usize>) -> Result<Self> {
        let page_size = page_size.unwrap_or(DEFAULT_STUDENT_PAGE_SIZE);
        if !STUDENT_PAGE_SIZE_OPTIONS.contains(&page_size) {
            return Err(ValidationError::InvalidInput(format!(
                "Page size must be one of {:?}",
                STUDENT_PAGE_SIZE_OPTIONS
            ))
            .into());
        }
        Ok(Self {
            page: page.unwrap_or(1).max(1),
            page_size,
        })
    }

    /// Teachers page; the size is fixed.
    pub fn teachers(page: Option<usize>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: TEACHER_PAGE_SIZE,
        }
    }
}

/// One page of rows plus the numbers the pager shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    /// 1-based index of the first row shown, 0 when empty.
    pub page_start: usize,
    /// 1-based index of the last row shown, 0 when empty.
    pub page_end: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
            page_start: self.page_start,
            page_end: self.page_end,
        }
    }
}

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

/// Slices an in-memory list. The page is clamped to `[1, total_pages]`.
pub fn paginate<T>(rows: Vec<T>, request: PageRequest) -> Page<T> {
    let page_size = request.page_size.max(1);
    let total_items = rows.len();
    let total_pages = total_pages(total_items, page_size);
    let page = request.page.clamp(1, total_pages);
    let offset = (page - 1) * page_size;

    let items: Vec<T> = rows.into_iter().skip(offset).take(page_size).collect();
    let (page_start, page_end) = if items.is_empty() {
        (0, 0)
    } else {
        (offset + 1, offset + items.len())
    };

    Page {
        items,
        page,
        page_size,
        total_items,
        total_pages,
        page_start,
        page_end,
    }
}

/// Wraps rows the backend already paginated.
///
/// The backend reports no total, so the page count is derived from the rows
/// returned and at most `page_size` of them are shown.
pub fn from_server_page<T>(rows: Vec<T>, request: PageRequest) -> Page<T> {
    let page_size = request.page_size.max(1);
    let total_items = rows.len();
    let total_pages = total_pages(total_items, page_size);
    let items: Vec<T> = rows.into_iter().take(page_size).collect();
    // The page number comes straight from the query string.
    let offset = (request.page.max(1) - 1).saturating_mul(page_size);
    let (page_start, page_end) = if items.is_empty() {
        (0, 0)
    } else {
        (
            offset.saturating_add(1),
            offset.saturating_add(items.len()),
        )
    };

    Page {
        items,
        page: request.page.max(1),
        page_size,
        total_items,
        total_pages,
        page_start,
        page_end,
    }
}
