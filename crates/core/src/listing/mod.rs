//! Listing helpers shared by the directory pages: search, paging, sorting
//! and bulk selections.

mod bulk;
mod pagination;
mod search;
mod sorting;

#[cfg(test)]
mod listing_tests;

pub use bulk::{numeric_id, numeric_ids, MutationOutcome};
pub use pagination::{from_server_page, paginate, total_pages, Page, PageRequest};
pub use search::{filter_by_query, Searchable};
pub use sorting::{SortConfig, SortDirection};
