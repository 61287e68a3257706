use crate::students::Student;
use crate::teachers::Teacher;

/// Rows the directory search box can match.
pub trait Searchable {
    fn search_name(&self) -> &str;
    fn search_email(&self) -> &str;
}

impl Searchable for Teacher {
    fn search_name(&self) -> &str {
        &self.name
    }

    fn search_email(&self) -> &str {
        &self.email
    }
}

impl Searchable for Student {
    fn search_name(&self) -> &str {
        &self.name
    }

    fn search_email(&self) -> &str {
        &self.email
    }
}

/// Case-insensitive substring match on name or email.
/// A blank query keeps every row.
pub fn filter_by_query<T: Searchable + Clone>(rows: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| {
            row.search_name().to_lowercase().contains(&needle)
                || row.search_email().to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
