//! Upstream search-query construction.
//!
//! Values are forwarded verbatim: nothing is escaped or quoted, so a caller
//! passing search qualifiers (e.g. `stars:>10`) in `free_text` extends the
//! upstream query on purpose or by accident.

use crate::domain::entities::SearchFilter;

/// Builds the upstream query string from a filter.
///
/// Parts are joined with single spaces in a fixed order, skipping absent or
/// blank values:
///
/// 1. free-text term
/// 2. `language:<value>`
/// 3. `created:>=<YYYY-MM-DD>`
///
/// An empty filter yields an empty string.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use repo_popularity::domain::entities::SearchFilter;
/// use repo_popularity::domain::query_builder::build;
///
/// let filter = SearchFilter::new(
///     Some("Java".to_string()),
///     NaiveDate::from_ymd_opt(2024, 1, 1),
///     Some("framework".to_string()),
/// );
/// assert_eq!(build(&filter), "framework language:Java created:>=2024-01-01");
/// ```
pub fn build(filter: &SearchFilter) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);

    if let Some(text) = non_blank(filter.free_text.as_deref()) {
        parts.push(text.to_string());
    }

    if let Some(language) = non_blank(filter.language.as_deref()) {
        parts.push(format!("language:{language}"));
    }

    if let Some(date) = filter.created_after {
        parts.push(format!("created:>={}", date.format("%Y-%m-%d")));
    }

    parts.join(" ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
