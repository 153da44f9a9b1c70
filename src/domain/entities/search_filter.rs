//! Search filter built from the optional request parameters.

use chrono::NaiveDate;

/// Optional filters narrowing an upstream repository search.
///
/// Constructed once per request and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub language: Option<String>,
    pub created_after: Option<NaiveDate>,
    pub free_text: Option<String>,
}

impl SearchFilter {
    /// Creates a filter from the raw request values.
    pub fn new(
        language: Option<String>,
        created_after: Option<NaiveDate>,
        free_text: Option<String>,
    ) -> Self {
        Self {
            language,
            created_after,
            free_text,
        }
    }
}
