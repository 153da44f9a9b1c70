//! Repository entities: the upstream record and its scored counterpart.

use chrono::{DateTime, Utc};

/// A repository row as returned by the upstream search index.
///
/// Copied out of the wire model as soon as a response is decoded, so the rest
/// of the crate never depends on upstream field names.
#[derive(Debug, Clone, PartialEq)]
pub struct RepositoryRecord {
    pub id: i64,
    pub full_name: String,
    pub html_url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: DateTime<Utc>,
}

/// A repository with its computed popularity score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRepository {
    pub id: i64,
    pub name: String,
    pub html_url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub updated_at: DateTime<Utc>,
    pub score: f64,
}

impl ScoredRepository {
    /// Attaches a score to an upstream record.
    pub fn from_record(record: RepositoryRecord, score: f64) -> Self {
        Self {
            id: record.id,
            name: record.full_name,
            html_url: record.html_url,
            language: record.language,
            stars: record.stars,
            forks: record.forks,
            updated_at: record.updated_at,
            score,
        }
    }
}
