//! DTOs for the ranked repository search endpoint.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use validator::Validate;

use crate::domain::entities::{PopularityResult, ScoredRepository, SearchFilter};

pub const DEFAULT_PER_PAGE: u32 = 20;
pub const DEFAULT_PAGE: u32 = 1;

/// Query parameters of `GET /repos/popularity`.
///
/// Numbers and dates arrive as strings and are parsed with `serde_with`, so a
/// malformed value is a query rejection rather than a silent default. An empty
/// value (`per_page=`) counts as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct PopularityParams {
    /// Free-text search term.
    pub query: Option<String>,

    pub language: Option<String>,

    /// Lower bound on repository creation date, `YYYY-MM-DD`.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub created_after: Option<NaiveDate>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(range(min = 1, max = 100, message = "per_page must be between 1 and 100"))]
    pub per_page: Option<u32>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<u32>,
}

impl PopularityParams {
    pub fn per_page(&self) -> u32 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE)
    }

    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    pub fn filter(&self) -> SearchFilter {
        SearchFilter::new(
            self.language.clone(),
            self.created_after,
            self.query.clone(),
        )
    }
}

/// Ranked search response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularityResponse {
    /// Total matches reported by GitHub across all pages.
    pub total_count: i64,
    /// Number of items in this page.
    pub count: usize,
    pub items: Vec<RepositoryResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryResponse {
    pub id: i64,
    pub name: String,
    pub html_url: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    /// RFC 3339, UTC.
    pub updated_at: String,
    pub score: f64,
}

impl From<ScoredRepository> for RepositoryResponse {
    fn from(repo: ScoredRepository) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            html_url: repo.html_url,
            language: repo.language,
            stars: repo.stars,
            forks: repo.forks,
            updated_at: format_timestamp(repo.updated_at),
            score: repo.score,
        }
    }
}

impl From<PopularityResult> for PopularityResponse {
    fn from(result: PopularityResult) -> Self {
        let count = result.count();
        Self {
            total_count: result.total_count,
            count,
            items: result.items.into_iter().map(Into::into).collect(),
        }
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
