//! Wire model of the GitHub repository search response.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::{RepositoryRecord, SearchPage};

/// `GET /search/repositories` response body. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_count: i64,
    #[serde(default)]
    pub items: Vec<RepoItem>,
}

/// One repository in a search response.
#[derive(Debug, Deserialize)]
pub struct RepoItem {
    pub id: i64,
    pub full_name: String,
    pub html_url: String,
    pub language: Option<String>,
    pub stargazers_count: u32,
    pub forks_count: u32,
    pub updated_at: DateTime<Utc>,
}

impl From<RepoItem> for RepositoryRecord {
    fn from(item: RepoItem) -> Self {
        Self {
            id: item.id,
            full_name: item.full_name,
            html_url: item.html_url,
            language: item.language,
            stars: item.stargazers_count,
            forks: item.forks_count,
            updated_at: item.updated_at,
        }
    }
}

impl From<SearchResponse> for SearchPage {
    fn from(response: SearchResponse) -> Self {
        Self {
            total_count: response.total_count,
            items: response.items.into_iter().map(Into::into).collect(),
        }
    }
}
