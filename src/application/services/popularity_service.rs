//! Repository search ranked by popularity.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::entities::{PopularityResult, ScoredRepository, SearchFilter};
use crate::domain::query_builder;
use crate::domain::scoring;
use crate::domain::search_client::RepositorySearch;
use crate::domain::upstream_error::UpstreamError;

/// Service orchestrating query building, upstream search and ranking.
///
/// Holds no mutable state of its own; the only state shared between calls is
/// whatever the [`RepositorySearch`] implementation carries (its circuit
/// breaker).
pub struct PopularityService<S: RepositorySearch> {
    search: Arc<S>,
}

impl<S: RepositorySearch> PopularityService<S> {
    /// Creates a new popularity service.
    pub fn new(search: Arc<S>) -> Self {
        Self { search }
    }

    /// Searches one page of repositories and ranks it by popularity.
    ///
    /// Every item is scored against the same `now`, so the ranking stays
    /// consistent however long the request takes. Items are sorted by score
    /// descending; equal scores keep their upstream order.
    ///
    /// # Errors
    ///
    /// Propagates the [`UpstreamError`] returned by the search client unchanged.
    pub async fn handle(
        &self,
        filter: &SearchFilter,
        per_page: u32,
        page: u32,
        now: DateTime<Utc>,
    ) -> Result<PopularityResult, UpstreamError> {
        let query = query_builder::build(filter);
        info!(%query, per_page, page, "Searching popular repositories");

        let search_page = self.search.search(&query, per_page, page).await?;
        debug!(
            items = search_page.items.len(),
            total_count = search_page.total_count,
            "Scoring upstream page"
        );

        let mut items: Vec<ScoredRepository> = search_page
            .items
            .into_iter()
            .map(|record| {
                let score = scoring::score(record.stars, record.forks, record.updated_at, now);
                ScoredRepository::from_record(record, score)
            })
            .collect();

        // `sort_by` is stable, so ties keep upstream order.
        items.sort_by(|a, b| b.score.total_cmp(&a.score));

        Ok(PopularityResult {
            total_count: search_page.total_count,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{RepositoryRecord, SearchPage};
    use crate::domain::search_client::MockRepositorySearch;
    use crate::domain::upstream_error::UpstreamErrorKind;
    use chrono::{Duration, NaiveDate, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    fn record(id: i64, stars: u32, forks: u32, age_days: i64) -> RepositoryRecord {
        RepositoryRecord {
            id,
            full_name: format!("owner/repo-{id}"),
            html_url: format!("https://github.com/owner/repo-{id}"),
            language: Some("Rust".to_string()),
            stars,
            forks,
            updated_at: now() - Duration::days(age_days),
        }
    }

    fn service_returning(page: SearchPage) -> PopularityService<MockRepositorySearch> {
        let mut mock = MockRepositorySearch::new();
        mock.expect_search()
            .returning(move |_, _, _| Ok(page.clone()));
        PopularityService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_builds_query_and_forwards_paging() {
        let mut mock = MockRepositorySearch::new();
        mock.expect_search()
            .withf(|query, per_page, page| {
                query == "framework language:Java created:>=2024-01-01"
                    && *per_page == 20
                    && *page == 3
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(SearchPage {
                    total_count: 0,
                    items: vec![],
                })
            });

        let service = PopularityService::new(Arc::new(mock));
        let filter = SearchFilter::new(
            Some("Java".to_string()),
            NaiveDate::from_ymd_opt(2024, 1, 1),
            Some("framework".to_string()),
        );

        let result = service.handle(&filter, 20, 3, now()).await.unwrap();

        assert_eq!(result.total_count, 0);
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_ranks_descending_by_score() {
        let service = service_returning(SearchPage {
            total_count: 1_000,
            items: vec![record(1, 10, 5, 0), record(2, 50, 80, 0)],
        });

        let result = service
            .handle(&SearchFilter::default(), 2, 1, now())
            .await
            .unwrap();

        assert_eq!(result.total_count, 1_000);
        assert_eq!(result.count(), 2);
        assert_eq!(result.items[0].id, 2);
        assert_eq!(result.items[0].score, 64.0);
        assert_eq!(result.items[1].id, 1);
        assert_eq!(result.items[1].score, 17.5);
    }

    #[tokio::test]
    async fn test_ties_keep_upstream_order() {
        let service = service_returning(SearchPage {
            total_count: 4,
            items: vec![
                record(1, 10, 5, 0),
                record(2, 100, 0, 0),
                record(3, 10, 5, 0),
                record(4, 10, 5, 0),
            ],
        });

        let result = service
            .handle(&SearchFilter::default(), 4, 1, now())
            .await
            .unwrap();

        let ids: Vec<i64> = result.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1, 3, 4]);
    }

    #[tokio::test]
    async fn test_scores_with_injected_now() {
        let service = service_returning(SearchPage {
            total_count: 2,
            items: vec![record(1, 0, 0, 30), record(2, 0, 0, 60)],
        });

        let result = service
            .handle(&SearchFilter::default(), 2, 1, now())
            .await
            .unwrap();

        assert_eq!(result.items[0].score, 5.0);
        assert_eq!(result.items[1].score, 3.33);
    }

    #[tokio::test]
    async fn test_identical_inputs_give_identical_output() {
        let service = service_returning(SearchPage {
            total_count: 3,
            items: vec![record(1, 3, 1, 2), record(2, 7, 0, 45), record(3, 1, 9, 400)],
        });
        let filter = SearchFilter::default();

        let first = service.handle(&filter, 3, 1, now()).await.unwrap();
        let second = service.handle(&filter, 3, 1, now()).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_count_is_page_size_not_total() {
        let service = service_returning(SearchPage {
            total_count: 12_345,
            items: vec![record(1, 1, 1, 1)],
        });

        let result = service
            .handle(&SearchFilter::default(), 1, 1, now())
            .await
            .unwrap();

        assert_eq!(result.total_count, 12_345);
        assert_eq!(result.count(), 1);
    }

    #[tokio::test]
    async fn test_propagates_upstream_error_unchanged() {
        let mut mock = MockRepositorySearch::new();
        mock.expect_search().times(1).returning(|_, _, _| {
            Err(UpstreamError::new(
                UpstreamErrorKind::RateLimited,
                Some(429),
                "API rate limit exceeded",
            ))
        });

        let service = PopularityService::new(Arc::new(mock));
        let err = service
            .handle(&SearchFilter::default(), 20, 1, now())
            .await
            .unwrap_err();

        assert_eq!(err.kind, UpstreamErrorKind::RateLimited);
        assert_eq!(err.http_status, Some(429));
        assert_eq!(err.message, "API rate limit exceeded");
    }
}
