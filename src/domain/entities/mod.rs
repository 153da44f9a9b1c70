//! Core domain entities representing the business data model.
//!
//! Entities are plain request-scoped values without I/O. None of them outlive
//! a single request.
//!
//! # Entity Types
//!
//! - [`SearchFilter`] - Optional filters supplied by the caller
//! - [`RepositoryRecord`] - A repository row as reported upstream
//! - [`SearchPage`] - One page of upstream results
//! - [`ScoredRepository`] - A repository with its popularity score
//! - [`PopularityResult`] - The ranked page returned to callers

pub mod popularity;
pub mod repository;
pub mod search_filter;

pub use popularity::{PopularityResult, SearchPage};
pub use repository::{RepositoryRecord, ScoredRepository};
pub use search_filter::SearchFilter;
