//! Business logic services for the application layer.

pub mod popularity_service;

pub use popularity_service::PopularityService;
