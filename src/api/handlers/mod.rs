//! HTTP request handlers for API endpoints.

pub mod health;
pub mod popularity;

pub use health::health_handler;
pub use popularity::popularity_handler;
