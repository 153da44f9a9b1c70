//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::PopularityService;
use crate::infrastructure::github::GithubClient;
use crate::infrastructure::resilience::CircuitBreaker;

/// Cheaply cloneable handle to the long-lived service graph.
///
/// The circuit breaker is the same instance the GitHub client consults, held
/// here so the health endpoint can report its state.
#[derive(Clone)]
pub struct AppState {
    pub popularity_service: Arc<PopularityService<GithubClient>>,
    pub circuit_breaker: Arc<CircuitBreaker>,
}

impl AppState {
    pub fn new(client: GithubClient, circuit_breaker: Arc<CircuitBreaker>) -> Self {
        Self {
            popularity_service: Arc::new(PopularityService::new(Arc::new(client))),
            circuit_breaker,
        }
    }
}
