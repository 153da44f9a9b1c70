//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::infrastructure::resilience::CircuitState;
use crate::state::AppState;

/// Returns service health with the upstream circuit state.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: circuit closed or probing (half-open)
/// - **503 Service Unavailable**: circuit open, upstream calls are refused
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "upstream_circuit": { "status": "ok", "message": "closed" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let circuit = state.circuit_breaker.state();
    let healthy = circuit != CircuitState::Open;

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            upstream_circuit: check_circuit(circuit),
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_circuit(circuit: CircuitState) -> CheckStatus {
    CheckStatus {
        status: if circuit == CircuitState::Open { "error" } else { "ok" }.to_string(),
        message: Some(circuit.as_str().to_string()),
    }
}
