//! Minimum-spend policy route (public)

use axum::{Router, extract::State, routing::get};
use shared::MinimumSpendPolicy;

use crate::core::ServerState;
use crate::utils::{ApiResult, ok};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/policy/minimum-spend", get(minimum_spend))
}

/// GET /api/policy/minimum-spend
///
/// Clients check pre-orders against the same numbers the server enforces.
pub async fn minimum_spend(State(state): State<ServerState>) -> ApiResult<MinimumSpendPolicy> {
    Ok(ok(state.policy))
}
