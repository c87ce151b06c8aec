//! Event API Handlers

use axum::{Json, extract::State};
use shared::models::{Event, EventCreate};

use crate::core::ServerState;
use crate::utils::validation::validate_payload;
use crate::utils::{ApiResult, ok};

/// GET /api/events
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Event>> {
    Ok(ok(state.events.list()))
}

/// POST /api/events
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EventCreate>,
) -> ApiResult<Event> {
    validate_payload(&payload)?;
    Ok(ok(state.events.create(payload)?))
}
