//! Reservation API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use shared::models::{
    Page, Reservation, ReservationCreate, ReservationQuery, ReservationStatus,
    ReservationStatusUpdate,
};

use crate::core::ServerState;
use crate::utils::{ApiResult, ok, ok_with_message};

/// POST /api/reservations
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> ApiResult<Reservation> {
    let reservation = state
        .reservations
        .create(payload, &state.catalog, &state.events, Utc::now())?;
    let message = match reservation.status {
        ReservationStatus::Waitlisted => "Added to waitlist",
        _ => "Reservation received",
    };
    Ok(ok_with_message(reservation, message))
}

/// GET /api/reservations?status=&search=&page=&page_size=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ReservationQuery>,
) -> ApiResult<Page<Reservation>> {
    Ok(ok(state.reservations.list(
        &query,
        state.config.default_page_size,
        Utc::now(),
    )))
}

/// GET /api/reservations/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> ApiResult<Reservation> {
    Ok(ok(state.reservations.get(id, Utc::now())?))
}

/// PATCH /api/reservations/{id}
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> ApiResult<Reservation> {
    Ok(ok(state
        .reservations
        .update_status(id, payload.status, Utc::now())?))
}
