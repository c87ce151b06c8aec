//! Menu Item API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{
    AvailabilityUpdate, MenuItem, MenuItemCreate, MenuItemUpdate, MenuQuery, PopularUpdate,
};

use crate::core::ServerState;
use crate::utils::validation::validate_payload;
use crate::utils::{ApiResult, ok};

/// GET /api/menu-items?category=&search=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> ApiResult<Vec<MenuItem>> {
    Ok(ok(state.catalog.list(&query)))
}

/// GET /api/menu-items/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<MenuItem> {
    Ok(ok(state.catalog.get(id)?))
}

/// POST /api/menu-items
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> ApiResult<MenuItem> {
    validate_payload(&payload)?;
    Ok(ok(state.catalog.create(payload)?))
}

/// PUT /api/menu-items/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> ApiResult<MenuItem> {
    validate_payload(&payload)?;
    Ok(ok(state.catalog.update(id, payload)?))
}

/// DELETE /api/menu-items/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<MenuItem> {
    Ok(ok(state.catalog.delete(id)?))
}

/// PATCH /api/menu-items/{id}/availability
pub async fn set_availability(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<AvailabilityUpdate>,
) -> ApiResult<MenuItem> {
    Ok(ok(state.catalog.set_availability(id, payload.is_available)?))
}

/// PATCH /api/menu-items/{id}/popular
pub async fn set_popular(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<PopularUpdate>,
) -> ApiResult<MenuItem> {
    Ok(ok(state.catalog.set_popular(id, payload.popular)?))
}
