//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Order, OrderCreate, OrderQuery, OrderStatusUpdate, Page};

use crate::core::ServerState;
use crate::utils::{ApiResult, ok, ok_with_message};

/// POST /api/orders - 结账
pub async fn checkout(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<Order> {
    let order = state.orders.checkout(&state.catalog, payload)?;
    Ok(ok_with_message(order, "Order placed"))
}

/// GET /api/orders?status=&page=&page_size=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> ApiResult<Page<Order>> {
    Ok(ok(state.orders.list(&query, state.config.default_page_size)))
}

/// GET /api/orders/{id}
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<Order> {
    Ok(ok(state.orders.get(id)?))
}

/// PATCH /api/orders/{id}
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> ApiResult<Order> {
    Ok(ok(state.orders.update_status(id, payload.status)?))
}

/// DELETE /api/orders/{id}
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> ApiResult<Order> {
    Ok(ok(state.orders.delete(id)?))
}
