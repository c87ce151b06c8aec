//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;
use shared::models::{AvailabilityQuery, Table, TableAvailability, TableCreate};

use crate::core::ServerState;
use crate::utils::{ApiResult, ok};

/// GET /api/tables - 获取所有桌台
pub async fn list(State(state): State<ServerState>) -> ApiResult<Vec<Table>> {
    Ok(ok(state.reservations.list_tables()))
}

/// GET /api/tables/availability?table_type=&date=&time_slot=
pub async fn availability(
    State(state): State<ServerState>,
    Query(query): Query<AvailabilityQuery>,
) -> ApiResult<TableAvailability> {
    Ok(ok(state.reservations.availability(query, Utc::now())?))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TableCreate>,
) -> ApiResult<Table> {
    Ok(ok(state.reservations.create_table(payload, Utc::now())?))
}
