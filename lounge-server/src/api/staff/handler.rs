//! Staff management handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::models::{Page, PageQuery, Staff, StaffCreate, StaffRoleUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{ApiResult, ok};

/// GET /api/staff?page=&page_size=
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Page<Staff>> {
    Ok(ok(state.staff.list(&query, state.config.default_page_size)))
}

/// POST /api/staff
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> ApiResult<Staff> {
    Ok(ok(state.staff.create(payload)?))
}

/// PATCH /api/staff/{id}/role
pub async fn update_role(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<StaffRoleUpdate>,
) -> ApiResult<Staff> {
    let staff = state.staff.update_role(id, payload.role)?;
    tracing::info!(staff_id = id, by = user.id, role = payload.role.as_str(), "Role updated");
    Ok(ok(staff))
}

/// DELETE /api/staff/{id}
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Staff> {
    Ok(ok(state.staff.delete(id, user.id)?))
}
